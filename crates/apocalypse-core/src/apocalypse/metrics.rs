use super::Apocalypse;
use crate::field::SourceKind;
use serde::{Deserialize, Serialize};

/// Per-tick aggregates describing how the chase is going.
///
/// Distance figures come from the zombie-seeded field; humans no zombie
/// can reach sit on sentinel cells and are left out of the aggregates.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TickMetrics {
    pub tick: usize,
    pub zombie_count: usize,
    pub human_count: usize,
    pub mean_zombie_distance: f64,
    pub nearest_zombie_distance: Option<usize>,
}

fn default_schema_version() -> u32 {
    1
}

/// Complete record of a driven simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticks: usize,
    pub sample_every: usize,
    pub final_human_count: usize,
    #[serde(default)]
    pub samples: Vec<TickMetrics>,
}

impl Apocalypse {
    pub fn collect_tick_metrics(&self, tick: usize) -> TickMetrics {
        let field = self.compute_distance_field(SourceKind::Zombie);
        let unreachable = field.unreachable();

        let mut distance_sum = 0usize;
        let mut reachable = 0usize;
        let mut nearest_zombie_distance: Option<usize> = None;

        for &human in self.humans() {
            let distance = field[human];
            if distance == unreachable {
                continue;
            }
            distance_sum += distance;
            reachable += 1;
            nearest_zombie_distance = Some(match nearest_zombie_distance {
                Some(best) => best.min(distance),
                None => distance,
            });
        }

        let mean_zombie_distance = if reachable > 0 {
            distance_sum as f64 / reachable as f64
        } else {
            0.0
        };

        TickMetrics {
            tick,
            zombie_count: self.num_zombies(),
            human_count: self.num_humans(),
            mean_zombie_distance,
            nearest_zombie_distance,
        }
    }
}
