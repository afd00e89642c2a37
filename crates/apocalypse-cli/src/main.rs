use anyhow::{ensure, Context, Result};
use apocalypse_core::apocalypse::{Apocalypse, RunSummary};
use apocalypse_core::config::SimConfig;
use apocalypse_core::field::SourceKind;
use apocalypse_core::grid::Position;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Drive a zombie pursuit simulation and report per-tick statistics.
#[derive(Parser, Debug)]
#[command(name = "apocalypse", version)]
struct Args {
    /// JSON scenario file; a built-in demo scenario is used when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 40)]
    ticks: usize,

    /// Record metrics every N ticks.
    #[arg(long, default_value_t = 1)]
    sample_every: usize,

    /// Override the scenario's random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the grid after every tick.
    #[arg(long)]
    render: bool,

    /// Write the run summary as JSON to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// A 12x16 chase: a wall with a gap splits the grid, zombies start on the
/// left, humans on the right.
fn demo_config() -> SimConfig {
    let mut obstacles = Vec::new();
    for row in 0..12 {
        if row != 5 && row != 6 {
            obstacles.push(Position::new(row, 7));
        }
    }
    SimConfig {
        grid_height: 12,
        grid_width: 16,
        obstacles,
        zombies: vec![
            Position::new(0, 0),
            Position::new(11, 0),
            Position::new(5, 1),
        ],
        humans: vec![
            Position::new(2, 12),
            Position::new(6, 10),
            Position::new(9, 14),
        ],
        seed: 42,
    }
}

fn render(sim: &Apocalypse) {
    for row in 0..sim.height() {
        let mut line = String::with_capacity(sim.width());
        for col in 0..sim.width() {
            let cell = Position::new(row, col);
            let glyph = if sim.zombies().contains(&cell) {
                'Z'
            } else if sim.humans().contains(&cell) {
                'H'
            } else if !sim.grid().is_empty(cell) {
                '#'
            } else {
                '.'
            };
            line.push(glyph);
        }
        println!("{line}");
    }
    println!();
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => demo_config(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.sample_every > 0, "--sample-every must be positive");

    let config = load_config(&args)?;
    let mut sim = Apocalypse::try_new(config).context("invalid scenario")?;
    println!(
        "{}x{} grid, {} zombies, {} humans, up to {} ticks",
        sim.height(),
        sim.width(),
        sim.num_zombies(),
        sim.num_humans(),
        args.ticks
    );
    if args.render {
        render(&sim);
    }

    let mut samples = Vec::new();
    for tick in 1..=args.ticks {
        let zombie_field = sim.compute_distance_field(SourceKind::Zombie);
        sim.move_humans(&zombie_field);
        let human_field = sim.compute_distance_field(SourceKind::Human);
        sim.move_zombies(&human_field);

        if tick % args.sample_every == 0 || tick == args.ticks {
            samples.push(sim.collect_tick_metrics(tick));
        }
        if args.render {
            println!("tick {tick}");
            render(&sim);
        }
    }

    let summary = RunSummary {
        schema_version: 1,
        ticks: args.ticks,
        sample_every: args.sample_every,
        final_human_count: sim.num_humans(),
        samples,
    };
    let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing summary to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
