//! Flee and pursue movement policies evaluated over a distance field.
//!
//! Both policies are one template: walk the candidate directions, keep the
//! directions tied for the best admissible field value, and pick among them
//! at random. Humans flee with the diagonal direction set and maximize;
//! zombies pursue with the orthogonal set and minimize. The asymmetric
//! direction sets are a balance rule: humans get the escape-speed edge.

use crate::field::DistanceField;
use crate::grid::Position;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Candidate directions for fleeing humans, diagonals included.
const FLEE_DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Candidate directions for pursuing zombies, orthogonal only.
const PURSUE_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

#[derive(Clone, Copy, Debug)]
enum Goal {
    Maximize,
    Minimize,
}

/// Next position for a human fleeing the zombie-seeded field.
pub(super) fn flee_step<R: Rng + ?Sized>(
    entity: Position,
    field: &DistanceField,
    rng: &mut R,
) -> Position {
    best_step(entity, field, &FLEE_DIRECTIONS, Goal::Maximize, rng)
}

/// Next position for a zombie descending the human-seeded field.
pub(super) fn pursue_step<R: Rng + ?Sized>(
    entity: Position,
    field: &DistanceField,
    rng: &mut R,
) -> Position {
    best_step(entity, field, &PURSUE_DIRECTIONS, Goal::Minimize, rng)
}

fn best_step<R: Rng + ?Sized>(
    entity: Position,
    field: &DistanceField,
    directions: &[(isize, isize)],
    goal: Goal,
    rng: &mut R,
) -> Position {
    let unreachable = field.unreachable();
    let mut best_found = field[entity];
    // An entity no source can reach has nothing to climb or descend.
    if best_found == unreachable {
        return entity;
    }

    let mut best_moves: Vec<Position> = Vec::new();
    for &direction in directions {
        let Some(candidate) = entity.offset(direction, field.height(), field.width()) else {
            continue;
        };
        let value = field[candidate];
        // The sentinel marks obstacles and sealed pockets alike; both are
        // impassable here.
        if value == unreachable {
            continue;
        }
        let improves = match goal {
            Goal::Maximize => value > best_found,
            Goal::Minimize => value < best_found,
        };
        if improves {
            best_found = value;
            best_moves.clear();
            best_moves.push(candidate);
        } else if value == best_found {
            // Ties with the entity's own value count as moves, so cells on
            // a value plateau shuffle rather than freeze.
            best_moves.push(candidate);
        }
    }

    match best_moves.choose(rng) {
        Some(&cell) => cell,
        None => entity,
    }
}
