//! Core simulation of zombie pursuit and human flight on an obstacle grid.
//!
//! Movement is guided by breadth-first distance fields: each tick the
//! embedding driver computes the zombie-seeded field and moves humans up
//! it, then computes the human-seeded field and moves zombies down it.

pub mod apocalypse;
pub mod config;
pub mod field;
pub mod grid;
