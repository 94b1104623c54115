//! Bullet Hell - a terminal shoot-'em-up.
//!
//! Core modules:
//! - `compute`: Pure simulation (movement, firing, spawning, collisions)
//! - `game`: Menu / Playing / GameOver state machine
//! - `scene`: Per-frame draw commands
//! - `display`: Terminal rasteriser for a scene
//! - `input`: Held-key tracking and pointer signals
//! - `config`: Data-driven game balance

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod scene;
