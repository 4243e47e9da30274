//! A 2048-style sliding tile engine.
//!
//! [`engine::Session`] owns a game: the 4x4 grid, score, difficulty, a bounded undo history and
//! the win/loss flags. Hosts drive it with [`engine::Session::shift`], [`engine::Session::undo`]
//! and [`engine::Session::set_difficulty`] and read its state back through accessors.

pub mod engine;
pub mod error;

pub use error::{Error, Result};
