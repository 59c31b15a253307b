//! Crate root.
//!
//! Everything lives behind a library so the integration tests in `tests/`
//! (compiled as separate crates) can drive the headless game.

pub mod common;
pub mod game;
pub mod plugins;
