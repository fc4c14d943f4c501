//! # TicTac Zero
//!
//! Tic-tac-toe self-play where a "brain" agent learns to evaluate positions
//! from the outcomes of the games it has seen.
//!
//! ## Modules
//!
//! - [`game`] — Board, cells, sides, win/draw detection
//! - [`ai`] — Agent trait, random/tactical/brain agents, record memory, outcome model
//! - [`training`] — Self-play driver, batch trainer, metrics
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
