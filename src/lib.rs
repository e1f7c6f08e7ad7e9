//! # Adaptive Connect Four
//!
//! A Connect Four engine built on depth-limited alpha-beta search, with a
//! heuristic evaluator whose feature weights tune themselves from game
//! outcomes and persist between runs.
//!
//! ## Modules
//!
//! - [`game`]: Board model: gravity drops, win/draw detection, window scans
//! - [`ai`]: Evaluators, alpha-beta search, fixed and adaptive agents
//! - [`checkpoint`]: Weight persistence stores
//! - [`training`]: Staged self-play trainer and outcome metrics
//! - [`session`]: Game driver for human and agent seats
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod checkpoint;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod training;
