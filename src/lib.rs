//! rolltimer - round timer for grappling and combat-sports training.
//!
//! Preparation countdown, timed rounds with rest, back-to-back hell rounds
//! and a free-running stopwatch, driven from a terminal UI.

pub mod app;
pub mod config;
pub mod engine;
pub mod format;
pub mod logging;
pub mod mode;
pub mod notify;
pub mod orientation;
pub mod ticker;
pub mod ui;
