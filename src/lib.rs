//! Drop Log Report Engine
//!
//! Turns crowd-sourced dungeon and rift drop logs into per-level drop-rate
//! reports.

pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod reports;
pub mod types;
pub mod utils;
