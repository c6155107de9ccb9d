//! Integration Tests Module
//!
//! End-to-end tests that build and persist reports over seeded stores.

pub mod cli_smoke_test;
pub mod dungeon_reports;
pub mod rift_reports;
