//! Unit Tests Module

pub mod reports;
