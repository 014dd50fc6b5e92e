//! Equipment registry, maintenance teams and work centers.
//!
//! Thin validated forms over backend collections. The scheduling core only
//! needs identifiers and display names from here; the rest supports the
//! registry screens.

pub mod domain;
pub mod ports;
pub mod services;
