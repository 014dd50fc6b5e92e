//! Session management for the logged-in user.
//!
//! The session replaces ambient global state with an explicit service
//! object: it is restored from local storage at start-up, changed only by
//! login, profile refresh and logout, and passed to every view that needs
//! to know who is acting.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Storage adapters in [`adapters`]
//! - The session service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
