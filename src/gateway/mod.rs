//! Backend gateway adapters shared by every bounded context.
//!
//! Port traits live with the context that consumes them:
//!
//! - [`crate::maintenance::ports::RequestGateway`]
//! - [`crate::catalog::ports::CatalogGateway`]
//! - [`crate::session::ports::AuthGateway`]
//!
//! This module holds the error type those ports share and the two adapters
//! implementing all of them: [`http::HttpGateway`] talks to the REST backend
//! and [`memory::InMemoryGateway`] keeps everything in process for tests and
//! offline demos.

mod error;
pub mod http;
pub mod memory;

pub use error::{GatewayError, GatewayResult};
