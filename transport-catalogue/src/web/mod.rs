//! Web layer for the transport catalogue.
//!
//! Serves bus, stop and route queries over HTTP against a network loaded at
//! startup.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
