//! JSON request documents: describe a network, then query it.
//!
//! A document carries `base_requests` (stops and buses), `routing_settings`
//! and `stat_requests`. Processing builds the catalogue and router once and
//! answers every query in order, tagging each answer with its request id.

mod dto;
mod error;
mod handler;

pub use dto::*;
pub use error::RequestError;
pub use handler::{RequestHandler, build_catalogue, load_document, process_document, read_document};
