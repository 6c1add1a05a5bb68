//! Stop and bus storage with route statistics.
//!
//! The catalogue is populated once from input data and then frozen: the
//! route graph and every statistics query read it without mutating it.

mod distances;
mod store;

pub use store::TransportCatalogue;
