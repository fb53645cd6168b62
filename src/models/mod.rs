//! Models Module
//!
//! Response shapes returned by the REST catalog.

pub mod responses;

pub use responses::*;
