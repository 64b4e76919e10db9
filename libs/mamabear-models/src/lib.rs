//! Wire contracts for the mamabear v1 API
//!
//! Every response field is optional: the server omits what it does not
//! know, and callers only overwrite local state with what was sent.

pub mod models;
pub mod requests;

pub use models::*;
pub use requests::*;
