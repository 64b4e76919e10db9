//! Mamabear Console Library
//!
//! Client-side domain model and synchronization for the mamabear
//! container-deployment API.

pub mod app;
pub mod errors;
pub mod http;
pub mod listing;
pub mod logs;
pub mod models;
pub mod routes;
pub mod storage;
pub mod sync;
pub mod utils;
