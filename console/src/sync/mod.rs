//! Synchronization between local entities and the server
//!
//! Each handle owns one entity for the lifetime of a view. Reads overwrite
//! only the fields the server sent; writes are optimistic and roll the
//! local change back when the server rejects it. Failures are logged where
//! they happen and returned, never panicked on.

pub mod app;
pub mod container;
pub mod deployment;
pub mod host;
