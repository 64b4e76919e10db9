//! Domain entities composed from API payloads

pub mod app;
pub mod compound;
pub mod container;
pub mod deployment;
pub mod host;
pub mod image;
pub mod status;
