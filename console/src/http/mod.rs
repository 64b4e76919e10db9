pub mod api;
pub mod apps;
pub mod client;
pub mod containers;
pub mod deployments;
pub mod hosts;
pub mod images;
