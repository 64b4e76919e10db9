//! Integration tests for the mamabear console

mod support;
mod test_compose;
mod test_container_sync;
mod test_deployment_sync;
mod test_host_sync;
mod test_listing;
