//! Deployment handle tests

use http::Method;
use mamabear_console::errors::ConsoleError;
use mamabear_console::models::deployment::{Deployment, DeploymentKey};
use mamabear_console::models::status::EntityStatus;
use mamabear_console::routes::Route;
use mamabear_console::sync::deployment::DeploymentHandle;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use crate::support::{client, Reply};

const PATH: &str = "/deployment/web/v1/prod";

fn key() -> DeploymentKey {
    DeploymentKey::new("web", "v1", "prod")
}

fn ok() -> Reply {
    Reply::json(json!({"updated": true}))
}

#[tokio::test]
async fn test_add_port_sends_single_field() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert!(assert_ok!(handle.add_mapped_port("8080:80").await));

    let puts = transport.requests_with(Method::PUT);
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].path, PATH);
    assert_eq!(
        puts[0].body,
        Some(json!({"deployment": {"mapped_ports": ["8080:80"]}}))
    );
    assert_eq!(handle.deployment().mapped_ports, vec!["8080:80"]);
}

#[tokio::test]
async fn test_bulk_ports_sent_deduplicated() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.add_mapped_ports("80:80, 80:80,443:443,").await);

    let puts = transport.requests_with(Method::PUT);
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].body,
        Some(json!({"deployment": {"mapped_ports": ["80:80", "443:443"]}}))
    );
}

#[tokio::test]
async fn test_links_without_separator_not_sent() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert!(!assert_ok!(handle.add_link("redis").await));
    assert!(transport.requests().is_empty());

    assert!(assert_ok!(handle.add_link("redis:3.0").await));

    let puts = transport.requests_with(Method::PUT);
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].body,
        Some(json!({"deployment": {"links": [{"app_name": "redis", "image_tag": "3.0"}]}}))
    );
    assert_eq!(handle.deployment().links, vec!["redis", "redis:3.0"]);
}

#[tokio::test]
async fn test_duplicate_port_not_resent() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert!(assert_ok!(handle.add_mapped_port("80:80").await));
    assert!(!assert_ok!(handle.add_mapped_port("80:80").await));

    assert_eq!(transport.requests_with(Method::PUT).len(), 1);
}

#[tokio::test]
async fn test_env_bulk_add_is_idempotent() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert!(assert_ok!(handle.add_env_vars("A=1, B = 2,A=3,broken").await));
    assert!(!assert_ok!(handle.add_env_vars("A=1, B = 2,A=3,broken").await));

    let puts = transport.requests_with(Method::PUT);
    assert_eq!(puts.len(), 1);
    assert_eq!(
        puts[0].body,
        Some(json!({"deployment": {"environment_variables": {"A": "3", "B": "2"}}}))
    );
}

#[tokio::test]
async fn test_failed_update_rolls_back() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.add_mapped_volume("/data:/data").await);

    transport.on(Method::PUT, PATH, Reply::Status(500));
    assert_err!(handle.add_mapped_volume("/logs:/logs").await);
    assert_err!(handle.remove_mapped_volume("/data:/data").await);

    assert_eq!(handle.deployment().mapped_volumes, vec!["/data:/data"]);
    assert_eq!(transport.requests_with(Method::PUT).len(), 3);
}

#[tokio::test]
async fn test_incomplete_key_never_hits_server() {
    let (api, transport) = client();

    let mut handle = DeploymentHandle::new(api, DeploymentKey::new("web", "", "prod"));
    assert_err!(handle.add_mapped_port("80:80").await);

    assert!(handle.deployment().mapped_ports.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_hosts_replaced_and_removed() {
    let (api, transport) = client();
    transport.on(Method::PUT, PATH, ok());

    let mut handle = DeploymentHandle::new(api, key());
    let hosts = vec!["h1".to_string(), "h2".to_string()];
    assert!(assert_ok!(handle.replace_hosts(&hosts).await));
    assert!(!assert_ok!(handle.replace_hosts(&hosts).await));
    assert!(!assert_ok!(handle.add_host("h1").await));
    assert!(assert_ok!(handle.remove_host("h1").await));

    let puts = transport.requests_with(Method::PUT);
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[1].body, Some(json!({"deployment": {"hosts": ["h2"]}})));
}

#[tokio::test]
async fn test_fetch_rebuilds_containers() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        PATH,
        Reply::json(json!({
            "app_name": "web",
            "image_tag": "v1",
            "environment": "prod",
            "containers": [{"id": "a", "status": "up"}, {"id": "b", "status": "down"}]
        })),
    );

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.fetch().await);
    assert_eq!(handle.deployment().containers.len(), 2);

    transport.on(
        Method::GET,
        PATH,
        Reply::json(json!({"containers": [{"id": "c", "status": "up"}]})),
    );
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.status(), EntityStatus::Ok);
    assert_eq!(handle.deployment().containers.len(), 1);
    assert_eq!(handle.deployment().containers[0].id.as_deref(), Some("c"));
    assert_eq!(handle.deployment().up_containers(), 1);
}

#[tokio::test]
async fn test_create_posts_under_app() {
    let (api, transport) = client();
    transport.on(Method::POST, "/app/web/deployments", Reply::json(json!({"created": "web"})));
    transport.on(Method::GET, PATH, Reply::json(json!({"app_name": "web"})));

    let mut deployment = Deployment::new(key());
    deployment.mapped_ports.push("80:80".to_string());
    let mut handle = DeploymentHandle::from_deployment(api, deployment);

    let route = assert_ok!(handle.create().await);
    assert_eq!(route, Route::Deployments);

    let posts = transport.requests_with(Method::POST);
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].body,
        Some(json!({"deployment": {
            "app_name": "web",
            "image_tag": "v1",
            "environment": "prod",
            "hosts": [],
            "mapped_ports": ["80:80"]
        }}))
    );
}

#[tokio::test]
async fn test_set_app_name_loads_image_choices() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/app/api/images",
        Reply::json(json!({"api": {"images": [{"id": "x", "tag": "v7"}, {"id": "y"}]}})),
    );

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.set_app_name("api").await);

    assert_eq!(handle.deployment().key.app_name, "api");
    assert_eq!(handle.image_choices(), ["v7".to_string()]);
}

#[tokio::test]
async fn test_fetch_null_clears_status_endpoint() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        PATH,
        Reply::json(json!({"status_endpoint": "/health", "status_port": 8080})),
    );

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.fetch().await);
    assert_eq!(handle.deployment().status_endpoint.as_deref(), Some("/health"));

    transport.on(Method::GET, PATH, Reply::json(json!({"status_endpoint": null})));
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.deployment().status_endpoint, None);
    assert_eq!(handle.deployment().status_port, Some(8080));
}

#[tokio::test]
async fn test_run_applies_echo() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/deployment/web/v1/prod/run",
        Reply::json(json!({
            "app_name": "web",
            "image_tag": "v1",
            "environment": "prod",
            "containers": [{"id": "fresh", "status": "up"}]
        })),
    );

    let mut handle = DeploymentHandle::new(api, key());
    assert_ok!(handle.run().await);

    assert_eq!(handle.deployment().containers.len(), 1);
    assert_eq!(handle.deployment().containers[0].id.as_deref(), Some("fresh"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_delete_returns_to_list() {
    let (api, transport) = client();
    transport.on(Method::DELETE, PATH, Reply::json(json!({"deleted": true})));

    let mut handle = DeploymentHandle::new(api, key());
    assert_eq!(assert_ok!(handle.delete().await), Route::Deployments);

    let deletes = transport.requests_with(Method::DELETE);
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].path, PATH);
}

#[tokio::test]
async fn test_create_rejects_unknown_environment() {
    let (api, transport) = client();

    let mut handle = DeploymentHandle::new(api, DeploymentKey::new("web", "v1", "staging"));
    let err = assert_err!(handle.create().await);

    assert!(matches!(err, ConsoleError::ValidationError(_)));
    assert_eq!(handle.status(), EntityStatus::New);
    assert!(transport.requests().is_empty());
}
