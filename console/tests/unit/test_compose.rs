//! Composition from raw server JSON

use mamabear_console::models::container::{Container, HostRef};
use mamabear_console::models::deployment::Deployment;
use mamabear_console::models::host::Host;
use mamabear_console::models::status::RunStatus;
use mamabear_models::{ContainerPayload, DeploymentPayload, HostPayload};
use serde_json::json;

#[test]
fn test_container_from_json() {
    let payload: ContainerPayload = serde_json::from_value(json!({
        "id": "c1",
        "image": {"id": "sha1", "tag": "v1"},
        "status": "up",
        "command": "run"
    }))
    .unwrap();

    let container = Container::compose(&payload, None);

    assert_eq!(container.id.as_deref(), Some("c1"));
    assert_eq!(container.image.hash.as_deref(), Some("sha1"));
    assert_eq!(container.image.tag.as_deref(), Some("v1"));
    assert_eq!(container.status, Some(RunStatus::Up));
    assert_eq!(container.command.as_deref(), Some("run"));
    assert!(container.host.is_none());
    assert!(container.is_up());
}

#[test]
fn test_null_clears_while_absent_keeps() {
    let full: ContainerPayload = serde_json::from_value(json!({
        "id": "c1",
        "image": {"id": "sha1", "tag": "v1"},
        "status": "up",
        "command": "run"
    }))
    .unwrap();
    let mut container = Container::compose(&full, None);

    let cleared: ContainerPayload = serde_json::from_value(json!({
        "image": null,
        "status": null
    }))
    .unwrap();
    container.apply(&cleared);

    assert_eq!(container.image.hash, None);
    assert_eq!(container.image.tag, None);
    assert_eq!(container.status, None);
    assert_eq!(container.command.as_deref(), Some("run"));
    assert_eq!(container.id.as_deref(), Some("c1"));
    assert!(!container.is_up());
}

#[test]
fn test_unknown_status_kept_verbatim() {
    let payload: ContainerPayload =
        serde_json::from_value(json!({"id": "c1", "status": "restarting"})).unwrap();

    let container = Container::compose(&payload, None);
    assert_eq!(container.status, Some(RunStatus::Other("restarting".to_string())));
    assert!(!container.is_up());
}

#[test]
fn test_host_containers_point_back_at_host() {
    let payload: HostPayload = serde_json::from_value(json!({
        "hostname": "h1",
        "alias": "box",
        "port": 2375,
        "status": "up",
        "containers": [
            {"id": "c1", "status": "up", "host": "elsewhere"},
            {"id": "c2", "status": "down"}
        ]
    }))
    .unwrap();

    let host = Host::compose(&payload);

    assert_eq!(host.hostname, "h1");
    assert_eq!(host.port, Some(2375));
    assert_eq!(host.containers.len(), 2);
    assert!(host
        .containers
        .iter()
        .all(|c| c.host == Some(HostRef("h1".to_string()))));
    assert_eq!(host.up_containers(), 1);
}

#[test]
fn test_deployment_from_json() {
    let payload: DeploymentPayload = serde_json::from_value(json!({
        "app_name": "web",
        "image_tag": "v1",
        "environment": "prod",
        "status_port": 8080,
        "mapped_ports": ["80:80"],
        "environment_variables": {"A": "1"},
        "hosts": ["h1", "h2"],
        "links": [{"app_name": "redis", "image_tag": "3.0"}],
        "parent": {"app_name": "web", "image_tag": "v0", "environment": "prod"}
    }))
    .unwrap();

    let deployment = Deployment::compose(&payload);

    assert_eq!(deployment.label(), "web:v1/prod");
    assert_eq!(deployment.status_port, Some(8080));
    assert_eq!(deployment.hostnames(), vec!["h1", "h2"]);
    assert_eq!(deployment.links, vec!["redis:3.0"]);
    assert_eq!(deployment.environment_variables.get("A").map(String::as_str), Some("1"));
    assert_eq!(
        deployment.parent.map(|p| p.to_string()),
        Some("web:v0/prod".to_string())
    );
    assert!(deployment.containers.is_empty());
}
