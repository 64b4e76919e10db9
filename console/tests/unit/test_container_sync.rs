//! Container handle tests

use http::Method;
use mamabear_console::models::container::HostRef;
use mamabear_console::models::status::{EntityStatus, RunStatus};
use mamabear_console::sync::container::{ContainerHandle, DEFAULT_LOG_TAIL};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use crate::support::{client, Reply};

#[tokio::test]
async fn test_fetch_populates_and_follows_host() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/container/c1",
        Reply::json(json!({
            "id": "c1",
            "image": {"id": "sha1", "tag": "v1"},
            "host": "h1",
            "status": "up",
            "started_at": "2015-03-01T10:00:00Z"
        })),
    );

    let mut handle = ContainerHandle::new(api, "c1");
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.status(), EntityStatus::Ok);
    assert_eq!(handle.container().host, Some(HostRef("h1".to_string())));
    assert_eq!(handle.container().status, Some(RunStatus::Up));
    assert!(handle.container().started_at.is_some());

    transport.on(
        Method::GET,
        "/container/c1",
        Reply::json(json!({"id": "c1", "host": "h2", "status": "down"})),
    );
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.container().host, Some(HostRef("h2".to_string())));
    assert_eq!(handle.container().image.tag.as_deref(), Some("v1"));
    assert!(!handle.container().is_up());
}

#[tokio::test]
async fn test_fetch_missing_container() {
    let (api, _transport) = client();

    let mut handle = ContainerHandle::new(api, "gone");
    let err = assert_err!(handle.fetch().await);

    assert!(err.is_not_found());
    assert_eq!(handle.status(), EntityStatus::Error);
    assert_eq!(handle.container().id.as_deref(), Some("gone"));
}

#[tokio::test]
async fn test_logs_sends_tail() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/container/c1/logs",
        Reply::json(json!(["starting", "listening on 80"])),
    );

    let handle = ContainerHandle::new(api, "c1");
    let text = assert_ok!(handle.logs(DEFAULT_LOG_TAIL).await);
    assert_eq!(text, "starting\nlistening on 80");

    transport.on(
        Method::GET,
        "/container/c1/logs",
        Reply::json(json!({"logs": "only line"})),
    );
    assert_eq!(assert_ok!(handle.logs(50).await), "only line");

    let gets = transport.requests_with(Method::GET);
    assert_eq!(gets[0].query, vec![("tail".to_string(), "10".to_string())]);
    assert_eq!(gets[1].query, vec![("tail".to_string(), "50".to_string())]);
}
