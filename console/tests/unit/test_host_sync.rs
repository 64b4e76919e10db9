//! Host handle tests

use http::Method;
use mamabear_console::errors::ConsoleError;
use mamabear_console::models::host::Host;
use mamabear_console::models::status::EntityStatus;
use mamabear_console::routes::Route;
use mamabear_console::sync::host::HostHandle;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use crate::support::{client, Reply};

#[tokio::test]
async fn test_no_hits_is_not_found() {
    let (api, transport) = client();
    transport.on(Method::GET, "/host", Reply::json(json!({"hits": [], "total": 0})));

    let mut handle = HostHandle::new(api, "h1");
    handle.host_mut().port = Some(2375);

    let err = assert_err!(handle.fetch().await);

    assert!(matches!(err, ConsoleError::NotFound(_)));
    assert_eq!(handle.status(), EntityStatus::Error);
    assert_eq!(handle.host().port, Some(2375));
    assert!(handle.host().alias.is_none());

    let gets = transport.requests_with(Method::GET);
    assert_eq!(gets[0].query, vec![("hostname".to_string(), "h1".to_string())]);
}

#[tokio::test]
async fn test_exact_match_wins() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({
            "hits": [
                {"hostname": "h10", "alias": "wrong"},
                {"hostname": "h1", "alias": "box", "port": 4243, "containers": [
                    {"id": "c1", "status": "up"}
                ]}
            ],
            "total": 2
        })),
    );

    let mut handle = HostHandle::new(api, "h1");
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.status(), EntityStatus::Ok);
    assert_eq!(handle.host().alias.as_deref(), Some("box"));
    assert_eq!(handle.host().port, Some(4243));
    assert_eq!(handle.host().up_containers(), 1);
}

#[tokio::test]
async fn test_create_and_delete() {
    let (api, transport) = client();
    transport.on(Method::POST, "/host", Reply::json(json!({"created": "h1"})));
    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({"hits": [{"hostname": "h1", "alias": "box"}]})),
    );
    transport.on(Method::DELETE, "/host/box", Reply::json(json!({"deleted": "box"})));

    let mut host = Host::new("h1");
    host.alias = Some("box".to_string());
    host.asg_name = Some("workers".to_string());
    let mut handle = HostHandle::from_host(api, host);

    assert_eq!(assert_ok!(handle.create().await), Route::Hosts);
    let posts = transport.requests_with(Method::POST);
    assert_eq!(
        posts[0].body,
        Some(json!({"host": {"hostname": "h1", "alias": "box", "asg_name": "workers"}}))
    );

    assert_eq!(assert_ok!(handle.delete().await), Route::Deployments);
    assert_eq!(transport.requests_with(Method::DELETE)[0].path, "/host/box");
}

#[tokio::test]
async fn test_refetch_with_null_port_clears_it() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({"hits": [{"hostname": "h1", "alias": "box", "port": 2375}]})),
    );

    let mut handle = HostHandle::new(api, "h1");
    assert_ok!(handle.fetch().await);
    assert_eq!(handle.host().port, Some(2375));

    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({"hits": [{"hostname": "h1", "port": null}]})),
    );
    assert_ok!(handle.fetch().await);

    assert_eq!(handle.host().port, None);
    assert_eq!(handle.host().alias.as_deref(), Some("box"));
}
