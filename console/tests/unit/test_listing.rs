//! Listing adapter tests

use http::Method;
use mamabear_console::listing::sources::{
    app_names, host_names, AppSource, DeploymentSource, HostSource, ImageSource,
};
use mamabear_console::listing::{query, ListQuery, SortOrder};
use serde_json::json;
use tokio_test::assert_ok;

use crate::support::{client, Reply};

fn param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[tokio::test]
async fn test_deployment_page_params_and_rows() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/deployment",
        Reply::json(json!({
            "hits": [{
                "app_name": "web",
                "image_tag": "v1",
                "environment": "prod",
                "hosts": ["h1"],
                "containers": [{"id": "a", "status": "up"}, {"id": "b", "status": "down"}]
            }],
            "total": 25
        })),
    );

    let list = ListQuery::new(2, 10)
        .with_search("we")
        .with_order(SortOrder::Desc)
        .with_sort_field("app_name");
    let page = assert_ok!(query::<DeploymentSource>(&api, &list).await);

    let gets = transport.requests_with(Method::GET);
    let sent = &gets[0].query;
    assert_eq!(param(sent, "limit"), Some("10"));
    assert_eq!(param(sent, "offset"), Some("20"));
    assert_eq!(param(sent, "order"), Some("desc"));
    assert_eq!(param(sent, "sort_field"), Some("app_name"));
    assert_eq!(param(sent, "app_name"), Some("we"));

    assert_eq!(page.total, 25);
    assert_eq!(page.pages, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].deployment, "web:v1/prod");
    assert_eq!(page.items[0].up_containers, 1);
}

#[tokio::test]
async fn test_blank_search_omitted_and_empty_total_has_one_page() {
    let (api, transport) = client();
    transport.on(Method::GET, "/app", Reply::json(json!({"hits": [], "total": 0})));

    let list = ListQuery::default().with_search("  ");
    let page = assert_ok!(query::<AppSource>(&api, &list).await);

    let gets = transport.requests_with(Method::GET);
    let sent = &gets[0].query;
    assert!(param(sent, "name").is_none());
    assert_eq!(param(sent, "offset"), Some("0"));
    assert!(page.is_empty());
    assert_eq!(page.pages, 1);
}

#[tokio::test]
async fn test_host_search_uses_hostname() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({
            "hits": [{"hostname": "docker-1", "port": 2375, "status": "up", "containers": [
                {"id": "a", "status": "up"},
                {"id": "b", "status": "exited"}
            ]}],
            "total": 1
        })),
    );

    let list = ListQuery::new(0, 5).with_search("docker");
    let page = assert_ok!(query::<HostSource>(&api, &list).await);

    let gets = transport.requests_with(Method::GET);
    assert_eq!(param(&gets[0].query, "hostname"), Some("docker"));
    assert_eq!(param(&gets[0].query, "limit"), Some("5"));

    assert!(!page.is_empty());
    assert_eq!(page.items[0].hostname, "docker-1");
    assert_eq!(page.items[0].status.as_deref(), Some("up"));
    assert_eq!(page.items[0].container_count, Some(2));
    assert_eq!(page.items[0].up_containers, Some(1));
}

#[tokio::test]
async fn test_image_search_uses_app_name() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/image",
        Reply::json(json!({
            "hits": [
                {"id": "sha1", "tag": "v1", "app_name": "web"},
                {"id": "sha2", "tag": "v2", "app_name": "web"}
            ],
            "total": 12
        })),
    );

    let list = ListQuery::new(1, 2).with_search("web");
    let page = assert_ok!(query::<ImageSource>(&api, &list).await);

    let gets = transport.requests_with(Method::GET);
    assert_eq!(param(&gets[0].query, "app_name"), Some("web"));
    assert_eq!(param(&gets[0].query, "offset"), Some("2"));

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].hash.as_deref(), Some("sha2"));
    assert_eq!(page.page, 1);
    assert_eq!(page.pages, 6);
}

#[tokio::test]
async fn test_picker_names() {
    let (api, transport) = client();
    transport.on(
        Method::GET,
        "/app",
        Reply::json(json!({"hits": ["web", {"name": "api"}, {"image_count": 1}], "total": 3})),
    );
    transport.on(
        Method::GET,
        "/host",
        Reply::json(json!({
            "hits": [{"hostname": "h1"}, {"alias": "nameless"}, {"hostname": "h2"}]
        })),
    );

    assert_eq!(assert_ok!(app_names(&api).await), vec!["web", "api"]);
    assert_eq!(assert_ok!(host_names(&api).await), vec!["h1", "h2"]);

    let gets = transport.requests_with(Method::GET);
    assert!(gets.iter().all(|request| request.query.is_empty()));
}
