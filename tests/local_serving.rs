//! Requests no rule claims are served from the static root.

use std::fs;

use axum::http::StatusCode;
use dev_router::RouterConfig;

mod common;

fn site_config(name: &str, backend_origin: &str) -> RouterConfig {
    let root = common::temp_site(name);
    fs::write(root.join("index.html"), "<!doctype html><div id=app></div>").unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets").join("app.js"), "console.log('erp')").unwrap();

    let mut config = common::default_config_for(backend_origin);
    config.static_files.root = Some(root);
    config
}

#[tokio::test]
async fn serves_files_from_root() {
    let backend = common::start_echo_backend().await;
    let (addr, shutdown) = common::start_router(site_config("files", &backend.origin())).await;

    let res = common::client()
        .get(format!("http://{}/assets/app.js", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "console.log('erp')");
    assert_eq!(backend.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn root_serves_index() {
    let backend = common::start_echo_backend().await;
    let (addr, shutdown) = common::start_router(site_config("index", &backend.origin())).await;

    let res = common::client().get(format!("http://{}/", addr)).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("id=app"));

    shutdown.trigger();
}

#[tokio::test]
async fn html_navigation_falls_back_to_index() {
    let backend = common::start_echo_backend().await;
    let (addr, shutdown) = common::start_router(site_config("fallback", &backend.origin())).await;

    let res = common::client()
        .get(format!("http://{}/engineering/drawings", addr))
        .header("accept", "text/html,application/xhtml+xml")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("id=app"));
    assert_eq!(backend.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn missing_asset_is_404() {
    let backend = common::start_echo_backend().await;
    let (addr, shutdown) = common::start_router(site_config("missing", &backend.origin())).await;

    let res = common::client()
        .get(format!("http://{}/static/logo.png", addr))
        .header("accept", "image/png")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(backend.hits(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn fallback_can_be_disabled() {
    let backend = common::start_echo_backend().await;
    let mut config = site_config("no-fallback", &backend.origin());
    config.static_files.html_fallback = false;
    let (addr, shutdown) = common::start_router(config).await;

    let res = common::client()
        .get(format!("http://{}/engineering/drawings", addr))
        .header("accept", "text/html")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    shutdown.trigger();
}

#[tokio::test]
async fn backend_prefixes_win_over_static_files() {
    let backend = common::start_echo_backend().await;
    let config = site_config("prefix-wins", &backend.origin());
    let root = config.static_files.root.clone().unwrap();
    fs::create_dir_all(root.join("api")).unwrap();
    fs::write(root.join("api").join("users"), "stale local copy").unwrap();
    let (addr, shutdown) = common::start_router(config).await;

    let res = common::client()
        .get(format!("http://{}/api/users", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(backend.hits(), 1);

    shutdown.trigger();
}
