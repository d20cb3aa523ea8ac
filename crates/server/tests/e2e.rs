use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use server::startup::{build_app, serve};

struct TestApp {
    base_url: String,
}

fn fixture_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.dataset.csv_path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder.csv").into();
    cfg
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = build_app(&fixture_config()).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_health_and_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let health: Value = res.json().await?;
    assert_eq!(health, serde_json::json!({"status": "Ready"}));

    let res = client
        .get(format!("{}/api/gapminder", app.base_url))
        .header("Origin", "http://localhost:3000")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    let rows: Vec<Value> = res.json().await?;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["country"], "Algeria");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_reads_agree() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/gapminder", app.base_url);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let (client, url) = (client.clone(), url.clone());
            tokio::spawn(async move { client.get(url).send().await?.json::<Value>().await })
        })
        .collect();

    let mut bodies = Vec::new();
    for handle in handles {
        bodies.push(handle.await??);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    Ok(())
}

#[tokio::test]
async fn serve_stops_on_shutdown_signal() -> anyhow::Result<()> {
    let mut cfg = fixture_config();
    cfg.server.port = {
        // grab a free port, then release it for `serve` to bind
        let probe = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        probe.local_addr()?.port()
    };
    let (tx, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(serve(cfg, async move {
        let _ = rx.await;
    }));

    tx.send(()).ok();
    tokio::time::timeout(std::time::Duration::from_secs(5), task).await???;
    Ok(())
}
