//! Client round trips against a server bound to an ephemeral port.

use estate_catalog::{InMemoryStore, NewProperty};
use estate_cli::{CatalogClient, ClientError, ListParams};
use estate_server::{api::create_router, config::StorageBackend, AppState, Config};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;

struct TestServer {
    client: CatalogClient,
    state: AppState,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.database.backend = StorageBackend::Memory;
        config.catalog.generator_seed = Some(7);

        let state = AppState::with_store(config, Arc::new(InMemoryStore::new()));
        let router = create_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let client = CatalogClient::new(&format!("http://{addr}/"))?;
        Ok(Self {
            client,
            state,
            handle,
        })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn seed_then_list_pages_by_name() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    assert_eq!(server.client.seed().await?.inserted, 3);
    assert_eq!(server.client.seed().await?.inserted, 0);

    let page = server
        .client
        .list(&ListParams {
            page_size: Some(2),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.total, 3);
    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Apto Centro", "Casa Norte"]);

    let filtered = server
        .client
        .list(&ListParams {
            name: Some("loft chico".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.items[0].price, Decimal::from(620_000_000));
    Ok(())
}

#[tokio::test]
async fn get_distinguishes_missing_from_malformed() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    let missing = server
        .client
        .get("00000000-0000-0000-0000-000000000000")
        .await?;
    assert!(missing.is_none());

    let malformed = server.client.get("not-an-id").await?;
    assert!(malformed.is_none());
    Ok(())
}

#[tokio::test]
async fn create_reports_field_errors() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    let err = server
        .client
        .create(&NewProperty {
            owner_id: "own-9".to_string(),
            price: Decimal::from(-1),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Validation(problem) => {
            assert_eq!(problem.status, 400);
            assert!(problem.errors.contains_key("Name"));
            assert!(problem.errors.contains_key("PriceProperty"));
            assert!(!problem.errors.contains_key("IdOwner"));
        }
        other => panic!("expected validation problem, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn create_returns_the_public_listing() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    let created = server
        .client
        .create(&NewProperty {
            owner_id: "own-9".to_string(),
            name: "Casa Río".to_string(),
            address: "Cl 5 #1-2, Cali".to_string(),
            price: "250000000.50".parse()?,
            image: "https://picsum.photos/seed/9/600/400".to_string(),
        })
        .await?;
    assert_eq!(created.name, "Casa Río");

    let page = server
        .client
        .list(&ListParams {
            name: Some("casa rio".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(page.items, vec![created]);
    Ok(())
}

#[tokio::test]
async fn generate_is_clamped_by_the_server() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    let generated = server.client.generate(Some(500)).await?;
    assert_eq!(generated.inserted, 50);
    assert_eq!(generated.items.len(), 50);

    let generated = server.client.generate(None).await?;
    assert_eq!(generated.inserted, 1);

    let page = server.client.list(&ListParams::default()).await?;
    assert_eq!(page.total, 51);
    Ok(())
}

#[tokio::test]
async fn cancelled_server_surfaces_api_error() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    server.state.shutdown.cancel();

    match server.client.seed().await.unwrap_err() {
        ClientError::Api { status, message } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(message, "Request cancelled");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    Ok(())
}
