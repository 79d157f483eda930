#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cartly_api::{CatalogClient, Endpoint, Environment, Error, Product, UpgradesResponse, decode_body};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(environment: Environment) -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CatalogClient::with_client(reqwest::Client::new(), base_url, environment);
    (server, client)
}

fn products_body() -> serde_json::Value {
    json!([
        {
            "id": "coins_1",
            "name": "Coin Pouch",
            "price": 199,
            "coins": 200,
            "description": "A pouch of coins",
            "features": ["200 coins"],
            "subscription": false
        },
        {
            "id": "sub_1",
            "name": "Bronze",
            "price": 300,
            "coins": 350,
            "description": "Monthly bronze tier",
            "features": ["+2% quarks"],
            "subscription": true,
            "quarkBonus": 2,
            "tier": 1
        }
    ])
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_products_production_path() {
    let (server, client) = setup(Environment::Production).await;

    Mock::given(method("GET"))
        .and(path("/stripe/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .mount(&server)
        .await;

    let body = client.fetch_body(Endpoint::Products).await.unwrap();
    let products: Vec<Product> = decode_body(&body).unwrap();

    assert_eq!(products.len(), 2);
    assert!(!products[0].is_subscription());
    assert_eq!(products[0].id(), "coins_1");
    match &products[1] {
        Product::Subscription(sub) => assert_eq!(sub.tier, 1),
        Product::Regular(_) => panic!("expected subscription"),
    }
}

#[tokio::test]
async fn test_products_test_environment_path() {
    let (server, client) = setup(Environment::Test).await;

    Mock::given(method("GET"))
        .and(path("/stripe/test/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let body = client.fetch_body(Endpoint::Products).await.unwrap();
    let products: Vec<Product> = decode_body(&body).unwrap();
    assert!(products.is_empty());
}

// ── Upgrades ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upgrades_path_and_shape() {
    let (server, client) = setup(Environment::Production).await;

    let payload = json!({
        "coins": 250,
        "upgrades": [
            {
                "upgradeId": 1,
                "maxLevel": 1,
                "name": "Instant Unlock",
                "description": "Instantly unlocks the Plastic Talisman in the shop!",
                "internalName": "INSTANT_UNLOCK_1",
                "level": 1,
                "cost": 400
            },
            {
                "upgradeId": 13,
                "maxLevel": 2,
                "name": "QOL",
                "description": "Increase the Offline Timer Cap by 100% per level!",
                "internalName": "OFFLINE_TIMER_CAP_BUFF",
                "level": 2,
                "cost": 600
            }
        ],
        "playerUpgrades": []
    });

    Mock::given(method("GET"))
        .and(path("/stripe/upgrades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&payload))
        .mount(&server)
        .await;

    let body = client.fetch_body(Endpoint::Upgrades).await.unwrap();
    let upgrades: UpgradesResponse = decode_body(&body).unwrap();

    assert_eq!(upgrades.coins, 250);
    assert_eq!(upgrades.upgrades.len(), 2);
    assert_eq!(upgrades.upgrades[1].internal_name, "OFFLINE_TIMER_CAP_BUFF");
    assert_eq!(upgrades.upgrades[1].max_level, 2);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_is_bad_status() {
    let (server, client) = setup(Environment::Production).await;

    Mock::given(method("GET"))
        .and(path("/stripe/upgrades"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal server error"))
        .mount(&server)
        .await;

    let result = client.fetch_body(Endpoint::Upgrades).await;

    match result {
        Err(Error::BadStatus {
            status,
            ref body_preview,
            ..
        }) => {
            assert_eq!(status, 500);
            assert!(body_preview.contains("internal server error"));
        }
        other => panic!("expected BadStatus error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup(Environment::Production).await;

    Mock::given(method("GET"))
        .and(path("/stripe/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let body = client.fetch_body(Endpoint::Products).await.unwrap();
    let result = decode_body::<Vec<Product>>(&body);

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "<html>maintenance</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Grab a free port, then release it so nothing listens there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

    let client =
        CatalogClient::with_client(reqwest::Client::new(), base_url, Environment::Production);
    let result = client.fetch_body(Endpoint::Products).await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
