#![allow(clippy::unwrap_used, dead_code)]
// Shared fixtures for cartly-core integration tests.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::MockServer;

use cartly_api::CatalogClient;
use cartly_core::{Backoff, CoreError, Environment, RetryPolicy, Subtab, SubtabView};

/// Fast retries so wiremock-backed tests stay quick on the real clock.
pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Backoff::Fixed(Duration::from_millis(5)))
}

pub fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        Environment::Production,
    )
}

pub fn products_body() -> serde_json::Value {
    json!([
        {
            "id": "coins_large",
            "name": "Coin Chest",
            "price": 1999,
            "coins": 2500,
            "description": "A chest of coins",
            "features": [],
            "subscription": false
        },
        {
            "id": "sub_gold",
            "name": "Gold",
            "price": 900,
            "coins": 1200,
            "description": "Monthly gold tier",
            "features": ["+6% quarks"],
            "subscription": true,
            "quarkBonus": 6,
            "tier": 3
        },
        {
            "id": "coins_small",
            "name": "Coin Pouch",
            "price": 199,
            "coins": 200,
            "description": "A pouch of coins",
            "features": [],
            "subscription": false
        },
        {
            "id": "sub_bronze",
            "name": "Bronze",
            "price": 100,
            "coins": 120,
            "description": "Monthly bronze tier",
            "features": [],
            "subscription": true,
            "quarkBonus": 2,
            "tier": 1
        },
        {
            "id": "sub_silver",
            "name": "Silver",
            "price": 500,
            "coins": 600,
            "description": "Monthly silver tier",
            "features": [],
            "subscription": true,
            "quarkBonus": 4,
            "tier": 2
        }
    ])
}

pub fn upgrades_body() -> serde_json::Value {
    json!({
        "coins": 75,
        "upgrades": [
            {
                "upgradeId": 3,
                "maxLevel": 3,
                "name": "Multi-Level",
                "description": "Receive +6% Cubes per level",
                "internalName": "A",
                "level": 1,
                "cost": 100
            },
            {
                "upgradeId": 3,
                "maxLevel": 3,
                "name": "Multi-Level",
                "description": "Receive +6% Cubes per level",
                "internalName": "A",
                "level": 2,
                "cost": 150
            },
            {
                "upgradeId": 3,
                "maxLevel": 3,
                "name": "Multi-Level",
                "description": "Receive +6% Cubes per level",
                "internalName": "A",
                "level": 3,
                "cost": 200
            },
            {
                "upgradeId": 12,
                "maxLevel": 1,
                "name": "QOL",
                "description": "Auto-Potion No Longer Spends Potions When Consumed!",
                "internalName": "B",
                "level": 1,
                "cost": 500
            }
        ],
        "playerUpgrades": []
    })
}

// ── Recording view ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Highlight(Subtab),
    Clear(Subtab),
    Show(Subtab),
    Failed(Subtab),
}

/// A `SubtabView` that records every call in order.
#[derive(Default)]
pub struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<Subtab> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Show(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> Vec<Subtab> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ViewCall::Failed(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SubtabView for RecordingView {
    fn clear(&self, subtab: Subtab) {
        self.record(ViewCall::Clear(subtab));
    }

    fn show(&self, subtab: Subtab) {
        self.record(ViewCall::Show(subtab));
    }

    fn highlight(&self, active: Subtab) {
        self.record(ViewCall::Highlight(active));
    }

    fn fetch_failed(&self, subtab: Subtab, _error: &CoreError) {
        self.record(ViewCall::Failed(subtab));
    }
}
