//! Common test utilities and fixtures

#![allow(dead_code)]

use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use trade_bridge::server;
use trade_bridge::{BridgeService, FixedLotMultiplier, HedgeStateAggregator, TradeQueue};

/// A bridge running on an ephemeral loopback port
pub struct TestBridge {
    pub addr: SocketAddr,
    pub service: Arc<BridgeService>,
    pub client: reqwest::Client,
}

impl TestBridge {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn log_trade(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/log_trade"))
            .json(body)
            .send()
            .await
            .expect("log_trade request failed")
    }

    pub async fn log_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(self.url("/log_trade"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("log_trade request failed")
    }

    pub async fn get_trade(&self) -> Value {
        let response = self
            .client
            .get(self.url("/mt5/get_trade"))
            .send()
            .await
            .expect("get_trade request failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("get_trade body was not JSON")
    }

    pub async fn queue_size(&self) -> u64 {
        let body: Value = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .expect("health request failed")
            .json()
            .await
            .expect("health body was not JSON");
        body["queue_size"].as_u64().expect("queue_size missing")
    }
}

/// Start a bridge with the given queue capacity and a fixed lot multiplier
pub async fn spawn_bridge(capacity: usize, lot_multiplier: Decimal) -> TestBridge {
    let service = Arc::new(BridgeService::new(
        TradeQueue::with_capacity(capacity),
        HedgeStateAggregator::new(FixedLotMultiplier(lot_multiplier)),
    ));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    tokio::spawn(server::serve(
        listener,
        Arc::clone(&service),
        std::future::pending(),
    ));

    TestBridge {
        addr,
        service,
        client: reqwest::Client::new(),
    }
}

/// Single-contract trade body as the producer sends it
pub fn trade_json(id: &str, action: &str) -> Value {
    json!({
        "id": id,
        "base_id": id,
        "time": "2025-01-23T19:31:21.437Z",
        "action": action,
        "quantity": 1.0,
        "price": 22015.25,
        "total_quantity": 1,
        "contract_num": 1
    })
}

/// One contract of a multi-contract trade
pub fn contract_json(base_id: &str, action: &str, contract_num: i64, total: i64) -> Value {
    let mut body = trade_json(&format!("{base_id}_{contract_num}"), action);
    body["base_id"] = json!(base_id);
    body["contract_num"] = json!(contract_num);
    body["total_quantity"] = json!(total);
    body
}
