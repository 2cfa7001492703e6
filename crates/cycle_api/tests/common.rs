#![allow(dead_code)]

use cycle_api::{CycleHandler, GatewayRequest, GatewayResponse, Method};
use cycle_core::{ConnectionSource, DbResult, SqliteFileSource};
use rusqlite::Connection;
use serde_json::Value;
use std::cell::Cell;
use tempfile::TempDir;

/// File-backed source that counts acquisitions.
pub struct CountingSource {
    inner: SqliteFileSource,
    acquisitions: Cell<usize>,
}

impl CountingSource {
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.get()
    }

    /// Direct connection for seeding and inspection, not counted.
    pub fn raw(&self) -> Connection {
        self.inner.acquire().unwrap()
    }
}

impl ConnectionSource for CountingSource {
    fn acquire(&self) -> DbResult<Connection> {
        self.acquisitions.set(self.acquisitions.get() + 1);
        self.inner.acquire()
    }
}

pub struct Harness {
    _dir: TempDir,
    pub handler: CycleHandler<CountingSource>,
}

impl Harness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource {
            inner: SqliteFileSource::new(dir.path().join("cycle.db")),
            acquisitions: Cell::new(0),
        };
        Self {
            _dir: dir,
            handler: CycleHandler::new(source),
        }
    }

    pub fn acquisitions(&self) -> usize {
        self.handler.source().acquisitions()
    }

    pub fn raw(&self) -> Connection {
        self.handler.source().raw()
    }

    pub fn get(&self, action: &str, params: &[(&str, &str)]) -> GatewayResponse {
        let mut request = GatewayRequest::new(Method::Get).with_action(action);
        for (name, value) in params {
            request = request.with_query(name, *value);
        }
        self.handler.handle(&request)
    }

    pub fn post(&self, action: &str, body: Value) -> GatewayResponse {
        let request = GatewayRequest::new(Method::Post)
            .with_action(action)
            .with_body(body.to_string());
        self.handler.handle(&request)
    }

    pub fn create_user(&self, goals: &[&str]) -> i64 {
        let response = self.post(
            "create_user",
            serde_json::json!({
                "birth_year": 1995,
                "usage_mode": "self",
                "goals": goals,
            }),
        );
        assert_eq!(response.status_code, 200, "body: {}", response.body);
        body(&response)["user_id"].as_i64().unwrap()
    }
}

pub fn body(response: &GatewayResponse) -> Value {
    response
        .body_json()
        .unwrap_or_else(|| panic!("expected JSON body, got `{}`", response.body))
}
