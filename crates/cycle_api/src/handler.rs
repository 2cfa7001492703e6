//! Request entry point: route, decode, run, and wrap into an envelope.
//!
//! # Responsibility
//! - Classify each request and answer pre-flight without storage access.
//! - Acquire one connection per dispatched action and release it on every
//!   path before the envelope is returned.
//! - Emit one start and one finish log event per request.
//!
//! # Invariants
//! - Every outcome, including failures, becomes a [`GatewayResponse`].
//! - Inputs are validated before a connection is acquired.

use crate::actions;
use crate::config::HandlerConfig;
use crate::envelope::GatewayResponse;
use crate::error::{ActionError, ActionResult};
use crate::input::ActionInput;
use crate::request::GatewayRequest;
use crate::router::{route, Route, RouteDecision};
use cycle_core::logging::sanitize_message;
use cycle_core::{ConnectionSource, SqliteFileSource};
use log::{info, warn};
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

const MAX_LOGGED_ACTION_CHARS: usize = 64;

/// Stateless handler over a connection source.
pub struct CycleHandler<S: ConnectionSource> {
    source: S,
}

impl CycleHandler<SqliteFileSource> {
    pub fn from_config(config: &HandlerConfig) -> Self {
        Self::new(config.connection_source())
    }
}

impl<S: ConnectionSource> CycleHandler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Handles one gateway request.
    pub fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        let started_at = Instant::now();
        let request_id = request
            .request_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let method = sanitize_message(request.method_text(), MAX_LOGGED_ACTION_CHARS);
        let action = sanitize_message(request.action(), MAX_LOGGED_ACTION_CHARS);
        info!(
            "event=request module=handler status=start request_id={request_id} method={method} action={action}"
        );

        let outcome = match route(request) {
            RouteDecision::Preflight => Ok(None),
            RouteDecision::Rejected => Err(ActionError::InvalidAction),
            RouteDecision::Dispatch(route) => self.dispatch(route, request).map(Some),
        };

        let response = match &outcome {
            Ok(None) => GatewayResponse::preflight(),
            Ok(Some(payload)) => GatewayResponse::ok(payload),
            Err(err) => GatewayResponse::from_error(err),
        };

        let duration_ms = started_at.elapsed().as_millis();
        match outcome {
            Ok(_) => info!(
                "event=request module=handler status=ok request_id={request_id} action={action} http_status={} duration_ms={duration_ms}",
                response.status_code
            ),
            Err(err) => warn!(
                "event=request module=handler status=error request_id={request_id} action={action} http_status={} duration_ms={duration_ms} error_code={}",
                response.status_code,
                err.code()
            ),
        }

        response
    }

    fn dispatch(&self, route: Route, request: &GatewayRequest) -> ActionResult<Value> {
        let input = ActionInput::from_request(route, request)?;
        let mut conn = self.source.acquire()?;
        let result = actions::execute(input, &mut conn);
        // Released here on success and failure alike; an open transaction
        // has already been committed or rolled back by its repository.
        drop(conn);
        result
    }
}
