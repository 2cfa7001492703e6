//! Gateway-facing request handling for cycle tracking.
//!
//! # Responsibility
//! - Turn gateway invocation events into action calls against core storage.
//! - Shape every outcome into the uniform response envelope.
//!
//! # Invariants
//! - No state survives between requests.
//! - Handlers never panic on bad input; failures become error envelopes.

pub mod actions;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod input;
pub mod request;
pub mod router;

pub use config::{ConfigError, HandlerConfig};
pub use envelope::GatewayResponse;
pub use error::{ActionError, ActionResult};
pub use handler::CycleHandler;
pub use input::ActionInput;
pub use request::{GatewayRequest, Method, RequestContext};
pub use router::{route, Route, RouteDecision};
