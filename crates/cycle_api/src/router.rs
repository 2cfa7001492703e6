//! Fixed dispatch table from `(method, action)` to a [`Route`].
//!
//! # Invariants
//! - `OPTIONS` is always pre-flight, whatever the action.
//! - Action names match case-sensitively; every other pair is rejected.
//! - The router holds no state and never touches storage.

use crate::request::{GatewayRequest, Method};

/// One supported action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    CreateUser,
    GetUser,
    AddCycle,
    GetCycles,
    SaveDailyNote,
    GetArticles,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::CreateUser,
        Route::GetUser,
        Route::AddCycle,
        Route::GetCycles,
        Route::SaveDailyNote,
        Route::GetArticles,
    ];

    pub fn resolve(method: Method, action: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|route| route.method() == method && route.action_name() == action)
    }

    pub fn method(self) -> Method {
        match self {
            Self::CreateUser | Self::AddCycle | Self::SaveDailyNote => Method::Post,
            Self::GetUser | Self::GetCycles | Self::GetArticles => Method::Get,
        }
    }

    pub fn action_name(self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::GetUser => "get_user",
            Self::AddCycle => "add_cycle",
            Self::GetCycles => "get_cycles",
            Self::SaveDailyNote => "save_daily_note",
            Self::GetArticles => "get_articles",
        }
    }

    pub fn is_write(self) -> bool {
        self.method() == Method::Post
    }
}

/// Outcome of classifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Preflight,
    Dispatch(Route),
    Rejected,
}

pub fn route(request: &GatewayRequest) -> RouteDecision {
    match request.method() {
        Some(Method::Options) => RouteDecision::Preflight,
        Some(method) => Route::resolve(method, request.action())
            .map_or(RouteDecision::Rejected, RouteDecision::Dispatch),
        None => RouteDecision::Rejected,
    }
}
