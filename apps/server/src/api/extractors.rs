//! Custom Axum extractors.

use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use estate_catalog::CancellationToken;
use std::convert::Infallible;
use tokio_util::sync::DropGuard;

/// Cancellation scope of one request.
///
/// A child of the server's shutdown token that is also cancelled when the
/// handler future is dropped, e.g. because the client disconnected.
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestCancellation {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state.shutdown.child_token();
        let guard = token.clone().drop_guard();
        Ok(Self {
            token,
            _guard: guard,
        })
    }
}
