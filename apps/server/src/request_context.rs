//! Per-request context injected by middleware.

#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Server-assigned id, also returned in `x-request-id`.
    pub request_id: String,
}
