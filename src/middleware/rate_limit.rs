use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

/// Type alias for the public governor layer (IP-based rate limiting)
pub type PublicGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer for unauthenticated routes (per IP address)
/// - 100 requests per minute (one token every 600ms)
/// - Keeps login guessing slow
pub fn create_public_governor() -> Option<PublicGovernorLayer> {
    let config = GovernorConfigBuilder::default()
        .per_millisecond(600)
        .burst_size(100)
        .finish()?;

    Some(GovernorLayer::new(Arc::new(config)).error_handler(rate_limit_error_handler))
}

/// JSON body for rejected requests, same shape as `AppError`
pub fn rate_limit_error_handler(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => {
            tracing::warn!(wait_time, "RATE LIMITED - Request rejected due to too many requests");
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "code": "TOO_MANY_REQUESTS",
                    "message": format!("Too many requests, retry in {} seconds", wait_time),
                })),
            )
                .into_response()
        }
        other => {
            tracing::error!(error = ?other, "Rate limiter failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "code": "INTERNAL_SERVER_ERROR",
                    "message": "Rate limiter failed",
                })),
            )
                .into_response()
        }
    }
}
