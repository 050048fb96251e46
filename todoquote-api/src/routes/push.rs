/// Quote broadcast endpoint
///
/// `GET /push-quote` picks a random quote and sends it to every device that
/// registered for notifications. Delivery is fire-and-forget: a gateway
/// failure is logged and reported as `"delivered": false`, the request
/// itself still succeeds.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    response::ApiResponse,
};
use axum::extract::State;
use serde::Serialize;
use todoquote_shared::models::{quote::Quote, user::User};

use super::quotes::QuoteResponse;

#[derive(Debug, Serialize)]
pub struct PushQuoteResponse {
    pub message: String,
    pub quote: QuoteResponse,

    /// Registration ids the broadcast was addressed to
    pub recipients: usize,

    pub delivered: bool,
}

/// Broadcast a random quote
///
/// # Response
///
/// ```json
/// {
///   "error": false,
///   "message": "Quote pushed successfully",
///   "quote": { "id": 3, "quote": "Stay hungry", "quote_type": "motivation", "createdAt": "..." },
///   "recipients": 12,
///   "delivered": true
/// }
/// ```
///
/// 404 when there is no quote at all.
pub async fn push_quote(State(state): State<AppState>) -> ApiResult<ApiResponse<PushQuoteResponse>> {
    let quote = Quote::random(&state.db)
        .await?
        .ok_or_else(|| ApiError::NotFound("No quotes available to push".to_string()))?;

    let registration_ids = User::list_push_registration_ids(&state.db).await?;
    let recipients = registration_ids.len();

    let (message, delivered) = match state.push.broadcast(&quote.quote, &registration_ids).await {
        Ok(report) => {
            tracing::info!(
                quote_id = quote.id,
                recipients,
                failure = report.failure,
                "Quote pushed"
            );
            ("Quote pushed successfully", true)
        }
        Err(e) => {
            tracing::warn!(quote_id = quote.id, recipients, error = %e, "Quote push failed");
            ("Quote selected but push delivery failed", false)
        }
    };

    Ok(ApiResponse::ok(PushQuoteResponse {
        message: message.to_string(),
        quote: QuoteResponse::from(quote),
        recipients,
        delivered,
    }))
}
