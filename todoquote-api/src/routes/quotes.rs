/// Quote endpoints
///
/// A quote belongs to the users linked to it in `user_quotes`. Creating a
/// quote links it to the caller; editing and deleting require that link.
///
/// # Endpoints
///
/// - `POST   /create-quote` - Create a quote linked to the caller
/// - `GET    /quotes/:user_id` - List the caller's quotes (own id only)
/// - `PUT    /quote/edit/:quote_id` - Edit a linked quote
/// - `DELETE /quote/delete/:quote_id` - Delete a linked quote

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    params::{RequestParams, ResourceId},
    response::{ApiResponse, MessageBody},
};
use axum::{extract::State, Extension};
use chrono::{DateTime, Utc};
use serde::Serialize;
use todoquote_shared::{
    auth::middleware::AuthContext,
    models::quote::{CreateQuote, Quote},
};

/// Quote as returned to clients
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub quote: String,
    pub quote_type: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            quote: quote.quote,
            quote_type: quote.quote_type,
            created_at: quote.created_at,
        }
    }
}

/// Older clients read the new id from `task_id`, so both keys carry it.
#[derive(Debug, Serialize)]
pub struct QuoteCreatedResponse {
    pub message: String,
    pub quote_id: i64,
    pub task_id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub quotes: Vec<QuoteResponse>,
}

fn quote_input(params: &RequestParams) -> ApiResult<CreateQuote> {
    let [quote, quote_type] = params.require(["quote", "quote_type"])?;
    Ok(CreateQuote { quote, quote_type })
}

/// Create a quote
///
/// Required fields: `quote`, `quote_type`. Answers 201.
pub async fn create_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    params: RequestParams,
) -> ApiResult<ApiResponse<QuoteCreatedResponse>> {
    let input = quote_input(&params)?;

    let quote = Quote::create(&state.db, auth.user_id, input).await?;
    tracing::info!(user_id = auth.user_id, quote_id = quote.id, "Quote created");

    Ok(ApiResponse::created(QuoteCreatedResponse {
        message: "Quote created successfully".to_string(),
        quote_id: quote.id,
        task_id: quote.id,
    }))
}

/// List the quotes linked to a user
///
/// Only the caller's own list is served; any other id is a 404.
pub async fn list_quotes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(user_id): ResourceId,
) -> ApiResult<ApiResponse<QuoteListResponse>> {
    if user_id != auth.user_id {
        return Err(ApiError::not_found());
    }

    let quotes = Quote::list_by_user(&state.db, user_id).await?;

    Ok(ApiResponse::ok(QuoteListResponse {
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
    }))
}

/// Edit a quote linked to the caller
///
/// Required fields: `quote`, `quote_type`.
pub async fn update_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(quote_id): ResourceId,
    params: RequestParams,
) -> ApiResult<ApiResponse<MessageBody>> {
    let input = quote_input(&params)?;

    if !Quote::update(&state.db, auth.user_id, quote_id, input).await? {
        return Err(ApiError::NotFound(
            "Quote failed to update. Please try again!".to_string(),
        ));
    }

    tracing::info!(user_id = auth.user_id, quote_id, "Quote updated");
    Ok(ApiResponse::ok(MessageBody::new("Quote updated successfully")))
}

/// Delete a quote linked to the caller
pub async fn delete_quote(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ResourceId(quote_id): ResourceId,
) -> ApiResult<ApiResponse<MessageBody>> {
    if !Quote::delete(&state.db, auth.user_id, quote_id).await? {
        return Err(ApiError::NotFound(
            "Quote failed to delete. Please try again!".to_string(),
        ));
    }

    tracing::info!(user_id = auth.user_id, quote_id, "Quote deleted");
    Ok(ApiResponse::ok(MessageBody::new("Quote deleted successfully")))
}
