use axum::{extract::State, Json};

use crate::database::AppState;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::model::{SearchQuery, SearchResult};
use crate::search;
use crate::validation::validate_search;

/// Searches offers for a route
///
/// # Response
///
/// - **200 OK** - Offers from the webhook, or generated offers marked with
///   `webhook_error` when the webhook cannot answer
/// - **400 Bad Request** - Missing fields, identical endpoints, inverted
///   date window, or zero containers
pub async fn search_routes(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, AppError> {
    validate_search(&query)?;
    let results = search::search(&state, &query).await?;
    Ok(Json(results))
}
