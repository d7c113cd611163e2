//! Back office endpoints
//!
//! Every handler here sits behind `middleware::require_admin`.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::{self, AppState, TABLE_BOOKINGS, TABLE_CONTAINER_TYPES, TABLE_ROUTES};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::handler::catalog::sorted_container_types;
use crate::model::{Booking, ContainerType, MessageResponse, ShippingRoute, WebhookUrl};
use crate::search::{current_webhook_url, store_webhook_url};
use crate::validation::validate_route;

pub async fn list_container_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerType>>, AppError> {
    Ok(Json(sorted_container_types(&state)?))
}

/// Creates a container type; the id is generated when the body omits it
pub async fn create_container_type(
    State(state): State<AppState>,
    JsonBody(container): JsonBody<ContainerType>,
) -> Result<Json<ContainerType>, AppError> {
    require_container_name(&container)?;
    if !database::insert_new(&state.db, TABLE_CONTAINER_TYPES, &container.id, &container)? {
        return Err(AppError::BadRequest(
            "Container type already exists".to_string(),
        ));
    }

    tracing::info!(id = %container.id, name = %container.name, "container type created");
    Ok(Json(container))
}

/// Replaces a container type; the path id wins over any id in the body
pub async fn update_container_type(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(mut container): JsonBody<ContainerType>,
) -> Result<Json<ContainerType>, AppError> {
    require_container_name(&container)?;
    container.id = id;
    if !database::update(&state.db, TABLE_CONTAINER_TYPES, &container.id, &container)? {
        return Err(AppError::NotFound("Container type not found".to_string()));
    }
    Ok(Json(container))
}

fn require_container_name(container: &ContainerType) -> Result<(), AppError> {
    if container.name.trim().is_empty() {
        return Err(AppError::BadRequest("Container name is required".to_string()));
    }
    Ok(())
}

pub async fn delete_container_type(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !database::remove(&state.db, TABLE_CONTAINER_TYPES, &id)? {
        return Err(AppError::NotFound("Container type not found".to_string()));
    }
    tracing::info!(id = %id, "container type deleted");
    Ok(Json(MessageResponse::new("Container type deleted")))
}

/// Lists routes, oldest first
pub async fn list_routes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShippingRoute>>, AppError> {
    let mut routes: Vec<ShippingRoute> = database::list(&state.db, TABLE_ROUTES)?;
    routes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(Json(routes))
}

pub async fn create_route(
    State(state): State<AppState>,
    JsonBody(route): JsonBody<ShippingRoute>,
) -> Result<Json<ShippingRoute>, AppError> {
    validate_route(&route)?;
    if !database::insert_new(&state.db, TABLE_ROUTES, &route.id, &route)? {
        return Err(AppError::BadRequest("Route already exists".to_string()));
    }

    tracing::info!(
        id = %route.id,
        origin = %route.origin_port,
        destination = %route.destination_port,
        "route created"
    );
    Ok(Json(route))
}

pub async fn delete_route(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !database::remove(&state.db, TABLE_ROUTES, &id)? {
        return Err(AppError::NotFound("Route not found".to_string()));
    }
    tracing::info!(id = %id, "route deleted");
    Ok(Json(MessageResponse::new("Route deleted")))
}

pub async fn get_webhook(State(state): State<AppState>) -> Result<Json<WebhookUrl>, AppError> {
    Ok(Json(WebhookUrl {
        webhook_url: current_webhook_url(&state)?,
    }))
}

pub async fn update_webhook(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<WebhookUrl>,
) -> Result<Json<MessageResponse>, AppError> {
    if payload.webhook_url.trim().is_empty() {
        return Err(AppError::BadRequest("Webhook URL is required".to_string()));
    }

    let settings = store_webhook_url(&state, &payload.webhook_url)?;
    tracing::info!(webhook = %settings.webhook_url, "webhook URL updated");
    Ok(Json(MessageResponse::new("Webhook URL updated successfully")))
}

/// Lists submitted bookings, newest first
pub async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let mut bookings: Vec<Booking> = database::list(&state.db, TABLE_BOOKINGS)?;
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(bookings))
}
