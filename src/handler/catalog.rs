use axum::{extract::State, Json};

use crate::database::{self, AppState, TABLE_CARGO_TYPES, TABLE_CONTAINER_TYPES, TABLE_PORTS};
use crate::error::AppError;
use crate::model::{CargoType, ContainerType, DeliveryTerm, MessageResponse, Port};
use crate::seed;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "CargoSearch API - container freight search platform",
    ))
}

/// Lists the station catalogue in catalogue order
///
/// # Response
///
/// ```json
/// [{"id": "...", "name": "Чэнду", "code": "CTU", "country": "Китай",
///   "city": "Чэнду", "transport_types": ["ЖД", "Авиа"]}]
/// ```
pub async fn list_ports(State(state): State<AppState>) -> Result<Json<Vec<Port>>, AppError> {
    let ports = database::list(&state.db, TABLE_PORTS)?;
    Ok(Json(ports))
}

pub async fn list_container_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContainerType>>, AppError> {
    Ok(Json(sorted_container_types(&state)?))
}

pub async fn list_cargo_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<CargoType>>, AppError> {
    let cargo_types = database::list(&state.db, TABLE_CARGO_TYPES)?;
    Ok(Json(cargo_types))
}

pub async fn list_delivery_terms() -> Json<Vec<DeliveryTerm>> {
    Json(seed::delivery_terms())
}

/// Container types ordered by name; ids are random so key order is not useful
pub(crate) fn sorted_container_types(state: &AppState) -> Result<Vec<ContainerType>, AppError> {
    let mut containers: Vec<ContainerType> = database::list(&state.db, TABLE_CONTAINER_TYPES)?;
    containers.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(containers)
}
