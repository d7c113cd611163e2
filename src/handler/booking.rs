use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::{self, AppState, TABLE_BOOKINGS};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::model::{Booking, BookingRequest, BookingResponse, BookingStatus};
use crate::seed::is_known_delivery_term;
use crate::validation::{validate_booking, ValidationError};

/// Stores a booking request for the authenticated customer
///
/// # Response
///
/// - **201 Created** - `{"booking_id": "...", "status": "pending"}`
/// - **400 Bad Request** - Missing or malformed fields, unknown delivery term
/// - **401 Unauthorized** - No valid customer token
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    JsonBody(mut request): JsonBody<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    validate_booking(&request)?;
    if !is_known_delivery_term(&request.delivery_term) {
        return Err(ValidationError::UnknownDeliveryTerm(request.delivery_term).into());
    }
    request.delivery_term = request.delivery_term.trim().to_uppercase();

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        user_email: claims.sub,
        status: BookingStatus::Pending,
        created_at: Utc::now(),
        request,
    };
    database::put(&state.db, TABLE_BOOKINGS, &booking.id, &booking)?;

    tracing::info!(
        booking_id = %booking.id,
        route_id = %booking.request.route_id,
        documents = booking.request.documents.len(),
        "booking received"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            booking_id: booking.id,
            status: booking.status,
        }),
    ))
}
