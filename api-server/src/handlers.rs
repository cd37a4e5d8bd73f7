use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};

use crate::models::{
    ApiError, ApiResponse, BookRequest, BookingResult, FloorPlan, PreviewQuery, RoomResponse,
    RoomsResponse,
};
use crate::service::ReservationService;

pub async fn list_rooms(State(service): State<ReservationService>) -> Json<Vec<RoomResponse>> {
    let rooms = service
        .available_rooms()
        .await
        .into_iter()
        .map(|room_number| RoomResponse { room_number })
        .collect();
    Json(rooms)
}

pub async fn book(
    State(service): State<ReservationService>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<RoomsResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        tracing::warn!(error = %rejection, "malformed booking request");
    })?;

    match service.book(request.count).await {
        Ok(booking) => Ok(Json(RoomsResponse {
            rooms: booking.rooms,
        })),
        Err(err) => {
            tracing::warn!(count = request.count, error = %err, "booking rejected");
            Err(err.into())
        }
    }
}

pub async fn preview(
    State(service): State<ReservationService>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> Json<RoomsResponse> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    let rooms = match query.count() {
        Some(count) => service.preview(count).await,
        None => Vec::new(),
    };
    Json(RoomsResponse { rooms })
}

pub async fn reset(State(service): State<ReservationService>) -> Json<ApiResponse<()>> {
    service.reset().await;
    Json(ApiResponse::ok(None, "All bookings cleared"))
}

pub async fn random(State(service): State<ReservationService>) -> Json<ApiResponse<()>> {
    let occupied = service.randomize().await;
    Json(ApiResponse::ok(
        None,
        format!("Occupancy randomized: {} rooms occupied", occupied),
    ))
}

pub async fn latest_booking(
    State(service): State<ReservationService>,
) -> Json<ApiResponse<BookingResult>> {
    match service.latest_booking().await {
        Some(booking) => Json(ApiResponse::ok(Some(booking), "Latest booking retrieved")),
        None => Json(ApiResponse::ok(None, "No booking since last reset")),
    }
}

pub async fn layout(State(service): State<ReservationService>) -> Json<Vec<FloorPlan>> {
    Json(service.floor_plan().await)
}

pub async fn health() -> &'static str {
    "ok"
}
