use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::error::{LedgerError, Result};
use crate::models::reservation::{
    CreateReservationRequest, ReservationDetailResponse, ReservationResponse,
    ReservationSearchRow, SearchQuery,
};
use crate::services::ledger::{self, NewReservation};
use crate::services::reservation_dates::parse_reservation_date;

pub async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>> {
    let reservations = ledger::list_reservations(&state.db).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ReservationDetailResponse>> {
    let (reservation, client) = ledger::find_reservation(&state.db, id).await?;

    Ok(Json(ReservationDetailResponse::new(reservation, client)))
}

pub async fn search_reservations(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ReservationSearchRow>>> {
    // No `q` at all searches for nothing; `q=` searches for everything
    let Some(q) = query.q else {
        return Ok(Json(Vec::new()));
    };
    let rows = ledger::search_reservations(&state.db, &q).await?;

    Ok(Json(
        rows.into_iter()
            .map(|(reservation, client)| ReservationSearchRow::new(reservation, &client))
            .collect(),
    ))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>)> {
    let from_date = parse_date("fromDate", &payload.from_date)?;
    let to_date = parse_date("toDate", &payload.to_date)?;

    let reservation = ledger::create_reservation(
        &state.db,
        NewReservation {
            client_id: payload.client_id,
            from_date,
            to_date,
            price: payload.price,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

fn parse_date(field: &str, raw: &str) -> Result<chrono::NaiveDateTime> {
    parse_reservation_date(raw)
        .ok_or_else(|| LedgerError::Validation(format!("Invalid {}: {}", field, raw)))
}
