use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{clients, reservations};
use crate::services::reservation_dates::day_count;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub client_id: i32,
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]`
    pub from_date: String,
    pub to_date: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i32,
    pub client_id: i32,
    pub from_date: NaiveDateTime,
    pub to_date: NaiveDateTime,
    pub price: Decimal,
}

impl From<reservations::Model> for ReservationResponse {
    fn from(model: reservations::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            from_date: model.from_date,
            to_date: model.to_date,
            price: model.price,
        }
    }
}

/// Everything the desktop shell prints on a reservation ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetailResponse {
    pub id: i32,
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub client_name: String,
    pub phone_number: String,
    pub from_date: NaiveDateTime,
    pub to_date: NaiveDateTime,
    pub price: Decimal,
    pub day_count: i64,
}

impl ReservationDetailResponse {
    pub fn new(reservation: reservations::Model, client: clients::Model) -> Self {
        Self {
            id: reservation.id,
            client_id: reservation.client_id,
            client_name: full_name(&client),
            first_name: client.first_name,
            last_name: client.last_name,
            phone_number: client.phone_number,
            day_count: day_count(reservation.from_date, reservation.to_date),
            from_date: reservation.from_date,
            to_date: reservation.to_date,
            price: reservation.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSearchRow {
    pub id: i32,
    pub client_name: String,
    pub from_date: NaiveDateTime,
    pub to_date: NaiveDateTime,
    pub price: Decimal,
    pub client_number: String,
}

impl ReservationSearchRow {
    pub fn new(reservation: reservations::Model, client: &clients::Model) -> Self {
        Self {
            id: reservation.id,
            client_name: full_name(client),
            from_date: reservation.from_date,
            to_date: reservation.to_date,
            price: reservation.price,
            client_number: client.phone_number.clone(),
        }
    }
}

fn full_name(client: &clients::Model) -> String {
    format!("{} {}", client.first_name, client.last_name)
}
