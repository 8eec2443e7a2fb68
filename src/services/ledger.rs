//! Session ledger: clients, parking transactions and reservations.
//!
//! Every operation takes the storage handle explicitly and, where it stamps a
//! time, the current instant as an argument. Overstay is never persisted; see
//! `services::overstay` for the read-time computation.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::entities::{clients, prelude::*, reservations, transactions};
use crate::error::{LedgerError, Result};
use crate::services::overstay;

#[derive(Debug, Clone)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub client_id: i32,
    pub from_date: NaiveDateTime,
    pub to_date: NaiveDateTime,
    pub price: Decimal,
}

pub async fn list_clients<C: ConnectionTrait>(db: &C) -> Result<Vec<clients::Model>> {
    Ok(Clients::find()
        .order_by_asc(clients::Column::Id)
        .all(db)
        .await?)
}

pub async fn create_client<C: ConnectionTrait>(db: &C, new: NewClient) -> Result<clients::Model> {
    let client = clients::ActiveModel {
        first_name: Set(new.first_name),
        last_name: Set(new.last_name),
        phone_number: Set(new.phone_number),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(client_id = client.id, "Client inserted");
    Ok(client)
}

pub async fn list_transactions<C: ConnectionTrait>(db: &C) -> Result<Vec<transactions::Model>> {
    Ok(Transactions::find()
        .order_by_asc(transactions::Column::Id)
        .all(db)
        .await?)
}

pub async fn find_transaction<C: ConnectionTrait>(db: &C, id: i32) -> Result<transactions::Model> {
    Transactions::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Transaction {} not found", id)))
}

/// Opens a parking session of `duration` hours starting at `now`.
/// `duration == 0` opens a ticket that never expires.
pub async fn open_transaction<C: ConnectionTrait>(
    db: &C,
    duration: i32,
    now: DateTime<FixedOffset>,
) -> Result<transactions::Model> {
    if duration < 0 {
        return Err(LedgerError::Validation(format!(
            "duration must be zero or a positive number of hours, got {}",
            duration
        )));
    }

    let transaction = transactions::ActiveModel {
        duration: Set(duration),
        created_at: Set(now),
        expires_at: Set(overstay::expires_at(now, duration)),
        leaved_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        transaction_id = transaction.id,
        duration,
        expires_at = ?transaction.expires_at,
        "Transaction inserted"
    );
    Ok(transaction)
}

/// Stamps `leaved_at`. Closing an already closed ticket stamps it again.
pub async fn close_transaction<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<FixedOffset>,
) -> Result<transactions::Model> {
    let existing = find_transaction(db, id).await?;
    if existing.is_closed() {
        debug!(transaction_id = id, previous = ?existing.leaved_at, "Transaction closed again");
    }

    let mut active_model = existing.into_active_model();
    active_model.leaved_at = Set(Some(now));
    let updated = active_model.update(db).await?;

    info!(transaction_id = id, leaved_at = %now, "Transaction closed");
    Ok(updated)
}

pub async fn list_reservations<C: ConnectionTrait>(db: &C) -> Result<Vec<reservations::Model>> {
    Ok(Reservations::find()
        .order_by_asc(reservations::Column::Id)
        .all(db)
        .await?)
}

/// A reservation together with the client it belongs to.
pub async fn find_reservation<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<(reservations::Model, clients::Model)> {
    let (reservation, client) = Reservations::find_by_id(id)
        .find_also_related(Clients)
        .one(db)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Reservation {} not found", id)))?;

    let client = client.ok_or_else(|| {
        LedgerError::NotFound(format!(
            "Client {} of reservation {} not found",
            reservation.client_id, id
        ))
    })?;

    Ok((reservation, client))
}

/// Persists a reservation as given. The date range is not checked for order.
pub async fn create_reservation<C: ConnectionTrait>(
    db: &C,
    new: NewReservation,
) -> Result<reservations::Model> {
    if Clients::find_by_id(new.client_id).one(db).await?.is_none() {
        return Err(LedgerError::NotFound(format!(
            "Client {} not found",
            new.client_id
        )));
    }

    let reservation = reservations::ActiveModel {
        client_id: Set(new.client_id),
        from_date: Set(new.from_date),
        to_date: Set(new.to_date),
        price: Set(new.price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        reservation_id = reservation.id,
        client_id = reservation.client_id,
        "Reservation created"
    );
    Ok(reservation)
}

/// Reservations whose client's first or last name contains `query`,
/// ignoring case. Whitespace in `query` is part of the substring; an empty
/// query matches every reservation.
pub async fn search_reservations<C: ConnectionTrait>(
    db: &C,
    query: &str,
) -> Result<Vec<(reservations::Model, clients::Model)>> {
    let needle = query.to_lowercase();

    // Matching happens here rather than in SQL: SQLite's LIKE and lower()
    // only fold ASCII, and client names are often Cyrillic.
    let rows = Reservations::find()
        .find_also_related(Clients)
        .order_by_asc(reservations::Column::Id)
        .all(db)
        .await?;

    let matches: Vec<_> = rows
        .into_iter()
        .filter_map(|(reservation, client)| client.map(|c| (reservation, c)))
        .filter(|(_, client)| {
            client.first_name.to_lowercase().contains(&needle)
                || client.last_name.to_lowercase().contains(&needle)
        })
        .collect();

    debug!(query, matches = matches.len(), "Reservation search");
    Ok(matches)
}
