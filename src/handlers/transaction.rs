use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::transactions;
use crate::error::Result;
use crate::models::transaction::{LeaveQuery, OpenTransactionRequest, TransactionResponse};
use crate::services::{ledger, overstay::compute_overstay};

pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionResponse>>> {
    let transactions = ledger::list_transactions(&state.db).await?;

    Ok(Json(
        transactions
            .into_iter()
            .map(|tx| to_response(&state, tx))
            .collect(),
    ))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TransactionResponse>> {
    let transaction = ledger::find_transaction(&state.db, id).await?;

    Ok(Json(to_response(&state, transaction)))
}

pub async fn open_transaction(
    State(state): State<AppState>,
    Json(payload): Json<OpenTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResponse>)> {
    let transaction = ledger::open_transaction(&state.db, payload.duration, state.now()).await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, transaction))))
}

pub async fn leave_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TransactionResponse>> {
    close(&state, id).await
}

// PUT /transactions/leave?id=
pub async fn leave_transaction_by_query(
    State(state): State<AppState>,
    Query(query): Query<LeaveQuery>,
) -> Result<Json<TransactionResponse>> {
    close(&state, query.id).await
}

async fn close(state: &AppState, id: i32) -> Result<Json<TransactionResponse>> {
    let transaction = ledger::close_transaction(&state.db, id, state.now()).await?;

    Ok(Json(to_response(state, transaction)))
}

fn to_response(state: &AppState, transaction: transactions::Model) -> TransactionResponse {
    let overstay = compute_overstay(
        transaction.expires_at,
        state.now(),
        state.config.overstay_rate,
    );
    TransactionResponse::new(transaction, overstay, &state.config.utc_offset)
}
