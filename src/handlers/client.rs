use axum::{Json, extract::State, http::StatusCode};

use crate::AppState;
use crate::error::Result;
use crate::models::client::{ClientResponse, CreateClientRequest};
use crate::services::ledger::{self, NewClient};

pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientResponse>>> {
    let clients = ledger::list_clients(&state.db).await?;

    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>)> {
    let client = ledger::create_client(
        &state.db,
        NewClient {
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(client.into())))
}
