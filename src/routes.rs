use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;
use crate::auth::require_bearer_token;
use crate::handlers::{client, hello, reservation, transaction};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/clients", get(client::list_clients).post(client::create_client))
        .route(
            "/transactions",
            get(transaction::list_transactions).post(transaction::open_transaction),
        )
        .route(
            "/transactions/leave",
            put(transaction::leave_transaction_by_query),
        )
        .route("/transactions/{id}", get(transaction::get_transaction))
        .route(
            "/transactions/{id}/leave",
            put(transaction::leave_transaction),
        )
        .route(
            "/reservations",
            get(reservation::list_reservations).post(reservation::create_reservation),
        )
        .route(
            "/reservations/search",
            get(reservation::search_reservations),
        )
        .route("/reservations/{id}", get(reservation::get_reservation))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(hello))
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
