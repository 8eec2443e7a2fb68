#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use parking_ledger::{AppState, clock::FixedClock, config::Config, routes::build_router};
use sea_orm::{Database, DatabaseConnection, DbErr};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

/// Set up a fresh in-memory database with the schema applied
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "ACCESS_TOKEN" => Some(TOKEN.to_string()),
        _ => None,
    })
    .expect("Default test config should be valid")
}

/// 2024-06-01 09:00 UTC, 10:00 in the default +01:00 offset
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

/// Router over `db` whose clock is frozen at `now`
pub fn app_at(db: &DatabaseConnection, now: DateTime<Utc>) -> Router {
    let state = AppState::new(
        db.clone(),
        Arc::new(test_config()),
        Arc::new(FixedClock(now)),
    );
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", TOKEN));

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database should be created and migrated");
    }
}
