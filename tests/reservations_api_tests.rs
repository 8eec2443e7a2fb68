mod common;

use axum::Router;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::common::{app_at, base_time, send, setup_test_db};

async fn create_client(app: &Router, first: &str, last: &str, phone: &str) -> i64 {
    let (_, body) = send(
        app,
        "POST",
        "/clients",
        Some(json!({ "firstName": first, "lastName": last, "phoneNumber": phone })),
    )
    .await;
    body["id"].as_i64().unwrap()
}

async fn create_reservation(app: &Router, client_id: i64, from: &str, to: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/reservations",
        Some(json!({
            "clientId": client_id,
            "fromDate": from,
            "toDate": to,
            "price": 1500
        })),
    )
    .await;
    assert_eq!(status, 201, "unexpected body: {}", body);
    body
}

fn price(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_create_reservation_returns_record() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "070111222").await;

    let body = create_reservation(&app, client_id, "2024-01-01", "2024-01-03T12:00").await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["clientId"], client_id);
    assert_eq!(body["fromDate"], "2024-01-01T00:00:00");
    assert_eq!(body["toDate"], "2024-01-03T12:00:00");
    assert_eq!(price(&body["price"]), Decimal::from(1500));
}

#[tokio::test]
async fn test_create_reservation_for_unknown_client() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({
            "clientId": 9,
            "fromDate": "2024-01-01",
            "toDate": "2024-01-02",
            "price": 100
        })),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Client 9 not found");
}

#[tokio::test]
async fn test_create_reservation_with_bad_date() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/reservations",
        Some(json!({
            "clientId": client_id,
            "fromDate": "01.01.2024",
            "toDate": "2024-01-02",
            "price": 100
        })),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("fromDate"));
}

#[tokio::test]
async fn test_reversed_range_is_accepted() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "1").await;

    let created = create_reservation(&app, client_id, "2024-01-03", "2024-01-01").await;

    let (_, detail) = send(&app, "GET", &format!("/reservations/{}", created["id"]), None).await;
    assert_eq!(detail["dayCount"], 3);
}

#[tokio::test]
async fn test_get_reservation_with_client() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "070111222").await;
    let created = create_reservation(&app, client_id, "2024-01-01", "2024-01-03").await;

    let (status, body) = send(&app, "GET", &format!("/reservations/{}", created["id"]), None).await;

    assert_eq!(status, 200);
    assert_eq!(body["firstName"], "Ana");
    assert_eq!(body["lastName"], "Petrovska");
    assert_eq!(body["clientName"], "Ana Petrovska");
    assert_eq!(body["phoneNumber"], "070111222");
    assert_eq!(body["dayCount"], 3);
    assert_eq!(price(&body["price"]), Decimal::from(1500));
}

#[tokio::test]
async fn test_same_day_reservation_counts_one_day() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "1").await;
    let created = create_reservation(&app, client_id, "2024-02-10 08:00", "2024-02-10 18:00").await;

    let (_, body) = send(&app, "GET", &format!("/reservations/{}", created["id"]), None).await;
    assert_eq!(body["dayCount"], 1);
}

#[tokio::test]
async fn test_get_missing_reservation() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());

    let (status, _) = send(&app, "GET", "/reservations/5", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_list_reservations() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let client_id = create_client(&app, "Ana", "Petrovska", "1").await;
    create_reservation(&app, client_id, "2024-01-01", "2024-01-02").await;
    create_reservation(&app, client_id, "2024-03-01", "2024-03-02").await;

    let (status, body) = send(&app, "GET", "/reservations", None).await;
    assert_eq!(status, 200);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["fromDate"], "2024-03-01T00:00:00");
}

#[tokio::test]
async fn test_search_by_first_or_last_name() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let ana = create_client(&app, "Ana", "Petrovska", "070111222").await;
    let john = create_client(&app, "John", "Smith", "070333444").await;
    create_reservation(&app, ana, "2024-01-01", "2024-01-02").await;
    create_reservation(&app, john, "2024-01-05", "2024-01-06").await;

    let (status, body) = send(&app, "GET", "/reservations/search?q=petrov", None).await;
    assert_eq!(status, 200);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["clientName"], "Ana Petrovska");
    assert_eq!(rows[0]["clientNumber"], "070111222");

    let (_, body) = send(&app, "GET", "/reservations/search?q=jOhN", None).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["clientName"], "John Smith");
}

#[tokio::test]
async fn test_search_without_match_returns_empty_list() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let ana = create_client(&app, "Ana", "Petrovska", "1").await;
    create_reservation(&app, ana, "2024-01-01", "2024-01-02").await;

    let (status, body) = send(&app, "GET", "/reservations/search?q=zzz", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_without_query_returns_empty_list() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let ana = create_client(&app, "Ana", "Petrovska", "1").await;
    let john = create_client(&app, "John", "Smith", "2").await;
    create_reservation(&app, ana, "2024-01-01", "2024-01-02").await;
    create_reservation(&app, john, "2024-01-05", "2024-01-06").await;

    let (status, body) = send(&app, "GET", "/reservations/search", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "GET", "/reservations/search?q=", None).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_with_space_matches_names_containing_one() {
    let db = setup_test_db().await.unwrap();
    let app = app_at(&db, base_time());
    let ana = create_client(&app, "Ana", "Petrovska", "1").await;
    let mary = create_client(&app, "Mary Ann", "Jones", "2").await;
    create_reservation(&app, ana, "2024-01-01", "2024-01-02").await;
    create_reservation(&app, mary, "2024-01-05", "2024-01-06").await;

    let (status, body) = send(&app, "GET", "/reservations/search?q=%20", None).await;
    assert_eq!(status, 200);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["clientName"], "Mary Ann Jones");
}
