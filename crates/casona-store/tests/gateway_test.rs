// Gateway tests against a wiremock PostgREST stand-in.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use casona_store::rows::{PaymentRow, ResidentRow};
use casona_store::{Gateway, StoreConfig, StoreError, StoreMode};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Gateway) {
    let server = MockServer::start().await;
    let config = StoreConfig::new(
        server.uri().parse().unwrap(),
        SecretString::from("test-anon-key".to_owned()),
    );
    let gateway = Gateway::live(&config).unwrap();
    (server, gateway)
}

fn payment_row(id: &str) -> PaymentRow {
    PaymentRow {
        id: id.to_owned(),
        resident_id: "res-1".to_owned(),
        amount: 247_000.0,
        currency: "ARS".to_owned(),
        method: "cash".to_owned(),
        date: "2025-07-01T12:00:00.000Z".to_owned(),
        kind: "monthly_rent".to_owned(),
        status: "pending".to_owned(),
        receipt_number: None,
        is_partial_payment: Some(false),
        updated_at: None,
    }
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn select_decodes_rows_and_sends_credentials() {
    let (server, gateway) = setup().await;

    let body = json!([{
        "id": "res-1",
        "first_name": "Ana",
        "last_name": "Gómez",
        "nationality": "chile",
        "email": "ana@example.com",
        "phone": "+54 11 5555-0000",
        "emergency_contact_name": "Luis",
        "emergency_contact_phone": "+54 11 5555-0001",
        "emergency_contact_relationship": "padre",
        "room_id": null,
        "check_in_date": "2025-03-01",
        "check_out_date": null,
        "status": "active",
        "behavior_notes": [],
        "documents": []
    }]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/residents"))
        .and(query_param("select", "*"))
        .and(header("apikey", "test-anon-key"))
        .and(header("authorization", "Bearer test-anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let rows: Vec<ResidentRow> = gateway.select_residents().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].first_name, "Ana");
    assert!(rows[0].room_id.is_none());
}

#[tokio::test]
async fn select_configuration_takes_the_first_row() {
    let (server, gateway) = setup().await;

    let row = json!({
        "id": "config-1",
        "exchange_rate": 1300.0,
        "last_updated": "2025-07-01T00:00:00.000Z",
        "room_rates_usd": {"individual": 245.0, "double": 190.0, "triple": 165.0, "quadruple": 150.0, "quintuple": 135.0},
        "room_rates_ars": {"individual": 318500.0, "double": 247000.0, "triple": 214500.0, "quadruple": 195000.0, "quintuple": 175500.0},
        "payment_methods": ["cash", "transfer"],
        "expense_categories": ["Luz"],
        "maintenance_areas": ["Baño 1"],
        "petty_cash": 50000.0
    });

    Mock::given(method("GET"))
        .and(path("/rest/v1/configurations"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
        .mount(&server)
        .await;

    let config = gateway.select_configuration().await.unwrap().unwrap();
    assert_eq!(config.id, "config-1");
    assert_eq!(config.room_rates_ars.double, 247_000.0);
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_wraps_the_row_in_an_array_with_return_minimal() {
    let (server, gateway) = setup().await;
    let row = payment_row("pay-1");

    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!([{
            "id": "pay-1",
            "resident_id": "res-1",
            "amount": 247000.0,
            "currency": "ARS",
            "method": "cash",
            "date": "2025-07-01T12:00:00.000Z",
            "type": "monthly_rent",
            "status": "pending",
            "receipt_number": null,
            "is_partial_payment": false
        }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    gateway.insert_payment(&row).await.unwrap();
}

#[tokio::test]
async fn update_filters_by_id_and_strips_the_primary_key() {
    let (server, gateway) = setup().await;
    let mut row = payment_row("pay-1");
    row.status = "completed".to_owned();
    row.updated_at = Some("2025-07-02T10:00:00.000Z".to_owned());

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/payments"))
        .and(query_param("id", "eq.pay-1"))
        .and(body_json(json!({
            "resident_id": "res-1",
            "amount": 247000.0,
            "currency": "ARS",
            "method": "cash",
            "date": "2025-07-01T12:00:00.000Z",
            "type": "monthly_rent",
            "status": "completed",
            "receipt_number": null,
            "is_partial_payment": false,
            "updated_at": "2025-07-02T10:00:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway.update_payment("pay-1", &row).await.unwrap();
}

#[tokio::test]
async fn pending_payment_purge_sends_both_eq_filters() {
    let (server, gateway) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/payments"))
        .and(query_param("resident_id", "eq.res-1"))
        .and(query_param("status", "eq.pending"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway.delete_pending_payments("res-1").await.unwrap();
}

#[tokio::test]
async fn rate_history_upserts_on_the_month_column() {
    let (server, gateway) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/monthly_rate_history"))
        .and(query_param("on_conflict", "month"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let row = casona_store::rows::MonthlyRateHistoryRow {
        id: "history-1".to_owned(),
        month: "2025-07".to_owned(),
        exchange_rate: 1300.0,
        room_rates_usd: casona_store::rows::RateTable {
            individual: 245.0,
            double: 190.0,
            triple: 165.0,
            quadruple: 150.0,
            quintuple: 135.0,
        },
        room_rates_ars: casona_store::rows::RateTable {
            individual: 318_500.0,
            double: 247_000.0,
            triple: 214_500.0,
            quadruple: 195_000.0,
            quintuple: 175_500.0,
        },
        created_date: "2025-07-01T00:00:00.000Z".to_owned(),
        created_by: "admin".to_owned(),
    };
    gateway.upsert_rate_history(&row).await.unwrap();
}

// ── Counts & diagnostics ────────────────────────────────────────────

#[tokio::test]
async fn count_parses_the_content_range_tail() {
    let (server, gateway) = setup().await;

    for (table, total) in [("residents", "0-24/31"), ("rooms", "0-9/10"), ("payments", "*/0")] {
        Mock::given(method("HEAD"))
            .and(path(format!("/rest/v1/{table}")))
            .and(header("prefer", "count=exact"))
            .respond_with(ResponseTemplate::new(200).insert_header("content-range", total))
            .mount(&server)
            .await;
    }

    let stats = gateway.stats().await.unwrap();
    assert_eq!(stats.residents, 31);
    assert_eq!(stats.rooms, 10);
    assert_eq!(stats.payments, 0);
}

#[tokio::test]
async fn probe_reports_a_healthy_store() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/configurations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let report = gateway.probe().await;
    assert!(report.connected);
    assert_eq!(report.mode, StoreMode::Production);
    assert!(report.error.is_none());
}

#[tokio::test]
async fn probe_diagnoses_a_missing_schema() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/configurations"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "relation \"public.configurations\" does not exist",
            "code": "42P01"
        })))
        .mount(&server)
        .await;

    let report = gateway.probe().await;
    assert!(!report.connected);
    assert_eq!(report.mode, StoreMode::Production);
    assert_eq!(report.error.as_deref(), Some("tables not found"));
}

#[tokio::test]
async fn unauthorized_maps_to_an_authentication_error() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/residents"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "JWT expired"
        })))
        .mount(&server)
        .await;

    let err = gateway.select_residents().await.unwrap_err();
    assert!(matches!(err, StoreError::Authentication { .. }));
}

#[tokio::test]
async fn api_errors_carry_the_postgrest_code() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/residents"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "relation \"public.residents\" does not exist",
            "code": "42P01"
        })))
        .mount(&server)
        .await;

    let err = gateway.select_residents().await.unwrap_err();
    assert!(err.is_missing_schema());
}

// ── Null gateway ────────────────────────────────────────────────────

#[tokio::test]
async fn null_gateway_accepts_everything_without_io() {
    let gateway = Gateway::null();
    assert!(!gateway.is_live());

    assert!(gateway.select_residents().await.unwrap().is_empty());
    assert!(gateway.select_configuration().await.unwrap().is_none());
    gateway.insert_payment(&payment_row("pay-1")).await.unwrap();
    gateway.delete_pending_payments("res-1").await.unwrap();
    assert_eq!(gateway.stats().await.unwrap().residents, 0);

    let report = gateway.probe().await;
    assert!(!report.connected);
    assert_eq!(report.mode, StoreMode::Demo);
}
