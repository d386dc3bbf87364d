// Bootstrap sequencer tests: offline demo mode, wholesale fallback on
// any failed read, and the all-success remote path.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use casona_core::{Engine, bootstrap};
use casona_store::{Gateway, StoreConfig};

const TABLES: [&str; 8] = [
    "residents",
    "rooms",
    "reservations",
    "payments",
    "expenses",
    "maintenance_tasks",
    "configurations",
    "monthly_rate_history",
];

fn gateway_for(server: &MockServer) -> Gateway {
    let config = StoreConfig::new(
        server.uri().parse().unwrap(),
        SecretString::from("test-anon-key".to_owned()),
    );
    Gateway::live(&config).unwrap()
}

async fn mock_table(server: &MockServer, table: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1/{table}")))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn offline_gateway_boots_into_demo_mode() {
    let mut engine = Engine::new(Arc::new(Gateway::null()));
    engine.bootstrap().await;

    let state = engine.state();
    assert!(state.is_demo_mode);
    assert!(!state.is_connected);
    assert!(!state.is_loading);
    // Bundled collections are non-empty.
    assert!(!state.residents.is_empty());
    assert!(!state.rooms.is_empty());
    assert!(!state.payments.is_empty());
    assert!(!state.expenses.is_empty());
    assert!(!state.maintenance_tasks.is_empty());

    // The sample roster drives derived occupancy at load.
    let occupied = state.rooms.iter().filter(|r| r.current_occupancy > 0).count();
    assert!(occupied > 0);
}

#[tokio::test]
async fn any_failed_read_falls_back_to_sample_data_wholesale() {
    let server = MockServer::start().await;
    for table in TABLES {
        if table == "payments" {
            mock_table(&server, table, ResponseTemplate::new(500)).await;
        } else {
            mock_table(
                &server,
                table,
                ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
            )
            .await;
        }
    }

    let data = bootstrap::load_all(&gateway_for(&server)).await;

    assert_eq!(data.is_demo_mode, Some(true));
    assert_eq!(data.is_connected, Some(false));
    // Nothing from the partially-successful reads is adopted: the
    // sample rooms replace the (empty) remote rooms.
    assert!(!data.rooms.unwrap().is_empty());
}

#[tokio::test]
async fn all_successful_reads_boot_into_production_mode() {
    let server = MockServer::start().await;
    for table in TABLES {
        mock_table(
            &server,
            table,
            ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
        )
        .await;
    }

    let mut engine = Engine::new(Arc::new(gateway_for(&server)));
    engine.bootstrap().await;

    let state = engine.state();
    assert!(!state.is_demo_mode);
    assert!(state.is_connected);
    assert!(!state.is_loading);
    assert!(state.residents.is_empty());
    // No configuration row provisioned: defaults apply.
    assert_eq!(state.configuration.id.as_str(), "default-config-id");
    assert_eq!(state.petty_cash, state.configuration.petty_cash);
}

#[tokio::test]
async fn remote_rows_are_mapped_into_domain_shapes() {
    let server = MockServer::start().await;
    for table in TABLES {
        if table == "residents" || table == "rooms" {
            continue;
        }
        mock_table(
            &server,
            table,
            ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
        )
        .await;
    }

    mock_table(
        &server,
        "rooms",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "room-1",
            "number": "1A",
            "type": "double",
            "capacity": 2,
            "current_occupancy": 0,
            "status": "available",
            "monthly_rate_usd": 190.0,
            "gender": null
        }])),
    )
    .await;

    mock_table(
        &server,
        "residents",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "res-1",
            "first_name": "Ana",
            "last_name": "Gómez",
            "nationality": "chile",
            "email": "ana@example.com",
            "phone": "+54 11 5555-0000",
            "emergency_contact_name": "Luis",
            "emergency_contact_phone": "+54 11 5555-0001",
            "emergency_contact_relationship": "padre",
            "room_id": "room-1",
            "check_in_date": "2025-03-01",
            "check_out_date": null,
            "status": "active",
            "behavior_notes": [],
            "documents": []
        }])),
    )
    .await;

    let mut engine = Engine::new(Arc::new(gateway_for(&server)));
    engine.bootstrap().await;

    let state = engine.state();
    assert_eq!(state.residents.len(), 1);
    assert_eq!(state.residents[0].emergency_contact.name, "Luis");
    // Occupancy is re-derived from the loaded roster, and the missing
    // gender column falls back to the default.
    assert_eq!(state.rooms[0].current_occupancy, 1);
}
