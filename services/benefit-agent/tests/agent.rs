//! Agent behaviour against a mocked verify-benefit service.

use std::sync::Arc;
use std::time::Duration;

use benefit_agent::agent::{EMPTY_QUERY, REQUEST_FAILED};
use benefit_agent::{Agent, BenefitClient, RequestContext, Session};
use serde_json::json;
use shared::benefit::SOURCE_UNAVAILABLE;
use shared::db::{InteractionLog, MemoryInteractionLog};
use shared::{Language, Location};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_for(server: &MockServer, store: Arc<MemoryInteractionLog>) -> Agent {
    let client = BenefitClient::new(
        format!("{}/verify-benefit", server.uri()),
        Duration::from_millis(500),
    )
    .unwrap();
    let log: Arc<dyn InteractionLog> = store;
    Agent::new(client, log)
}

fn context(location: Location) -> RequestContext {
    RequestContext::new(
        Session::with_id("session_test", "4111111111111234"),
        location,
        Language::English,
    )
}

#[tokio::test]
async fn successful_query_is_logged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/verify-benefit"))
        .and(body_partial_json(json!({
            "query": "Where can I eat?",
            "location": "IIT Madras Main Gate",
            "language": "English",
            "cardNumber": "4111 XXXX XXXX 1234"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "benefit": {
                "benefit": "Campus Dining Cashback",
                "details": "15% cashback",
                "condition": "Minimum spend",
                "source": "Demo / Sample Benefit (Location-based)"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryInteractionLog::default());
    let agent = agent_for(&server, store.clone());
    let outcome = agent.ask(context(Location::IitMadrasMainGate), "Where can I eat?").await;

    assert!(!outcome.fallback);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.benefit.unwrap().benefit, "Campus Dining Cashback");
    assert_eq!(
        outcome.context.reasoning_log.first().unwrap(),
        "Initializing Agentic Engine for 4111 XXXX XXXX 1234..."
    );
    assert_eq!(
        outcome.context.reasoning_log.last().unwrap(),
        "Benefit verification complete!"
    );

    let queries = store.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].user_session, "session_test");
    assert_eq!(queries[0].reasoning_log.len(), 4);
}

#[tokio::test]
async fn server_error_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Failed to process benefit verification"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryInteractionLog::default());
    let agent = agent_for(&server, store.clone());
    let outcome = agent.ask(context(Location::ChennaiAirport), "lounge").await;

    assert!(outcome.fallback);
    assert_eq!(outcome.error.as_deref(), Some(REQUEST_FAILED));
    let benefit = outcome.benefit.unwrap();
    assert_eq!(benefit.benefit, "Demo: Location-Based Cashback");
    assert_eq!(benefit.source, SOURCE_UNAVAILABLE);
    assert!(benefit.details.contains("Chennai Airport"));
    assert_eq!(
        outcome.context.reasoning_log.last().unwrap(),
        "Using fallback demo benefit"
    );
    assert!(store.queries().is_empty());
}

#[tokio::test]
async fn slow_service_times_out_into_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({"benefit": null})),
        )
        .mount(&server)
        .await;

    let agent = agent_for(&server, Arc::new(MemoryInteractionLog::default()));
    let outcome = agent.ask(context(Location::PhoenixMall), "shopping").await;
    assert!(outcome.fallback);
}

#[tokio::test]
async fn unreachable_service_uses_fallback() {
    let client = BenefitClient::new("http://127.0.0.1:9/verify-benefit", Duration::from_millis(500)).unwrap();
    let agent = Agent::new(client, Arc::new(MemoryInteractionLog::default()));
    let outcome = agent.ask(context(Location::PhoenixMall), "shopping").await;
    assert!(outcome.fallback);
    assert!(outcome.benefit.is_some());
}

#[tokio::test]
async fn answer_without_benefit_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "no match"})))
        .mount(&server)
        .await;

    let agent = agent_for(&server, Arc::new(MemoryInteractionLog::default()));
    let outcome = agent.ask(context(Location::PhoenixMall), "shopping").await;
    assert!(!outcome.fallback);
    assert!(outcome.benefit.is_none());
    assert_eq!(outcome.error.as_deref(), Some("no match"));
}

#[tokio::test]
async fn blank_query_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let agent = agent_for(&server, Arc::new(MemoryInteractionLog::default()));
    let outcome = agent.ask(context(Location::PhoenixMall), "   ").await;
    assert_eq!(outcome.error.as_deref(), Some(EMPTY_QUERY));
    assert!(outcome.context.reasoning_log.is_empty());
}
