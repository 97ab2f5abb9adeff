use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use beauty_api::ApiClient;
use beauty_core::catalog::AnswerSet;

#[derive(Clone, Default)]
struct Recorded {
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn push(&self, path: &str, body: Value) {
        self.bodies
            .lock()
            .expect("recorder lock")
            .push((path.to_string(), body));
    }

    fn last(&self) -> (String, Value) {
        self.bodies
            .lock()
            .expect("recorder lock")
            .last()
            .cloned()
            .expect("a recorded request")
    }
}

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn assistant_service(recorded: Recorded) -> Router {
    Router::new()
        .route(
            "/categories",
            get(|| async {
                Json(json!({ "categories": [{ "name": "Kajal", "image": "https://cdn/kajal.png" }] }))
            }),
        )
        .route(
            "/questions",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.push("/questions", body);
                Json(json!({
                    "questions": [
                        { "attribute": "finish", "question": "Which finish?", "options": ["Matte", "Glossy"] }
                    ]
                }))
            }),
        )
        .route(
            "/recommendation",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.push("/recommendation", body);
                Json(json!({
                    "recommendation": {
                        "name": "Velvet Liner", "price": 450, "score": 2,
                        "sku_id": "EL-1", "main_image": "", "brand": "Kohl Co"
                    }
                }))
            }),
        )
        .route(
            "/chat",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.push("/chat", body);
                Json(json!({
                    "response": "Try a waterproof mascara.",
                    "recommendations": [
                        { "name": "Lash Up", "sku_id": "M-1", "main_image": "", "brand": "Lumi",
                          "price": null, "reason": "Humidity proof" }
                    ]
                }))
            }),
        )
        .route(
            "/inventory",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.push("/inventory", body);
                Json(json!({
                    "results": [
                        { "sku": "K-1", "name": "Kajal", "is_in_stock": 1, "quantity": 7, "mrp": 199, "brand": "Kohl Co" }
                    ]
                }))
            }),
        )
        .route(
            "/compare",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.push("/compare", body);
                Json(json!({
                    "product1": { "name": "Velvet Matte", "colors": ["Red"] },
                    "product2": { "name": "Gloss Pop", "finishes": ["Glossy"] },
                    "analysis": "**Finish**\n* matte vs glossy"
                }))
            }),
        )
        .with_state(recorded)
}

#[tokio::test]
async fn wizard_endpoints_round_trip() {
    let recorded = Recorded::default();
    let url = spawn_server(assistant_service(recorded.clone())).await;
    let client = ApiClient::new(format!("{url}/"), None);

    let categories = client.categories().await.expect("categories");
    assert_eq!(categories[0].name, "Kajal");

    let questions = client.questions("Eyeliner").await.expect("questions");
    assert_eq!(questions[0].options, vec!["Matte", "Glossy"]);
    assert_eq!(recorded.last(), ("/questions".into(), json!({ "category": "Eyeliner" })));

    let mut answers = AnswerSet::new();
    answers.answer("finish", "Matte");
    answers.answer("wear", "All day");
    let set = client
        .recommendation("Eyeliner", &answers)
        .await
        .expect("recommendation");
    assert_eq!(set.recommendation.sku_id, "EL-1");
    assert!(set.further.is_empty());
    assert_eq!(
        recorded.last().1,
        json!({ "category": "Eyeliner", "selected_answers": { "finish": "Matte", "wear": "All day" } })
    );
}

#[tokio::test]
async fn side_features_send_store_id() {
    let recorded = Recorded::default();
    let url = spawn_server(assistant_service(recorded.clone())).await;
    let client = ApiClient::new(url, None);

    let reply = client.chat("humid weather?", "WH007").await.expect("chat");
    assert_eq!(reply.response, "Try a waterproof mascara.");
    assert_eq!(reply.recommendations[0].sku_id, "M-1");
    assert_eq!(
        recorded.last().1,
        json!({ "message": "humid weather?", "store_id": "WH007" })
    );

    let rows = client.inventory("kajal", "WH007").await.expect("inventory");
    assert!(rows[0].is_in_stock);
    assert_eq!(rows[0].quantity, 7);
    assert_eq!(recorded.last().1, json!({ "input": "kajal", "store_id": "WH007" }));

    let comparison = client
        .compare("Velvet Matte", "Gloss Pop", "WH007")
        .await
        .expect("compare");
    assert_eq!(comparison.product2.expect("product2").finishes, vec!["Glossy"]);
    assert!(comparison.analysis.is_some());
    assert_eq!(
        recorded.last().1,
        json!({ "product1": "Velvet Matte", "product2": "Gloss Pop", "store_id": "WH007" })
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let app = Router::new()
        .route(
            "/inventory",
            post(|| async { (StatusCode::BAD_GATEWAY, Json(json!({ "results": [] }))) }),
        )
        .route("/categories", get(|| async { "not json" }));
    let url = spawn_server(app).await;
    let client = ApiClient::new(url, None);

    assert!(client.inventory("kajal", "WH001").await.is_err());
    assert!(client.categories().await.is_err());
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ApiClient::new(
        format!("http://{addr}"),
        Some(std::time::Duration::from_secs(2)),
    );
    assert!(client.questions("Blush").await.is_err());
}
