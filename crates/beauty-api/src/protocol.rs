//! Request and response bodies for the assistant service.
//! Field names follow the service's JSON exactly.

use serde::{Deserialize, Serialize};

use beauty_core::catalog::{AnswerSet, Category, Question};
use beauty_core::product::{FurtherRecommendation, InventoryResult, Recommendation};

// ── Categories ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

// ── Questions ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct QuestionsRequest<'a> {
    pub category: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

// ── Recommendation ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecommendationRequest<'a> {
    pub category: &'a str,
    pub selected_answers: &'a AnswerSet,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationResponse {
    pub recommendation: Recommendation,
    #[serde(default)]
    pub further_recommendations: Option<Vec<FurtherRecommendation>>,
}

// ── Chat ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub store_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub recommendations: Option<Vec<FurtherRecommendation>>,
}

// ── Inventory ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct InventoryRequest<'a> {
    pub input: &'a str,
    pub store_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct InventoryResponse {
    #[serde(default)]
    pub results: Option<Vec<InventoryResult>>,
}

// ── Compare ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompareRequest<'a> {
    pub product1: &'a str,
    pub product2: &'a str,
    pub store_id: &'a str,
}

// Response is beauty_core::product::ComparisonResult (deserialized directly)

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recommendation_request_nests_answers() {
        let mut answers = AnswerSet::new();
        answers.answer("finish", "Matte");
        let body = serde_json::to_value(RecommendationRequest {
            category: "Foundation",
            selected_answers: &answers,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "category": "Foundation", "selected_answers": { "finish": "Matte" } })
        );
    }

    #[test]
    fn null_lists_decode_as_absent() {
        let resp: RecommendationResponse = serde_json::from_value(json!({
            "recommendation": { "name": "Dew Tint", "price": null, "score": 2,
                                "sku_id": "T-1", "main_image": "", "brand": "Glo" },
            "further_recommendations": null
        }))
        .unwrap();
        assert!(resp.further_recommendations.is_none());

        let chat: ChatResponse = serde_json::from_value(json!({ "response": "Hi!" })).unwrap();
        assert!(chat.recommendations.is_none());
    }

    #[test]
    fn compare_request_uses_service_field_names() {
        let body = serde_json::to_value(CompareRequest {
            product1: "A",
            product2: "B",
            store_id: "WH001",
        })
        .unwrap();
        assert_eq!(body, json!({ "product1": "A", "product2": "B", "store_id": "WH001" }));
    }
}
