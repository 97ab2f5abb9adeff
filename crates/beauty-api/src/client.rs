//! HTTP client for the recommendation service.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use beauty_core::catalog::{AnswerSet, Category, Question};
use beauty_core::chat::ChatReply;
use beauty_core::product::{ComparisonResult, InventoryResult, RecommendationSet};

use crate::protocol::*;

/// Client for the assistant service. Cheap to share behind an `Arc`.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`. Without a timeout, requests wait
    /// until the service answers or the connection drops.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the category list. An absent list decodes as empty.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> anyhow::Result<Vec<Category>> {
        let url = format!("{}/categories", self.base_url);
        let resp = self.client.get(&url).send().await?;
        let body: CategoriesResponse = resp.error_for_status()?.json().await?;
        let categories = body.categories.unwrap_or_default();
        debug!("Loaded {} categories", categories.len());
        Ok(categories)
    }

    /// Fetch the preference questions for a category.
    #[instrument(skip(self))]
    pub async fn questions(&self, category: &str) -> anyhow::Result<Vec<Question>> {
        let url = format!("{}/questions", self.base_url);
        let req = QuestionsRequest { category };
        let resp = self.client.post(&url).json(&req).send().await?;
        let body: QuestionsResponse = resp.error_for_status()?.json().await?;
        let questions = body.questions.unwrap_or_default();
        debug!("Loaded {} questions", questions.len());
        Ok(questions)
    }

    /// Score the answers and return the best match plus alternatives.
    #[instrument(skip(self, answers), fields(answers = answers.len()))]
    pub async fn recommendation(
        &self,
        category: &str,
        answers: &AnswerSet,
    ) -> anyhow::Result<RecommendationSet> {
        let url = format!("{}/recommendation", self.base_url);
        let req = RecommendationRequest {
            category,
            selected_answers: answers,
        };
        let resp = self.client.post(&url).json(&req).send().await?;
        let body: RecommendationResponse = resp.error_for_status()?.json().await?;
        debug!(sku = %body.recommendation.sku_id, "Recommendation received");
        Ok(RecommendationSet {
            recommendation: body.recommendation,
            further: body.further_recommendations.unwrap_or_default(),
        })
    }

    /// Send one chat message.
    #[instrument(skip(self, message))]
    pub async fn chat(&self, message: &str, store_id: &str) -> anyhow::Result<ChatReply> {
        let url = format!("{}/chat", self.base_url);
        let req = ChatRequest { message, store_id };
        let resp = self.client.post(&url).json(&req).send().await?;
        let body: ChatResponse = resp.error_for_status()?.json().await?;
        Ok(ChatReply {
            response: body.response,
            recommendations: body.recommendations.unwrap_or_default(),
        })
    }

    /// Look up stock for a product name or SKU.
    #[instrument(skip(self))]
    pub async fn inventory(
        &self,
        input: &str,
        store_id: &str,
    ) -> anyhow::Result<Vec<InventoryResult>> {
        let url = format!("{}/inventory", self.base_url);
        let req = InventoryRequest { input, store_id };
        let resp = self.client.post(&url).json(&req).send().await?;
        let body: InventoryResponse = resp.error_for_status()?.json().await?;
        let results = body.results.unwrap_or_default();
        debug!("Inventory returned {} rows", results.len());
        Ok(results)
    }

    /// Compare two products by name or SKU.
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        product1: &str,
        product2: &str,
        store_id: &str,
    ) -> anyhow::Result<ComparisonResult> {
        let url = format!("{}/compare", self.base_url);
        let req = CompareRequest {
            product1,
            product2,
            store_id,
        };
        let resp = self.client.post(&url).json(&req).send().await?;
        let result: ComparisonResult = resp.error_for_status()?.json().await?;
        Ok(result)
    }
}
