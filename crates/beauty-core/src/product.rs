//! Product shapes returned by the recommendation, chat, inventory and compare endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Currency symbol prices are shown with.
pub const CURRENCY: &str = "₹";

/// The single best match for the user's answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    /// Number of answered features the product matched.
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub sku_id: String,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub brand: String,
}

/// A secondary suggestion, from a recommendation request or from chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurtherRecommendation {
    pub name: String,
    #[serde(default)]
    pub sku_id: String,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub reason: String,
}

/// What a recommendation request yields: the best match plus alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendation: Recommendation,
    pub further: Vec<FurtherRecommendation>,
}

/// Keep the first entry for each SKU, preserving order.
pub fn dedup_by_sku(items: &[FurtherRecommendation]) -> Vec<&FurtherRecommendation> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.sku_id.as_str()))
        .collect()
}

/// Fraction of the score bar to fill. Zero questions yields an empty bar.
pub fn match_fraction(score: f64, questions_asked: usize) -> f64 {
    if questions_asked == 0 || !score.is_finite() {
        return 0.0;
    }
    (score / questions_asked as f64).clamp(0.0, 1.0)
}

/// Render a score without a trailing `.0` when it is whole.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

/// Price label, or `None` when there is no price worth showing.
pub fn format_price(price: Option<f64>) -> Option<String> {
    match price {
        Some(p) if p > 0.0 => {
            if p.fract() == 0.0 {
                Some(format!("{CURRENCY}{p:.0}"))
            } else {
                Some(format!("{CURRENCY}{p:.2}"))
            }
        }
        _ => None,
    }
}

/// One row of an inventory lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryResult {
    #[serde(default, deserialize_with = "null_default")]
    pub sku: String,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "stock_flag")]
    pub is_in_stock: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub quantity: i64,
    /// Maximum retail price.
    #[serde(default, deserialize_with = "null_default")]
    pub mrp: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub brand: String,
}

/// Treat an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The service reports stock as `0`/`1` or as a boolean.
fn stock_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Number(n) => n > 0.0,
        Flag::Null(()) => false,
    })
}

/// Product block inside a comparison. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub sku_id: String,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub finishes: Vec<String>,
}

/// Side-by-side comparison of two products with a free-text analysis.
///
/// Fields the client does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub product1: Option<ProductDetail>,
    #[serde(default)]
    pub product2: Option<ProductDetail>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn further(sku: &str, name: &str) -> FurtherRecommendation {
        FurtherRecommendation {
            name: name.to_string(),
            sku_id: sku.to_string(),
            main_image: String::new(),
            brand: String::new(),
            price: None,
            reason: String::new(),
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let items = vec![further("A", "first"), further("B", "b"), further("A", "second")];
        let unique = dedup_by_sku(&items);
        let skus: Vec<&str> = unique.iter().map(|r| r.sku_id.as_str()).collect();
        assert_eq!(skus, vec!["A", "B"]);
        assert_eq!(unique[0].name, "first");
    }

    #[test]
    fn match_fraction_divides_by_questions() {
        assert!((match_fraction(3.0, 5) - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn match_fraction_guards_zero_questions() {
        assert_eq!(match_fraction(3.0, 0), 0.0);
    }

    #[test]
    fn match_fraction_is_clamped() {
        assert_eq!(match_fraction(7.0, 5), 1.0);
        assert_eq!(match_fraction(-1.0, 5), 0.0);
    }

    #[test]
    fn price_hidden_when_absent_or_zero() {
        assert_eq!(format_price(None), None);
        assert_eq!(format_price(Some(0.0)), None);
        assert_eq!(format_price(Some(499.0)).as_deref(), Some("₹499"));
        assert_eq!(format_price(Some(12.5)).as_deref(), Some("₹12.50"));
    }

    #[test]
    fn score_formatting_drops_whole_decimals() {
        assert_eq!(format_score(3.0), "3");
        assert_eq!(format_score(2.5), "2.5");
    }

    #[test]
    fn inventory_stock_flag_accepts_numbers_and_bools() {
        let rows: Vec<InventoryResult> = serde_json::from_value(serde_json::json!([
            { "sku": "S1", "name": "Kajal", "is_in_stock": 1, "quantity": 4, "mrp": 250, "brand": "Kay" },
            { "sku": "S2", "name": "Gloss", "is_in_stock": 0, "quantity": 0, "mrp": 0, "brand": "Kay" },
            { "sku": "S3", "name": "Tint", "is_in_stock": true },
            { "sku": "S4", "name": "Balm", "is_in_stock": null }
        ]))
        .unwrap();

        let flags: Vec<bool> = rows.iter().map(|r| r.is_in_stock).collect();
        assert_eq!(flags, vec![true, false, true, false]);
        assert_eq!(rows[0].mrp, 250.0);
    }

    #[test]
    fn inventory_row_tolerates_null_fields() {
        let row: InventoryResult = serde_json::from_value(serde_json::json!({
            "sku": null, "name": null, "is_in_stock": 1,
            "quantity": null, "mrp": null, "brand": null
        }))
        .unwrap();

        assert_eq!(row.sku, "");
        assert_eq!(row.name, "");
        assert!(row.is_in_stock);
        assert_eq!(row.quantity, 0);
        assert_eq!(row.mrp, 0.0);
        assert_eq!(row.brand, "");
    }

    #[test]
    fn comparison_keeps_unknown_fields() {
        let result: ComparisonResult = serde_json::from_value(serde_json::json!({
            "product1": { "name": "Velvet Matte", "colors": ["Red", "Nude"] },
            "product2": { "name": "Gloss Pop", "price": 399 },
            "analysis": "**Finish**\n* matte vs glossy",
            "winner": "product1"
        }))
        .unwrap();

        assert_eq!(result.product1.unwrap().colors, vec!["Red", "Nude"]);
        assert_eq!(result.product2.unwrap().price, Some(399.0));
        assert_eq!(result.extra.get("winner"), Some(&serde_json::json!("product1")));
    }

    #[test]
    fn recommendation_tolerates_null_price() {
        let rec: Recommendation = serde_json::from_value(serde_json::json!({
            "name": "Silk Foundation", "price": null, "score": 4,
            "sku_id": "F-1", "main_image": "", "brand": "Lumi"
        }))
        .unwrap();
        assert_eq!(rec.price, None);
        assert_eq!(rec.score, 4.0);
    }
}
