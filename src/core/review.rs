// src/core/review.rs
// Structural matcher for schema.org `Review` nodes in a parsed linked-data tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REVIEW_TYPE: &str = "Review";

/// One review found in linked data. Either field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// `reviewRating.ratingValue`; only string, number or boolean.
    #[serde(rename = "ratingValue")]
    pub rating_value: Option<Value>,
    pub description: Option<String>,
}

impl ReviewRecord {
    fn from_node(node: &Map<String, Value>) -> Self {
        let rating_value = node
            .get("reviewRating")
            .and_then(Value::as_object)
            .and_then(|r| r.get("ratingValue"))
            .filter(|v| is_scalar(v))
            .cloned();
        let description = node
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Self { rating_value, description }
    }

    /// Rating as display text; numbers keep their JSON spelling.
    pub fn rating_text(&self) -> Option<String> {
        self.rating_value.as_ref().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn is_scalar(v: &Value) -> bool {
    matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn is_review(node: &Map<String, Value>) -> bool {
    node.get("@type").and_then(Value::as_str) == Some(REVIEW_TYPE)
}

/// Every `Review` node in `tree`, in pre-order depth-first order.
///
/// A matched node is still descended into, so reviews nested inside a
/// review (e.g. replies) are reported after their parent.
pub fn extract_reviews(tree: &Value) -> Vec<ReviewRecord> {
    let mut out = Vec::new();
    collect(tree, &mut out);
    out
}

fn collect(v: &Value, out: &mut Vec<ReviewRecord>) {
    match v {
        Value::Object(map) => {
            if is_review(map) {
                out.push(ReviewRecord::from_node(map));
            }
            for child in map.values() {
                collect(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect(item, out);
            }
        }
        _ => {}
    }
}
