use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub model_type: String,
    pub frameworks: Vec<String>,
    pub technologies: Vec<String>,
    pub image_url: String,
    pub demo_url: Option<String>,
    pub github_url: Option<String>,
    pub paper_url: Option<String>,
    pub model_card_url: Option<String>,
    pub featured: bool,
    pub metrics: Option<Json<Vec<Metric>>>,
    pub dataset: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "order")]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for create (`id` required) and full replace (`id` ignored)
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    pub model_type: String,
    pub frameworks: Vec<String>,
    pub technologies: Vec<String>,
    pub image_url: String,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub paper_url: Option<String>,
    #[serde(default)]
    pub model_card_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub metrics: Option<Vec<Metric>>,
    #[serde(default)]
    pub dataset: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "order")]
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_applies_defaults() {
        let input: ProjectInput = serde_json::from_value(json!({
            "id": "llm-eval",
            "title": "LLM Eval",
            "description": "Evaluation harness",
            "model_type": "transformer",
            "frameworks": ["pytorch"],
            "technologies": ["python"],
            "image_url": "https://img.example.com/a.png"
        }))
        .unwrap();

        assert!(!input.featured);
        assert_eq!(input.display_order, 0);
        assert!(input.metrics.is_none());
    }

    #[test]
    fn serializes_order_and_metrics() {
        let project = Project {
            id: "p1".into(),
            title: "t".into(),
            description: "d".into(),
            long_description: None,
            model_type: "cnn".into(),
            frameworks: vec![],
            technologies: vec![],
            image_url: "i".into(),
            demo_url: None,
            github_url: None,
            paper_url: None,
            model_card_url: None,
            featured: true,
            metrics: Some(Json(vec![Metric { name: "acc".into(), value: "0.9".into() }])),
            dataset: None,
            category: None,
            status: None,
            display_order: 3,
            created_at: Utc::now(),
            updated_at: None,
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["order"], 3);
        assert_eq!(value["metrics"][0]["name"], "acc");
        assert!(value.get("display_order").is_none());
    }
}
