use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub category: String,
    pub read_time: i32,
    pub published_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogCategory {
    Research,
    Tutorial,
    CaseStudy,
    Review,
}

impl BlogCategory {
    pub const ALL: [BlogCategory; 4] = [
        BlogCategory::Research,
        BlogCategory::Tutorial,
        BlogCategory::CaseStudy,
        BlogCategory::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::Research => "research",
            BlogCategory::Tutorial => "tutorial",
            BlogCategory::CaseStudy => "case-study",
            BlogCategory::Review => "review",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogPostInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub category: String,
    pub read_time: i32,
}
