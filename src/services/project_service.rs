use serde::Deserialize;
use sqlx::{types::Json, PgPool};

use crate::database::models::{Project, ProjectInput};
use crate::database::{DatabaseError, FilterValue, OrderBy, Repository};
use crate::services::{require_text, ServiceError};

/// Query-string filters for the project listing
#[derive(Debug, Default, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
    pub category: Option<String>,
    pub status: Option<String>,
}

const REPLACE_SQL: &str = r#"
    UPDATE projects SET
        title = $2, description = $3,
        long_description = COALESCE($4, long_description),
        model_type = $5, frameworks = $6, technologies = $7, image_url = $8,
        demo_url = COALESCE($9, demo_url),
        github_url = COALESCE($10, github_url),
        paper_url = COALESCE($11, paper_url),
        model_card_url = COALESCE($12, model_card_url),
        featured = $13,
        metrics = COALESCE($14, metrics),
        dataset = COALESCE($15, dataset),
        category = COALESCE($16, category),
        status = COALESCE($17, status),
        display_order = $18, updated_at = NOW()
    WHERE id = $1
    RETURNING *
"#;

pub struct ProjectService {
    repo: Repository<Project>,
}

impl ProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new("projects", "Project", pool),
        }
    }

    /// Ordered by `order` ascending, newest first within equal order
    pub async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ServiceError> {
        let projects = self
            .repo
            .query()?
            .filter("featured", filter.featured.map(FilterValue::Bool))?
            .filter("category", non_empty(&filter.category))?
            .filter("status", non_empty(&filter.status))?
            .order_by(OrderBy::asc("display_order"))?
            .order_by(OrderBy::desc("created_at"))?
            .select_all(self.repo.pool())
            .await?;
        Ok(projects)
    }

    pub async fn get(&self, id: &str) -> Result<Project, ServiceError> {
        Ok(self.repo.select_404(id).await?)
    }

    pub async fn create(&self, input: ProjectInput) -> Result<Project, ServiceError> {
        let id = input.id.clone().unwrap_or_default();
        require_text("id", &id)?;
        validate(&input)?;

        let result = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                id, title, description, long_description, model_type, frameworks, technologies,
                image_url, demo_url, github_url, paper_url, model_card_url, featured, metrics,
                dataset, category, status, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.long_description)
        .bind(input.model_type)
        .bind(input.frameworks)
        .bind(input.technologies)
        .bind(input.image_url)
        .bind(input.demo_url)
        .bind(input.github_url)
        .bind(input.paper_url)
        .bind(input.model_card_url)
        .bind(input.featured)
        .bind(input.metrics.map(Json))
        .bind(input.dataset)
        .bind(input.category)
        .bind(input.status)
        .bind(input.display_order)
        .fetch_one(self.repo.pool())
        .await;

        match result.map_err(DatabaseError::from) {
            Ok(project) => Ok(project),
            Err(DatabaseError::Conflict(_)) => Err(ServiceError::AlreadyExists(format!(
                "Project '{}' already exists",
                id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the required fields. Optional fields left out of the body keep
    /// their stored value; `id` in the body is ignored.
    pub async fn replace(&self, id: &str, input: ProjectInput) -> Result<Project, ServiceError> {
        validate(&input)?;

        let project = sqlx::query_as::<_, Project>(REPLACE_SQL)
            .bind(id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.long_description)
            .bind(input.model_type)
            .bind(input.frameworks)
            .bind(input.technologies)
            .bind(input.image_url)
            .bind(input.demo_url)
            .bind(input.github_url)
            .bind(input.paper_url)
            .bind(input.model_card_url)
            .bind(input.featured)
            .bind(input.metrics.map(Json))
            .bind(input.dataset)
            .bind(input.category)
            .bind(input.status)
            .bind(input.display_order)
            .fetch_optional(self.repo.pool())
            .await
            .map_err(DatabaseError::from)?;

        project.ok_or_else(|| self.repo.not_found().into())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_404(id).await?)
    }
}

fn validate(input: &ProjectInput) -> Result<(), ServiceError> {
    require_text("title", &input.title)?;
    require_text("description", &input.description)?;
    require_text("model_type", &input.model_type)?;
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<FilterValue> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| FilterValue::Text(v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_are_ignored() {
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
        assert_eq!(
            non_empty(&Some("vision".into())),
            Some(FilterValue::Text("vision".into()))
        );
    }

    fn assignment(column: &str) -> &'static str {
        let prefix = format!("{} = ", column);
        REPLACE_SQL
            .split(|c: char| c == ',' || c == '\n')
            .map(str::trim)
            .find(|a| a.starts_with(&prefix))
            .unwrap_or_else(|| panic!("no assignment for {}", column))
    }

    #[test]
    fn replace_keeps_omitted_optional_columns() {
        for column in [
            "long_description",
            "demo_url",
            "github_url",
            "paper_url",
            "model_card_url",
            "metrics",
            "dataset",
            "category",
            "status",
        ] {
            assert!(assignment(column).contains("COALESCE("), "{} should keep its stored value", column);
        }
        for column in ["title", "description", "model_type", "image_url", "featured", "display_order"] {
            assert!(!assignment(column).contains("COALESCE("), "{} is always replaced", column);
        }
    }

    #[tokio::test]
    async fn create_requires_id_before_touching_database() {
        let (state, _dir) = crate::testing::test_state(None);
        let service = ProjectService::new(state.pool.clone());
        let input: ProjectInput = serde_json::from_value(serde_json::json!({
            "title": "t",
            "description": "d",
            "model_type": "m",
            "frameworks": [],
            "technologies": [],
            "image_url": "i"
        }))
        .unwrap();

        match service.create(input).await {
            Err(ServiceError::Validation { field, .. }) => assert_eq!(field, "id"),
            other => panic!("expected validation error, got {:?}", other.map(|p| p.id)),
        }
    }
}
