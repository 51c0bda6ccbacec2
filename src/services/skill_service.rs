use serde::Deserialize;
use sqlx::PgPool;

use crate::database::models::{Skill, SkillInput, SkillUpdate};
use crate::database::{DatabaseError, FilterValue, OrderBy, Repository};
use crate::services::{require_text, ServiceError};

const DUPLICATE: &str = "Skill already exists";

#[derive(Debug, Default, Deserialize)]
pub struct SkillFilter {
    pub category: Option<String>,
}

pub struct SkillService {
    repo: Repository<Skill>,
}

impl SkillService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new("skills", "Skill", pool),
        }
    }

    pub async fn list(&self, filter: &SkillFilter) -> Result<Vec<Skill>, ServiceError> {
        let category = filter
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(|c| FilterValue::Text(c.to_string()));

        let skills = self
            .repo
            .query()?
            .filter("category", category)?
            .order_by(OrderBy::asc("display_order"))?
            .order_by(OrderBy::asc("name"))?
            .select_all(self.repo.pool())
            .await?;
        Ok(skills)
    }

    pub async fn get(&self, id: i32) -> Result<Skill, ServiceError> {
        Ok(self.repo.select_404(id).await?)
    }

    pub async fn create(&self, input: SkillInput) -> Result<Skill, ServiceError> {
        require_text("name", &input.name)?;

        let skill = insert_if_new(self.repo.pool(), &input).await?;
        skill.ok_or_else(|| ServiceError::Duplicate(DUPLICATE.to_string()))
    }

    /// Insert each skill whose name is not taken; returns only the new rows
    pub async fn create_bulk(&self, inputs: Vec<SkillInput>) -> Result<Vec<Skill>, ServiceError> {
        for input in &inputs {
            require_text("name", &input.name)?;
        }

        let mut tx = self.repo.pool().begin().await.map_err(DatabaseError::from)?;
        let mut created = Vec::new();
        for input in &inputs {
            if let Some(skill) = insert_if_new(&mut *tx, input).await? {
                created.push(skill);
            }
        }
        tx.commit().await.map_err(DatabaseError::from)?;

        tracing::info!(requested = inputs.len(), created = created.len(), "bulk skill insert");
        Ok(created)
    }

    /// Apply only the fields present in `update`
    pub async fn update(&self, id: i32, update: SkillUpdate) -> Result<Skill, ServiceError> {
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }

        let result = sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                icon = COALESCE($4, icon),
                display_order = COALESCE($5, display_order)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.category)
        .bind(update.icon)
        .bind(update.display_order)
        .fetch_optional(self.repo.pool())
        .await;

        match result.map_err(DatabaseError::from) {
            Ok(Some(skill)) => Ok(skill),
            Ok(None) => Err(self.repo.not_found().into()),
            Err(DatabaseError::Conflict(_)) => Err(ServiceError::Duplicate(DUPLICATE.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        Ok(self.repo.delete_404(id).await?)
    }
}

async fn insert_if_new<'e, E>(executor: E, input: &SkillInput) -> Result<Option<Skill>, DatabaseError>
where
    E: sqlx::PgExecutor<'e>,
{
    let skill = sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (name, category, icon, display_order)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (name) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(&input.category)
    .bind(&input.icon)
    .bind(input.display_order)
    .fetch_optional(executor)
    .await?;
    Ok(skill)
}
