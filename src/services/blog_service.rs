use sqlx::PgPool;

use crate::database::models::{BlogCategory, BlogPost, BlogPostInput};
use crate::database::{DatabaseError, OrderBy, Repository};
use crate::services::{require_text, ServiceError};

pub struct BlogService {
    repo: Repository<BlogPost>,
}

impl BlogService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new("blog_posts", "Blog post", pool),
        }
    }

    /// Newest publication first
    pub async fn list(&self) -> Result<Vec<BlogPost>, ServiceError> {
        let posts = self
            .repo
            .query()?
            .order_by(OrderBy::desc("published_at"))?
            .select_all(self.repo.pool())
            .await?;
        Ok(posts)
    }

    pub async fn get(&self, id: &str) -> Result<BlogPost, ServiceError> {
        Ok(self.repo.select_404(id).await?)
    }

    pub async fn create(&self, input: BlogPostInput) -> Result<BlogPost, ServiceError> {
        let id = input.id.clone().unwrap_or_default();
        require_text("id", &id)?;
        let category = validate(&input)?;

        let result = sqlx::query_as::<_, BlogPost>(
            r#"
            INSERT INTO blog_posts (id, title, excerpt, content, cover_image, tags, category, read_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(input.title)
        .bind(input.excerpt)
        .bind(input.content)
        .bind(input.cover_image)
        .bind(input.tags)
        .bind(category.as_str())
        .bind(input.read_time)
        .fetch_one(self.repo.pool())
        .await;

        match result.map_err(DatabaseError::from) {
            Ok(post) => Ok(post),
            Err(DatabaseError::Conflict(_)) => Err(ServiceError::AlreadyExists(format!(
                "Blog post '{}' already exists",
                id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace every editable field; `published_at` is kept
    pub async fn replace(&self, id: &str, input: BlogPostInput) -> Result<BlogPost, ServiceError> {
        let category = validate(&input)?;

        let post = sqlx::query_as::<_, BlogPost>(
            r#"
            UPDATE blog_posts SET
                title = $2, excerpt = $3, content = $4, cover_image = $5, tags = $6,
                category = $7, read_time = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title)
        .bind(input.excerpt)
        .bind(input.content)
        .bind(input.cover_image)
        .bind(input.tags)
        .bind(category.as_str())
        .bind(input.read_time)
        .fetch_optional(self.repo.pool())
        .await
        .map_err(DatabaseError::from)?;

        post.ok_or_else(|| self.repo.not_found().into())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        Ok(self.repo.delete_404(id).await?)
    }
}

fn validate(input: &BlogPostInput) -> Result<BlogCategory, ServiceError> {
    require_text("title", &input.title)?;
    if input.read_time < 0 {
        return Err(ServiceError::validation("read_time", "Must not be negative"));
    }
    BlogCategory::parse(&input.category).ok_or_else(|| {
        let allowed: Vec<&str> = BlogCategory::ALL.iter().map(|c| c.as_str()).collect();
        ServiceError::validation("category", format!("Must be one of: {}", allowed.join(", ")))
    })
}
