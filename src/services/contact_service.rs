use sqlx::PgPool;

use crate::database::models::{ContactMessage, ContactMessageInput};
use crate::database::{DatabaseError, OrderBy, Repository};
use crate::services::{is_valid_email, require_text, ServiceError};

pub struct ContactService {
    repo: Repository<ContactMessage>,
}

impl ContactService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: Repository::new("contact_messages", "Contact message", pool),
        }
    }

    pub async fn submit(&self, input: ContactMessageInput) -> Result<ContactMessage, ServiceError> {
        validate(&input)?;

        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.name.trim())
        .bind(input.email.trim())
        .bind(input.subject)
        .bind(input.message)
        .fetch_one(self.repo.pool())
        .await
        .map_err(DatabaseError::from)?;

        Ok(message)
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<ContactMessage>, ServiceError> {
        let messages = self
            .repo
            .query()?
            .order_by(OrderBy::desc("created_at"))?
            .order_by(OrderBy::desc("id"))?
            .select_all(self.repo.pool())
            .await?;
        Ok(messages)
    }
}

fn validate(input: &ContactMessageInput) -> Result<(), ServiceError> {
    require_text("name", &input.name)?;
    if !is_valid_email(input.email.trim()) {
        return Err(ServiceError::validation("email", "Invalid email address"));
    }
    require_text("subject", &input.subject)?;
    require_text("message", &input.message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str) -> ContactMessageInput {
        ContactMessageInput {
            name: "Ada".into(),
            email: email.into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn validates_email() {
        assert!(validate(&input(" ada@example.com ")).is_ok());
        assert!(matches!(
            validate(&input("not-an-email")),
            Err(ServiceError::Validation { field: "email", .. })
        ));
    }

    #[test]
    fn requires_message_body() {
        let mut empty = input("ada@example.com");
        empty.message = String::new();
        assert!(matches!(
            validate(&empty),
            Err(ServiceError::Validation { field: "message", .. })
        ));
    }
}
