use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, AuthError};
use crate::database::models::Admin;
use crate::database::DatabaseError;
use crate::services::{require_text, ServiceError};

pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, ServiceError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from)?;
        Ok(admin)
    }

    /// Check credentials; a disabled account is refused after its password matches
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, ServiceError> {
        let admin = self
            .find_by_username(username)
            .await?
            .filter(|admin| verify_password(password, &admin.hashed_password))
            .ok_or(AuthError::InvalidCredentials)?;

        if !admin.is_active {
            return Err(AuthError::Inactive.into());
        }
        Ok(admin)
    }

    /// Create the first admin; refused once any admin exists
    pub async fn register_first(&self, username: &str, password: &str) -> Result<Admin, ServiceError> {
        validate(username, password)?;
        let hashed = hash_password(password)?;

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, username, hashed_password)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM admins)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(hashed)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        admin.ok_or(ServiceError::RegistrationClosed)
    }

    /// Create an admin unconditionally (command-line provisioning)
    pub async fn create(&self, username: &str, password: &str) -> Result<Admin, ServiceError> {
        validate(username, password)?;
        let hashed = hash_password(password)?;

        let result = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (id, username, hashed_password) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(hashed)
        .fetch_one(&self.pool)
        .await;

        match result.map_err(DatabaseError::from) {
            Ok(admin) => Ok(admin),
            Err(DatabaseError::Conflict(_)) => Err(ServiceError::AlreadyExists(format!(
                "Admin '{}' already exists",
                username
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate(username: &str, password: &str) -> Result<(), ServiceError> {
    require_text("username", username)?;
    require_text("password", password)?;
    Ok(())
}
