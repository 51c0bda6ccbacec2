pub mod admin_service;
pub mod blog_service;
pub mod contact_service;
pub mod email;
pub mod project_service;
pub mod skill_service;
pub mod storage;

pub use admin_service::AdminService;
pub use blog_service::BlogService;
pub use contact_service::ContactService;
pub use email::ContactNotifier;
pub use project_service::{ProjectFilter, ProjectService};
pub use skill_service::{SkillFilter, SkillService};
pub use storage::{LocalObjectStorage, ObjectStorage, StorageError};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// Errors raised by the content services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    /// Duplicate reported as a client error (400) rather than a conflict
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("Admin registration is disabled")]
    RegistrationClosed,
}

impl ServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Reject blank values for required text fields
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::validation(field, "This field is required"))
    } else {
        Ok(())
    }
}

/// Basic address shape check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
