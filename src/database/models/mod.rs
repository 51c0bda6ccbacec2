pub mod admin;
pub mod blog_post;
pub mod contact_message;
pub mod project;
pub mod skill;

pub use admin::Admin;
pub use blog_post::{BlogCategory, BlogPost, BlogPostInput};
pub use contact_message::{ContactMessage, ContactMessageInput};
pub use project::{Metric, Project, ProjectInput};
pub use skill::{Skill, SkillInput, SkillUpdate};
