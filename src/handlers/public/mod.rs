// handlers/public/mod.rs - Public handlers (no authentication required)

pub mod auth;
pub mod blog;
pub mod contact;
pub mod notion;
pub mod projects;
pub mod skills;
pub mod system;
