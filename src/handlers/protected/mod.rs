// handlers/protected/mod.rs - Admin handlers (bearer token required)
//
// Every handler here takes `AuthAdmin` as its first argument; the extractor
// rejects missing or invalid tokens with 401 before the body is read.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod projects;
pub mod skills;
pub mod upload;
