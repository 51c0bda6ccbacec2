// handlers/mod.rs - Two-tier handler layout
//
// Public handlers serve anonymous visitors (content reads, login, contact
// form, Notion proxy). Protected handlers take an `AuthAdmin` argument, so a
// valid bearer token is required before they run.
pub mod protected;
pub mod public;
