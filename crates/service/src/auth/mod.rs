//! Admin identity: three-layer architecture (domain, repository, service).
//!
//! Passwords are stored as argon2 PHC strings; the web layer only ever sees `AdminUser`.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
