//! Account (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Features
//! - Registration restricted to one institutional email domain
//! - Login returning a signed session token (HS256, 7 days)
//! - `me` endpoint and a reusable auth gate for other crates' routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown email and wrong password are indistinguishable to the client
//! - Password hash never leaves the persistence layer

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{CurrentUser, require_auth};
pub use presentation::router::{auth_router, auth_router_generic};
