//! Marketplace Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Public listing search and detail, owner-only edit and delete
//! - Barter proposals and purchase orders between students
//! - Per-listing message threads
//! - Ratings tied to exactly one barter or order
//!
//! Authentication is delegated to the `auth` crate's bearer gate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::MarketConfig;
pub use error::{MarketError, MarketResult};
pub use infra::postgres::PgMarketRepository;
pub use presentation::router::{market_router, market_router_generic};
