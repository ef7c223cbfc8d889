//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use repository::{
    BarterRepository, ListingRepository, MarketRepository, MessageRepository, OrderRepository,
    RatingRepository,
};
