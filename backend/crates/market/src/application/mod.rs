//! Application Layer
//!
//! One use case per resource; each validates input before touching storage.

pub mod barters;
pub mod config;
pub mod listings;
pub mod messages;
pub mod orders;
pub mod ratings;

// Re-exports
pub use barters::{BarterUseCase, ProposeBarterInput};
pub use config::MarketConfig;
pub use listings::{CreateListingInput, ListingUseCase, SearchInput, UpdateListingInput};
pub use messages::{MessageUseCase, SendMessageInput};
pub use orders::{OrderUseCase, PlaceOrderInput};
pub use ratings::{RateInput, RatingUseCase};

/// Trimmed value, or `None` when absent or blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
