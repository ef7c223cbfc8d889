//! HTTP Handlers
//!
//! One module per resource. All handlers share [`MarketAppState`].

pub mod barters;
pub mod listings;
pub mod messages;
pub mod orders;
pub mod ratings;

use std::sync::Arc;

use crate::application::MarketConfig;
use crate::domain::repository::MarketRepository;

/// Shared state for market handlers
#[derive(Clone)]
pub struct MarketAppState<R>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<MarketConfig>,
}
