//! Application Configuration

/// Market application configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Maximum rows returned by the public listing search
    pub search_limit: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self { search_limit: 100 }
    }
}
