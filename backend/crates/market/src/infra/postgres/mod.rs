//! PostgreSQL Repository Implementations
//!
//! One pool-backed repository implements every market trait; each resource's
//! queries live in their own module.

mod barters;
mod listings;
mod messages;
mod orders;
mod ratings;

use sqlx::PgPool;

use crate::error::MarketError;

/// PostgreSQL-backed marketplace repository
#[derive(Clone)]
pub struct PgMarketRepository {
    pool: PgPool,
}

impl PgMarketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// SQLSTATE for `numeric_value_out_of_range`
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Map insert/update failures, turning dangling references into a client error
fn write_error(err: sqlx::Error) -> MarketError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            MarketError::InvalidReference
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) => {
            MarketError::Validation("Valor numérico fuera del rango permitido")
        }
        _ => MarketError::Database(err),
    }
}

/// Map the listing delete, where a foreign key violation means other rows still point at it
fn delete_error(err: sqlx::Error) -> MarketError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            MarketError::ListingHasActivity
        }
        _ => MarketError::Database(err),
    }
}
