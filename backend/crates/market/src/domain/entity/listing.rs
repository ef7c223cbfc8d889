//! Listing Entity
//!
//! A listing ("publicación") is an item or service offered by one user. The
//! owner is fixed at creation and is the only account allowed to edit or
//! delete it.

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::{ListingId, UserId};
use rust_decimal::Decimal;

use crate::error::{MarketError, MarketResult};

/// Status given to every new listing
pub const STATUS_ACTIVE: &str = "activo";

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: UserId,
    pub category_id: Option<i32>,
    /// Free-form modality label (e.g. "venta", "trueque")
    pub modality: String,
    /// Free-form type label (e.g. "producto", "servicio")
    pub kind: String,
    pub title: String,
    pub description: String,
    /// Absent for listings that cannot be bought
    pub price: Option<Decimal>,
    pub faculty: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Listing joined with its category, owner and images
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetails {
    pub listing: Listing,
    pub category_name: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub images: Vec<String>,
}

/// Fields accepted on create; the application layer fills id, status and timestamp
#[derive(Debug, Clone)]
pub struct NewListing {
    pub owner_id: UserId,
    pub category_id: Option<i32>,
    pub modality: String,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub faculty: Option<String>,
}

impl Listing {
    pub fn new(input: NewListing) -> Self {
        Self {
            id: ListingId::new(),
            owner_id: input.owner_id,
            category_id: input.category_id,
            modality: input.modality,
            kind: input.kind,
            title: input.title,
            description: input.description,
            price: input.price,
            faculty: input.faculty,
            status: STATUS_ACTIVE.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Owner check shared by the in-memory and SQL paths
pub fn ensure_owner(owner: &UserId, requester: &UserId, action: ListingAction) -> MarketResult<()> {
    if owner == requester {
        Ok(())
    } else {
        Err(MarketError::NotListingOwner(action))
    }
}

/// Owner-only mutation being attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAction {
    Edit,
    Delete,
}

impl fmt::Display for ListingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListingAction::Edit => "editar",
            ListingAction::Delete => "eliminar",
        })
    }
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub category_id: Option<i32>,
    pub modality: Option<String>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub faculty: Option<String>,
    pub status: Option<String>,
}

/// Search filters, all ANDed
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category_id: Option<i32>,
    pub modality: Option<String>,
    pub kind: Option<String>,
    /// Case-insensitive substring over title or description
    pub text: Option<String>,
    pub limit: i64,
}

/// Escape `%`, `_` and `\` so user text is matched literally by `ILIKE`
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(owner: UserId) -> Listing {
        Listing::new(NewListing {
            owner_id: owner,
            category_id: Some(1),
            modality: "venta".into(),
            kind: "producto".into(),
            title: "Calculadora Casio".into(),
            description: "Científica, poco uso".into(),
            price: Some(Decimal::new(45_000, 0)),
            faculty: None,
        })
    }

    #[test]
    fn test_new_listing_is_active() {
        let l = listing(UserId::new());
        assert_eq!(l.status, "activo");
    }

    #[test]
    fn test_owner_check() {
        let owner = UserId::new();
        let l = listing(owner);
        assert!(ensure_owner(&l.owner_id, &owner, ListingAction::Edit).is_ok());
        assert!(matches!(
            ensure_owner(&l.owner_id, &UserId::new(), ListingAction::Delete),
            Err(MarketError::NotListingOwner(ListingAction::Delete))
        ));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("libro"), "libro");
    }
}
