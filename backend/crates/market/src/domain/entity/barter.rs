//! Barter Entity

use chrono::{DateTime, Utc};
use kernel::id::{BarterId, ListingId, UserId};
use rust_decimal::Decimal;

use crate::error::{MarketError, MarketResult};

/// Status of a barter or order that nobody has acted on yet
pub const STATUS_PENDING: &str = "pendiente";

/// Proposal to exchange around a listing, from `offerer` to `receiver`
#[derive(Debug, Clone, PartialEq)]
pub struct Barter {
    pub id: BarterId,
    pub listing_id: ListingId,
    pub offerer_id: UserId,
    pub receiver_id: UserId,
    pub status: String,
    pub agreed_at: Option<DateTime<Utc>>,
}

impl Barter {
    /// A pending proposal; offerer and receiver must be different accounts
    pub fn propose(listing_id: ListingId, offerer_id: UserId, receiver_id: UserId) -> MarketResult<Self> {
        if offerer_id == receiver_id {
            return Err(MarketError::Validation(
                "No puedes proponerte un trueque a ti mismo",
            ));
        }

        Ok(Self {
            id: BarterId::new(),
            listing_id,
            offerer_id,
            receiver_id,
            status: STATUS_PENDING.to_string(),
            agreed_at: None,
        })
    }
}

/// Barter joined with its listing and both participants' names
#[derive(Debug, Clone, PartialEq)]
pub struct BarterSummary {
    pub id: BarterId,
    pub status: String,
    pub agreed_at: Option<DateTime<Utc>>,
    pub listing_id: ListingId,
    pub listing_title: String,
    pub listing_modality: String,
    pub listing_kind: String,
    pub listing_price: Option<Decimal>,
    pub offerer_id: UserId,
    pub offerer_name: String,
    pub receiver_id: UserId,
    pub receiver_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propose_is_pending() {
        let barter = Barter::propose(ListingId::new(), UserId::new(), UserId::new()).unwrap();
        assert_eq!(barter.status, "pendiente");
        assert!(barter.agreed_at.is_none());
    }

    #[test]
    fn test_propose_to_self_rejected() {
        let me = UserId::new();
        assert!(matches!(
            Barter::propose(ListingId::new(), me, me),
            Err(MarketError::Validation(_))
        ));
    }
}
