//! Rating Entity
//!
//! A rating is attached to exactly one completed exchange: a barter or an
//! order, never both and never neither.

use chrono::{DateTime, Utc};
use kernel::id::{BarterId, OrderId, RatingId, UserId};

use crate::error::{MarketError, MarketResult};

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTarget {
    Barter(BarterId),
    Order(OrderId),
}

impl RatingTarget {
    pub fn from_parts(barter: Option<BarterId>, order: Option<OrderId>) -> MarketResult<Self> {
        match (barter, order) {
            (Some(b), None) => Ok(RatingTarget::Barter(b)),
            (None, Some(o)) => Ok(RatingTarget::Order(o)),
            (None, None) => Err(MarketError::Validation(
                "Debe asociarse a un trueque_id o a un orden_id",
            )),
            (Some(_), Some(_)) => Err(MarketError::Validation(
                "Debe asociarse a un trueque_id o a un orden_id, no a ambos",
            )),
        }
    }

    pub fn barter_id(&self) -> Option<BarterId> {
        match self {
            RatingTarget::Barter(id) => Some(*id),
            RatingTarget::Order(_) => None,
        }
    }

    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            RatingTarget::Order(id) => Some(*id),
            RatingTarget::Barter(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: RatingId,
    pub target: RatingTarget,
    pub author_id: UserId,
    pub recipient_id: UserId,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(
        target: RatingTarget,
        author_id: UserId,
        recipient_id: UserId,
        score: i16,
        comment: Option<String>,
    ) -> MarketResult<Self> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(MarketError::Validation("El puntaje debe estar entre 1 y 5"));
        }
        if author_id == recipient_id {
            return Err(MarketError::Validation("No puedes calificarte a ti mismo"));
        }

        Ok(Self {
            id: RatingId::new(),
            target,
            author_id,
            recipient_id,
            score,
            comment,
            created_at: Utc::now(),
        })
    }
}

/// Received rating with the author's name
#[derive(Debug, Clone, PartialEq)]
pub struct RatingView {
    pub rating: Rating,
    pub author_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_exclusive_or() {
        assert!(RatingTarget::from_parts(None, None).is_err());
        assert!(RatingTarget::from_parts(Some(BarterId::new()), Some(OrderId::new())).is_err());
        assert!(matches!(
            RatingTarget::from_parts(Some(BarterId::new()), None),
            Ok(RatingTarget::Barter(_))
        ));
        assert!(matches!(
            RatingTarget::from_parts(None, Some(OrderId::new())),
            Ok(RatingTarget::Order(_))
        ));
    }

    #[test]
    fn test_score_range() {
        let target = RatingTarget::Order(OrderId::new());
        for score in [0, 6, -1] {
            assert!(Rating::new(target, UserId::new(), UserId::new(), score, None).is_err());
        }
        for score in 1..=5 {
            assert!(Rating::new(target, UserId::new(), UserId::new(), score, None).is_ok());
        }
    }

    #[test]
    fn test_cannot_rate_self() {
        let me = UserId::new();
        assert!(matches!(
            Rating::new(RatingTarget::Order(OrderId::new()), me, me, 5, None),
            Err(MarketError::Validation("No puedes calificarte a ti mismo"))
        ));
    }
}
