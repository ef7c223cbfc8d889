//! Order Entity
//!
//! The total is fixed when the order is placed: listing price at that moment
//! times quantity. Later price edits never touch existing orders.

use chrono::{DateTime, Utc};
use kernel::id::{ListingId, OrderId, UserId};
use rust_decimal::Decimal;

use crate::domain::entity::barter::STATUS_PENDING;
use crate::error::{MarketError, MarketResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub listing_id: ListingId,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub quantity: i32,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Purchase request as submitted by the buyer
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub listing_id: ListingId,
    pub buyer_id: UserId,
    pub quantity: i32,
}

impl Order {
    /// Price the order against the listing state read inside the placing transaction
    pub fn place(
        input: &NewOrder,
        seller_id: UserId,
        unit_price: Option<Decimal>,
    ) -> MarketResult<Self> {
        let price = unit_price.ok_or(MarketError::Validation("La publicación no tiene precio"))?;

        Ok(Self {
            id: OrderId::new(),
            listing_id: input.listing_id,
            buyer_id: input.buyer_id,
            seller_id,
            quantity: input.quantity,
            total: Self::total_for(price, input.quantity)?,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        })
    }

    pub fn total_for(unit_price: Decimal, quantity: i32) -> MarketResult<Decimal> {
        unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or(MarketError::Validation("El monto total excede el máximo permitido"))
    }
}

/// Order joined with its listing title and both parties' names
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order: Order,
    pub listing_title: String,
    pub buyer_name: String,
    pub seller_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_price_times_quantity() {
        assert_eq!(
            Order::total_for(Decimal::new(1000, 0), 3).unwrap(),
            Decimal::new(3000, 0)
        );
        assert_eq!(
            Order::total_for(Decimal::new(1250, 2), 4).unwrap(),
            Decimal::new(5000, 2)
        );
    }

    #[test]
    fn test_total_at_price_ceiling() {
        let ceiling = Decimal::new(999_999_999_999, 2);
        assert_eq!(
            Order::total_for(ceiling, 1000).unwrap(),
            Decimal::new(999_999_999_999_000, 2)
        );
        assert!(Order::total_for(ceiling, i32::MAX).is_ok());
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        assert!(matches!(
            Order::total_for(Decimal::MAX, 2),
            Err(MarketError::Validation(_))
        ));
    }

    #[test]
    fn test_place_sets_parties_and_status() {
        let buyer = UserId::new();
        let seller = UserId::new();
        let input = NewOrder {
            listing_id: ListingId::new(),
            buyer_id: buyer,
            quantity: 3,
        };

        let order = Order::place(&input, seller, Some(Decimal::new(1000, 0))).unwrap();
        assert_eq!(order.buyer_id, buyer);
        assert_eq!(order.seller_id, seller);
        assert_eq!(order.total, Decimal::new(3000, 0));
        assert_eq!(order.status, "pendiente");
    }

    #[test]
    fn test_place_without_price() {
        let input = NewOrder {
            listing_id: ListingId::new(),
            buyer_id: UserId::new(),
            quantity: 1,
        };
        assert!(matches!(
            Order::place(&input, UserId::new(), None),
            Err(MarketError::Validation(_))
        ));
    }
}
