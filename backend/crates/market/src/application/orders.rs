//! Order Use Case
//!
//! Seller and total are derived server-side from the listing; the client
//! only chooses the listing and the quantity.

use std::sync::Arc;

use kernel::id::{ListingId, UserId};

use crate::domain::entity::order::{NewOrder, Order, OrderSummary};
use crate::domain::repository::OrderRepository;
use crate::error::{MarketError, MarketResult};

pub struct PlaceOrderInput {
    pub listing_id: Option<ListingId>,
    pub quantity: Option<i32>,
}

pub struct OrderUseCase<R>
where
    R: OrderRepository,
{
    repo: Arc<R>,
}

impl<R> OrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn place(&self, buyer: UserId, input: PlaceOrderInput) -> MarketResult<Order> {
        let (Some(listing_id), Some(quantity)) = (input.listing_id, input.quantity) else {
            return Err(MarketError::MissingFields(
                "publicacion_id y cantidad son obligatorios",
            ));
        };

        if quantity < 1 {
            return Err(MarketError::Validation("La cantidad debe ser al menos 1"));
        }

        let order = self
            .repo
            .place(&NewOrder {
                listing_id,
                buyer_id: buyer,
                quantity,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            listing_id = %order.listing_id,
            total = %order.total,
            "Order placed"
        );

        Ok(order)
    }

    pub async fn list_mine(&self, user: &UserId) -> MarketResult<Vec<OrderSummary>> {
        self.repo.list_for_user(user).await
    }
}
