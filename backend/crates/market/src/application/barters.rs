//! Barter Use Case

use std::sync::Arc;

use kernel::id::{ListingId, UserId};

use crate::domain::entity::barter::{Barter, BarterSummary};
use crate::domain::repository::BarterRepository;
use crate::error::{MarketError, MarketResult};

pub struct ProposeBarterInput {
    pub listing_id: Option<ListingId>,
    pub receiver_id: Option<UserId>,
}

pub struct BarterUseCase<R>
where
    R: BarterRepository,
{
    repo: Arc<R>,
}

impl<R> BarterUseCase<R>
where
    R: BarterRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn propose(&self, offerer: UserId, input: ProposeBarterInput) -> MarketResult<Barter> {
        let (Some(listing_id), Some(receiver_id)) = (input.listing_id, input.receiver_id) else {
            return Err(MarketError::MissingFields(
                "publicacion_id y receptor_id son obligatorios",
            ));
        };

        let barter = Barter::propose(listing_id, offerer, receiver_id)?;
        let stored = self.repo.create(&barter).await?;

        tracing::info!(
            barter_id = %stored.id,
            listing_id = %stored.listing_id,
            "Barter proposed"
        );

        Ok(stored)
    }

    pub async fn list_mine(&self, user: &UserId) -> MarketResult<Vec<BarterSummary>> {
        self.repo.list_for_user(user).await
    }
}
