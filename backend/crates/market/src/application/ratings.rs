//! Rating Use Case

use std::sync::Arc;

use kernel::id::{BarterId, OrderId, UserId};

use crate::application::non_blank;
use crate::domain::entity::rating::{Rating, RatingTarget, RatingView};
use crate::domain::repository::RatingRepository;
use crate::error::{MarketError, MarketResult};

pub struct RateInput {
    pub barter_id: Option<BarterId>,
    pub order_id: Option<OrderId>,
    pub recipient_id: Option<UserId>,
    pub score: Option<i16>,
    pub comment: Option<String>,
}

pub struct RatingUseCase<R>
where
    R: RatingRepository,
{
    repo: Arc<R>,
}

impl<R> RatingUseCase<R>
where
    R: RatingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn rate(&self, author: UserId, input: RateInput) -> MarketResult<Rating> {
        let (Some(recipient_id), Some(score)) = (input.recipient_id, input.score) else {
            return Err(MarketError::MissingFields(
                "receptor_id y puntaje son obligatorios",
            ));
        };

        let target = RatingTarget::from_parts(input.barter_id, input.order_id)?;
        let rating = Rating::new(target, author, recipient_id, score, non_blank(input.comment))?;
        let stored = self.repo.create(&rating).await?;

        tracing::info!(
            rating_id = %stored.id,
            recipient_id = %stored.recipient_id,
            score = stored.score,
            "Rating created"
        );

        Ok(stored)
    }

    pub async fn received_by(&self, user: &UserId) -> MarketResult<Vec<RatingView>> {
        self.repo.list_received(user).await
    }
}
