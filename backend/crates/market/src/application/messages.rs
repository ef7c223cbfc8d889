//! Message Use Case

use std::sync::Arc;

use kernel::id::{ListingId, UserId};

use crate::application::non_blank;
use crate::domain::entity::message::{Message, MessageView};
use crate::domain::repository::MessageRepository;
use crate::error::{MarketError, MarketResult};

pub struct SendMessageInput {
    pub listing_id: Option<ListingId>,
    pub recipient_id: Option<UserId>,
    pub content: Option<String>,
}

pub struct MessageUseCase<R>
where
    R: MessageRepository,
{
    repo: Arc<R>,
}

impl<R> MessageUseCase<R>
where
    R: MessageRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn send(&self, sender: UserId, input: SendMessageInput) -> MarketResult<Message> {
        let (Some(listing_id), Some(recipient_id), Some(content)) = (
            input.listing_id,
            input.recipient_id,
            non_blank(input.content),
        ) else {
            return Err(MarketError::MissingFields(
                "publicacion_id, destinatario_id y contenido son obligatorios",
            ));
        };

        let message = Message::new(listing_id, sender, recipient_id, content);
        let stored = self.repo.create(&message).await?;

        tracing::debug!(message_id = %stored.id, listing_id = %listing_id, "Message sent");

        Ok(stored)
    }

    /// Every message of the listing, visible to any signed-in user
    pub async fn thread(&self, listing: &ListingId) -> MarketResult<Vec<MessageView>> {
        self.repo.list_by_listing(listing).await
    }
}
