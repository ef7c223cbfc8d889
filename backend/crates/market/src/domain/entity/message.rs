//! Message Entity

use chrono::{DateTime, Utc};
use kernel::id::{ListingId, MessageId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub listing_id: ListingId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn new(listing_id: ListingId, sender_id: UserId, recipient_id: UserId, content: String) -> Self {
        Self {
            id: MessageId::new(),
            listing_id,
            sender_id,
            recipient_id,
            content,
            sent_at: Utc::now(),
        }
    }
}

/// Message with both parties' names, as shown in a listing thread
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub message: Message,
    pub sender_name: String,
    pub recipient_name: String,
}
