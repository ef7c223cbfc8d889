//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Writes that violate a foreign key must fail with
//! [`MarketError::InvalidReference`](crate::error::MarketError::InvalidReference).

use kernel::id::{ListingId, UserId};

use crate::domain::entity::{
    barter::{Barter, BarterSummary},
    listing::{Listing, ListingDetails, ListingFilter, ListingPatch},
    message::{Message, MessageView},
    order::{NewOrder, Order, OrderSummary},
    rating::{Rating, RatingView},
};
use crate::error::MarketResult;

#[trait_variant::make(ListingRepository: Send)]
pub trait LocalListingRepository {
    /// Filtered listings, newest first, at most `filter.limit` rows
    async fn search(&self, filter: &ListingFilter) -> MarketResult<Vec<ListingDetails>>;

    async fn find_details(&self, id: &ListingId) -> MarketResult<Option<ListingDetails>>;

    /// Listings owned by `owner`, newest first
    async fn list_by_owner(&self, owner: &UserId) -> MarketResult<Vec<ListingDetails>>;

    /// Insert the listing and its image URLs atomically
    async fn create(&self, listing: &Listing, images: &[String]) -> MarketResult<()>;

    /// Merge `patch` into the listing if `requester` owns it
    ///
    /// Fails with `ListingNotFound` or `NotListingOwner(Edit)`.
    async fn update_owned(
        &self,
        id: &ListingId,
        requester: &UserId,
        patch: ListingPatch,
    ) -> MarketResult<Listing>;

    /// Remove the listing and all its images, or nothing
    ///
    /// Fails with `ListingNotFound`, `NotListingOwner(Delete)` or, while messages,
    /// barters or orders still point at the listing, `ListingHasActivity`; each
    /// leaves both intact.
    async fn delete_owned(&self, id: &ListingId, requester: &UserId) -> MarketResult<()>;
}

#[trait_variant::make(BarterRepository: Send)]
pub trait LocalBarterRepository {
    async fn create(&self, barter: &Barter) -> MarketResult<Barter>;

    /// Barters where `user` is offerer or receiver
    async fn list_for_user(&self, user: &UserId) -> MarketResult<Vec<BarterSummary>>;
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Read the listing's owner and price and insert the order in one transaction
    ///
    /// Fails with `ListingNotFound` when the listing does not exist.
    async fn place(&self, order: &NewOrder) -> MarketResult<Order>;

    /// Orders where `user` is buyer or seller, newest first
    async fn list_for_user(&self, user: &UserId) -> MarketResult<Vec<OrderSummary>>;
}

#[trait_variant::make(MessageRepository: Send)]
pub trait LocalMessageRepository {
    async fn create(&self, message: &Message) -> MarketResult<Message>;

    /// Whole thread of a listing, oldest first
    async fn list_by_listing(&self, listing: &ListingId) -> MarketResult<Vec<MessageView>>;
}

#[trait_variant::make(RatingRepository: Send)]
pub trait LocalRatingRepository {
    async fn create(&self, rating: &Rating) -> MarketResult<Rating>;

    /// Ratings received by `user`, newest first
    async fn list_received(&self, user: &UserId) -> MarketResult<Vec<RatingView>>;
}

/// Every market repository, as needed by the router
pub trait MarketRepository:
    ListingRepository + BarterRepository + OrderRepository + MessageRepository + RatingRepository
{
}

impl<T> MarketRepository for T where
    T: ListingRepository
        + BarterRepository
        + OrderRepository
        + MessageRepository
        + RatingRepository
{
}
