//! Listing Use Cases
//!
//! Browse, create, edit and delete listings, plus the owner's own list.

use std::sync::Arc;

use kernel::id::{ListingId, UserId};
use rust_decimal::Decimal;

use crate::application::config::MarketConfig;
use crate::application::non_blank;
use crate::domain::entity::listing::{
    Listing, ListingDetails, ListingFilter, ListingPatch, NewListing,
};
use crate::domain::repository::ListingRepository;
use crate::error::{MarketError, MarketResult};

#[derive(Debug, Default)]
pub struct SearchInput {
    pub category_id: Option<i32>,
    pub modality: Option<String>,
    pub kind: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Default)]
pub struct CreateListingInput {
    pub category_id: Option<i32>,
    pub modality: Option<String>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub faculty: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct UpdateListingInput {
    pub category_id: Option<i32>,
    pub modality: Option<String>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub faculty: Option<String>,
    pub status: Option<String>,
}

pub struct ListingUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
    config: Arc<MarketConfig>,
}

impl<R> ListingUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MarketConfig>) -> Self {
        Self { repo, config }
    }

    /// Public search; blank filters are ignored, no match is an empty list
    pub async fn search(&self, input: SearchInput) -> MarketResult<Vec<ListingDetails>> {
        let filter = ListingFilter {
            category_id: input.category_id,
            modality: non_blank(input.modality),
            kind: non_blank(input.kind),
            text: non_blank(input.q),
            limit: self.config.search_limit,
        };

        self.repo.search(&filter).await
    }

    pub async fn get(&self, id: &ListingId) -> MarketResult<ListingDetails> {
        self.repo
            .find_details(id)
            .await?
            .ok_or(MarketError::ListingNotFound)
    }

    pub async fn list_mine(&self, owner: &UserId) -> MarketResult<Vec<ListingDetails>> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn create(&self, owner: UserId, input: CreateListingInput) -> MarketResult<ListingId> {
        let (Some(modality), Some(kind), Some(title), Some(description)) = (
            non_blank(input.modality),
            non_blank(input.kind),
            non_blank(input.title),
            non_blank(input.description),
        ) else {
            return Err(MarketError::MissingFields("Faltan campos obligatorios"));
        };

        ensure_price(input.price)?;

        let images: Vec<String> = input
            .images
            .unwrap_or_default()
            .into_iter()
            .filter_map(|url| non_blank(Some(url)))
            .collect();

        let listing = Listing::new(NewListing {
            owner_id: owner,
            category_id: input.category_id,
            modality,
            kind,
            title,
            description,
            price: input.price,
            faculty: non_blank(input.faculty),
        });

        self.repo.create(&listing, &images).await?;

        tracing::info!(
            listing_id = %listing.id,
            owner_id = %owner,
            images = images.len(),
            "Listing created"
        );

        Ok(listing.id)
    }

    pub async fn update(
        &self,
        id: &ListingId,
        requester: &UserId,
        input: UpdateListingInput,
    ) -> MarketResult<Listing> {
        ensure_price(input.price)?;

        let patch = ListingPatch {
            category_id: input.category_id,
            modality: non_blank(input.modality),
            kind: non_blank(input.kind),
            title: non_blank(input.title),
            description: non_blank(input.description),
            price: input.price,
            faculty: non_blank(input.faculty),
            status: non_blank(input.status),
        };

        let listing = self.repo.update_owned(id, requester, patch).await?;

        tracing::info!(listing_id = %id, "Listing updated");

        Ok(listing)
    }

    pub async fn delete(&self, id: &ListingId, requester: &UserId) -> MarketResult<()> {
        self.repo.delete_owned(id, requester).await?;

        tracing::info!(listing_id = %id, "Listing deleted");

        Ok(())
    }
}

/// Largest price the `publicaciones.precio NUMERIC(12, 2)` column holds
fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Prices are stored exactly, so anything the column would round or refuse is rejected here
fn ensure_price(price: Option<Decimal>) -> MarketResult<()> {
    let Some(p) = price else {
        return Ok(());
    };

    if p.is_sign_negative() && !p.is_zero() {
        return Err(MarketError::Validation("El precio no puede ser negativo"));
    }
    if p.normalize().scale() > 2 {
        return Err(MarketError::Validation(
            "El precio admite como máximo 2 decimales",
        ));
    }
    if p > max_price() {
        return Err(MarketError::Validation(
            "El precio excede el máximo permitido",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_price() {
        assert!(ensure_price(None).is_ok());
        assert!(ensure_price(Some(Decimal::ZERO)).is_ok());
        assert!(ensure_price(Some(Decimal::new(1000, 0))).is_ok());
        assert!(ensure_price(Some(Decimal::new(-1, 2))).is_err());
    }

    #[test]
    fn test_price_scale_is_limited_to_cents() {
        assert!(ensure_price(Some(Decimal::new(1050, 2))).is_ok());
        // Trailing zeros do not count as extra precision
        assert!(ensure_price(Some(Decimal::new(10_500, 3))).is_ok());
        assert!(matches!(
            ensure_price(Some(Decimal::new(10_005, 3))),
            Err(MarketError::Validation(msg)) if msg.contains("2 decimales")
        ));
    }

    #[test]
    fn test_price_upper_bound() {
        assert!(ensure_price(Some(max_price())).is_ok());
        assert!(matches!(
            ensure_price(Some(Decimal::new(1_000_000_000_000, 2))),
            Err(MarketError::Validation(msg)) if msg.contains("máximo permitido")
        ));
    }
}
