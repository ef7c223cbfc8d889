//! API DTOs (Data Transfer Objects)
//!
//! Responses are flat and keep the table column names (`usuario_id`,
//! `monto_total`, ...), which is what existing clients read.

use chrono::{DateTime, Utc};
use kernel::id::{BarterId, ListingId, OrderId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::barter::{Barter, BarterSummary};
use crate::domain::entity::listing::{Listing, ListingDetails};
use crate::domain::entity::message::{Message, MessageView};
use crate::domain::entity::order::{Order, OrderSummary};
use crate::domain::entity::rating::{Rating, RatingView};

// ============================================================================
// Listings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub categoria_id: Option<i32>,
    pub modalidad: Option<String>,
    pub tipo: Option<String>,
    pub q: Option<String>,
}

/// Create request; required fields are optional here so that a missing one
/// yields "Faltan campos obligatorios" instead of a parse error
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateListingRequest {
    pub categoria_id: Option<i32>,
    pub modalidad: Option<String>,
    pub tipo: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Decimal>,
    pub facultad: Option<String>,
    pub imagenes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListingRequest {
    pub categoria_id: Option<i32>,
    pub modalidad: Option<String>,
    pub tipo: Option<String>,
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<Decimal>,
    pub facultad: Option<String>,
    pub estado: Option<String>,
}

/// Stored listing row, returned by update
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub categoria_id: Option<i32>,
    pub modalidad: String,
    pub tipo: String,
    pub titulo: String,
    pub descripcion: String,
    pub precio: Option<Decimal>,
    pub facultad: Option<String>,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id.into_uuid(),
            usuario_id: l.owner_id.into_uuid(),
            categoria_id: l.category_id,
            modalidad: l.modality,
            tipo: l.kind,
            titulo: l.title,
            descripcion: l.description,
            precio: l.price,
            facultad: l.faculty,
            estado: l.status,
            created_at: l.created_at,
        }
    }
}

/// Listing enriched with category, owner and images
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetailsResponse {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub precio: Option<Decimal>,
    pub modalidad: String,
    pub tipo: String,
    pub estado: String,
    pub created_at: DateTime<Utc>,
    pub facultad: Option<String>,
    pub categoria_id: Option<i32>,
    pub categoria_nombre: Option<String>,
    pub usuario_id: Uuid,
    pub usuario_nombre: String,
    pub correo_institucional: String,
    pub imagenes: Vec<String>,
}

impl From<ListingDetails> for ListingDetailsResponse {
    fn from(d: ListingDetails) -> Self {
        let l = d.listing;
        Self {
            id: l.id.into_uuid(),
            titulo: l.title,
            descripcion: l.description,
            precio: l.price,
            modalidad: l.modality,
            tipo: l.kind,
            estado: l.status,
            created_at: l.created_at,
            facultad: l.faculty,
            categoria_id: l.category_id,
            categoria_nombre: d.category_name,
            usuario_id: l.owner_id.into_uuid(),
            usuario_nombre: d.owner_name,
            correo_institucional: d.owner_email,
            imagenes: d.images,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingCreatedResponse {
    pub id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Barters
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposeBarterRequest {
    pub publicacion_id: Option<ListingId>,
    pub receptor_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarterResponse {
    pub id: Uuid,
    pub publicacion_id: Uuid,
    pub oferente_id: Uuid,
    pub receptor_id: Uuid,
    pub estado: String,
    pub acordado_en: Option<DateTime<Utc>>,
}

impl From<Barter> for BarterResponse {
    fn from(b: Barter) -> Self {
        Self {
            id: b.id.into_uuid(),
            publicacion_id: b.listing_id.into_uuid(),
            oferente_id: b.offerer_id.into_uuid(),
            receptor_id: b.receiver_id.into_uuid(),
            estado: b.status,
            acordado_en: b.agreed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BarterSummaryResponse {
    pub id: Uuid,
    pub estado: String,
    pub acordado_en: Option<DateTime<Utc>>,
    pub publicacion_id: Uuid,
    pub titulo: String,
    pub modalidad: String,
    pub tipo: String,
    pub precio: Option<Decimal>,
    pub oferente_id: Uuid,
    pub oferente_nombre: String,
    pub receptor_id: Uuid,
    pub receptor_nombre: String,
}

impl From<BarterSummary> for BarterSummaryResponse {
    fn from(s: BarterSummary) -> Self {
        Self {
            id: s.id.into_uuid(),
            estado: s.status,
            acordado_en: s.agreed_at,
            publicacion_id: s.listing_id.into_uuid(),
            titulo: s.listing_title,
            modalidad: s.listing_modality,
            tipo: s.listing_kind,
            precio: s.listing_price,
            oferente_id: s.offerer_id.into_uuid(),
            oferente_nombre: s.offerer_name,
            receptor_id: s.receiver_id.into_uuid(),
            receptor_nombre: s.receiver_name,
        }
    }
}

// ============================================================================
// Orders
// ============================================================================

/// Only the listing and quantity are read; seller and total come from the listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceOrderRequest {
    pub publicacion_id: Option<ListingId>,
    pub cantidad: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub publicacion_id: Uuid,
    pub comprador_id: Uuid,
    pub vendedor_id: Uuid,
    pub cantidad: i32,
    pub monto_total: Decimal,
    pub estado: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.into_uuid(),
            publicacion_id: o.listing_id.into_uuid(),
            comprador_id: o.buyer_id.into_uuid(),
            vendedor_id: o.seller_id.into_uuid(),
            cantidad: o.quantity,
            monto_total: o.total,
            estado: o.status,
            created_at: o.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub titulo: String,
    pub comprador_nombre: String,
    pub vendedor_nombre: String,
}

impl From<OrderSummary> for OrderSummaryResponse {
    fn from(s: OrderSummary) -> Self {
        Self {
            order: s.order.into(),
            titulo: s.listing_title,
            comprador_nombre: s.buyer_name,
            vendedor_nombre: s.seller_name,
        }
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    pub publicacion_id: Option<ListingId>,
    pub destinatario_id: Option<UserId>,
    pub contenido: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageResponse {
    pub id: Uuid,
    pub publicacion_id: Uuid,
    pub remitente_id: Uuid,
    pub destinatario_id: Uuid,
    pub contenido: String,
    pub enviado_en: DateTime<Utc>,
}

impl From<Message> for ChatMessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id.into_uuid(),
            publicacion_id: m.listing_id.into_uuid(),
            remitente_id: m.sender_id.into_uuid(),
            destinatario_id: m.recipient_id.into_uuid(),
            contenido: m.content,
            enviado_en: m.sent_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageViewResponse {
    #[serde(flatten)]
    pub message: ChatMessageResponse,
    pub remitente_nombre: String,
    pub destinatario_nombre: String,
}

impl From<MessageView> for ChatMessageViewResponse {
    fn from(v: MessageView) -> Self {
        Self {
            message: v.message.into(),
            remitente_nombre: v.sender_name,
            destinatario_nombre: v.recipient_name,
        }
    }
}

// ============================================================================
// Ratings
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateRequest {
    pub trueque_id: Option<BarterId>,
    pub orden_id: Option<OrderId>,
    pub receptor_id: Option<UserId>,
    pub puntaje: Option<i16>,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: Uuid,
    pub trueque_id: Option<Uuid>,
    pub orden_id: Option<Uuid>,
    pub autor_id: Uuid,
    pub receptor_id: Uuid,
    pub puntaje: i16,
    pub comentario: Option<String>,
    pub creado_en: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id.into_uuid(),
            trueque_id: r.target.barter_id().map(BarterId::into_uuid),
            orden_id: r.target.order_id().map(OrderId::into_uuid),
            autor_id: r.author_id.into_uuid(),
            receptor_id: r.recipient_id.into_uuid(),
            puntaje: r.score,
            comentario: r.comment,
            creado_en: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingViewResponse {
    #[serde(flatten)]
    pub rating: RatingResponse,
    pub autor_nombre: String,
}

impl From<RatingView> for RatingViewResponse {
    fn from(v: RatingView) -> Self {
        Self {
            rating: v.rating.into(),
            autor_nombre: v.author_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_ignores_client_totals() {
        let listing = Uuid::new_v4();
        let req: PlaceOrderRequest = serde_json::from_value(json!({
            "publicacion_id": listing,
            "cantidad": 2,
            "vendedor_id": Uuid::new_v4(),
            "monto_total": "1",
        }))
        .unwrap();

        assert_eq!(req.publicacion_id.map(ListingId::into_uuid), Some(listing));
        assert_eq!(req.cantidad, Some(2));
    }

    #[test]
    fn test_price_accepts_number_or_string() {
        let from_number: CreateListingRequest =
            serde_json::from_value(json!({ "precio": 1500 })).unwrap();
        let from_string: CreateListingRequest =
            serde_json::from_value(json!({ "precio": "1500" })).unwrap();
        assert_eq!(from_number.precio, from_string.precio);
    }
}
