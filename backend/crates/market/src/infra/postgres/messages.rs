use chrono::{DateTime, Utc};
use kernel::id::{ListingId, MessageId, UserId};
use uuid::Uuid;

use super::{PgMarketRepository, write_error};
use crate::domain::entity::message::{Message, MessageView};
use crate::domain::repository::MessageRepository;
use crate::error::MarketResult;

impl MessageRepository for PgMarketRepository {
    async fn create(&self, message: &Message) -> MarketResult<Message> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO mensajes (id, publicacion_id, remitente_id, destinatario_id, contenido, enviado_en)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, publicacion_id, remitente_id, destinatario_id, contenido, enviado_en
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.listing_id.as_uuid())
        .bind(message.sender_id.as_uuid())
        .bind(message.recipient_id.as_uuid())
        .bind(&message.content)
        .bind(message.sent_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(row.into_message())
    }

    async fn list_by_listing(&self, listing: &ListingId) -> MarketResult<Vec<MessageView>> {
        let rows = sqlx::query_as::<_, MessageViewRow>(
            r#"
            SELECT
                m.id,
                m.publicacion_id,
                m.remitente_id,
                m.destinatario_id,
                m.contenido,
                m.enviado_en,
                urem.nombre AS remitente_nombre,
                udes.nombre AS destinatario_nombre
            FROM mensajes m
            JOIN usuarios urem ON m.remitente_id = urem.id
            JOIN usuarios udes ON m.destinatario_id = udes.id
            WHERE m.publicacion_id = $1
            ORDER BY m.enviado_en ASC
            "#,
        )
        .bind(listing.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MessageView {
                message: r.message.into_message(),
                sender_name: r.remitente_nombre,
                recipient_name: r.destinatario_nombre,
            })
            .collect())
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    publicacion_id: Uuid,
    remitente_id: Uuid,
    destinatario_id: Uuid,
    contenido: String,
    enviado_en: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: MessageId::from_uuid(self.id),
            listing_id: ListingId::from_uuid(self.publicacion_id),
            sender_id: UserId::from_uuid(self.remitente_id),
            recipient_id: UserId::from_uuid(self.destinatario_id),
            content: self.contenido,
            sent_at: self.enviado_en,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageViewRow {
    #[sqlx(flatten)]
    message: MessageRow,
    remitente_nombre: String,
    destinatario_nombre: String,
}
