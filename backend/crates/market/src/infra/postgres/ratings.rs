use chrono::{DateTime, Utc};
use kernel::id::{BarterId, OrderId, RatingId, UserId};
use uuid::Uuid;

use super::{PgMarketRepository, write_error};
use crate::domain::entity::rating::{Rating, RatingTarget, RatingView};
use crate::domain::repository::RatingRepository;
use crate::error::{MarketError, MarketResult};

impl RatingRepository for PgMarketRepository {
    async fn create(&self, rating: &Rating) -> MarketResult<Rating> {
        let row = sqlx::query_as::<_, RatingRow>(
            r#"
            INSERT INTO calificaciones (
                id,
                trueque_id,
                orden_id,
                autor_id,
                receptor_id,
                puntaje,
                comentario,
                creado_en
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                trueque_id,
                orden_id,
                autor_id,
                receptor_id,
                puntaje,
                comentario,
                creado_en
            "#,
        )
        .bind(rating.id.as_uuid())
        .bind(rating.target.barter_id().map(BarterId::into_uuid))
        .bind(rating.target.order_id().map(OrderId::into_uuid))
        .bind(rating.author_id.as_uuid())
        .bind(rating.recipient_id.as_uuid())
        .bind(rating.score)
        .bind(&rating.comment)
        .bind(rating.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        row.into_rating()
    }

    async fn list_received(&self, user: &UserId) -> MarketResult<Vec<RatingView>> {
        let rows = sqlx::query_as::<_, RatingViewRow>(
            r#"
            SELECT
                c.id,
                c.trueque_id,
                c.orden_id,
                c.autor_id,
                c.receptor_id,
                c.puntaje,
                c.comentario,
                c.creado_en,
                uautor.nombre AS autor_nombre
            FROM calificaciones c
            JOIN usuarios uautor ON c.autor_id = uautor.id
            WHERE c.receptor_id = $1
            ORDER BY c.creado_en DESC
            "#,
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                Ok(RatingView {
                    rating: r.rating.into_rating()?,
                    author_name: r.autor_nombre,
                })
            })
            .collect()
    }
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    trueque_id: Option<Uuid>,
    orden_id: Option<Uuid>,
    autor_id: Uuid,
    receptor_id: Uuid,
    puntaje: i16,
    comentario: Option<String>,
    creado_en: DateTime<Utc>,
}

impl RatingRow {
    fn into_rating(self) -> MarketResult<Rating> {
        // The table CHECK guarantees exactly one; anything else is corrupt data
        let target = RatingTarget::from_parts(
            self.trueque_id.map(BarterId::from_uuid),
            self.orden_id.map(OrderId::from_uuid),
        )
        .map_err(|_| MarketError::Internal(format!("Rating {} has no single target", self.id)))?;

        Ok(Rating {
            id: RatingId::from_uuid(self.id),
            target,
            author_id: UserId::from_uuid(self.autor_id),
            recipient_id: UserId::from_uuid(self.receptor_id),
            score: self.puntaje,
            comment: self.comentario,
            created_at: self.creado_en,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RatingViewRow {
    #[sqlx(flatten)]
    rating: RatingRow,
    autor_nombre: String,
}
