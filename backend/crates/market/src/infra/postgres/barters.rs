use chrono::{DateTime, Utc};
use kernel::id::{BarterId, ListingId, UserId};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{PgMarketRepository, write_error};
use crate::domain::entity::barter::{Barter, BarterSummary};
use crate::domain::repository::BarterRepository;
use crate::error::MarketResult;

impl BarterRepository for PgMarketRepository {
    async fn create(&self, barter: &Barter) -> MarketResult<Barter> {
        let row = sqlx::query_as::<_, BarterRow>(
            r#"
            INSERT INTO trueques (id, publicacion_id, oferente_id, receptor_id, estado, acordado_en)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, publicacion_id, oferente_id, receptor_id, estado, acordado_en
            "#,
        )
        .bind(barter.id.as_uuid())
        .bind(barter.listing_id.as_uuid())
        .bind(barter.offerer_id.as_uuid())
        .bind(barter.receiver_id.as_uuid())
        .bind(&barter.status)
        .bind(barter.agreed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;

        Ok(row.into_barter())
    }

    async fn list_for_user(&self, user: &UserId) -> MarketResult<Vec<BarterSummary>> {
        let rows = sqlx::query_as::<_, BarterSummaryRow>(
            r#"
            SELECT
                t.id,
                t.estado,
                t.acordado_en,
                p.id AS publicacion_id,
                p.titulo,
                p.modalidad,
                p.tipo,
                p.precio,
                uo.id AS oferente_id,
                uo.nombre AS oferente_nombre,
                ur.id AS receptor_id,
                ur.nombre AS receptor_nombre
            FROM trueques t
            JOIN publicaciones p ON t.publicacion_id = p.id
            JOIN usuarios uo ON t.oferente_id = uo.id
            JOIN usuarios ur ON t.receptor_id = ur.id
            WHERE t.oferente_id = $1 OR t.receptor_id = $1
            ORDER BY t.acordado_en NULLS LAST, t.id DESC
            "#,
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BarterSummaryRow::into_summary).collect())
    }
}

#[derive(sqlx::FromRow)]
struct BarterRow {
    id: Uuid,
    publicacion_id: Uuid,
    oferente_id: Uuid,
    receptor_id: Uuid,
    estado: String,
    acordado_en: Option<DateTime<Utc>>,
}

impl BarterRow {
    fn into_barter(self) -> Barter {
        Barter {
            id: BarterId::from_uuid(self.id),
            listing_id: ListingId::from_uuid(self.publicacion_id),
            offerer_id: UserId::from_uuid(self.oferente_id),
            receiver_id: UserId::from_uuid(self.receptor_id),
            status: self.estado,
            agreed_at: self.acordado_en,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BarterSummaryRow {
    id: Uuid,
    estado: String,
    acordado_en: Option<DateTime<Utc>>,
    publicacion_id: Uuid,
    titulo: String,
    modalidad: String,
    tipo: String,
    precio: Option<Decimal>,
    oferente_id: Uuid,
    oferente_nombre: String,
    receptor_id: Uuid,
    receptor_nombre: String,
}

impl BarterSummaryRow {
    fn into_summary(self) -> BarterSummary {
        BarterSummary {
            id: BarterId::from_uuid(self.id),
            status: self.estado,
            agreed_at: self.acordado_en,
            listing_id: ListingId::from_uuid(self.publicacion_id),
            listing_title: self.titulo,
            listing_modality: self.modalidad,
            listing_kind: self.tipo,
            listing_price: self.precio,
            offerer_id: UserId::from_uuid(self.oferente_id),
            offerer_name: self.oferente_nombre,
            receiver_id: UserId::from_uuid(self.receptor_id),
            receiver_name: self.receptor_nombre,
        }
    }
}
