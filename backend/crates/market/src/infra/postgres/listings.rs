use chrono::{DateTime, Utc};
use kernel::id::{ListingId, UserId};
use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use super::{PgMarketRepository, delete_error, write_error};
use crate::domain::entity::listing::{
    Listing, ListingAction, ListingDetails, ListingFilter, ListingPatch, ensure_owner,
    escape_like,
};
use crate::domain::repository::ListingRepository;
use crate::error::{MarketError, MarketResult};

/// Listing with category name, owner name/email and image URLs
const DETAILS_SELECT: &str = r#"
    SELECT
        p.id,
        p.usuario_id,
        p.categoria_id,
        p.modalidad,
        p.tipo,
        p.titulo,
        p.descripcion,
        p.precio,
        p.facultad,
        p.estado,
        p.created_at,
        c.nombre AS categoria_nombre,
        u.nombre AS usuario_nombre,
        u.correo_institucional,
        COALESCE(
            (
                SELECT array_agg(i.url ORDER BY i.id)
                FROM imagenes_publicacion i
                WHERE i.publicacion_id = p.id
            ),
            '{}'
        ) AS imagenes
    FROM publicaciones p
    LEFT JOIN categorias c ON p.categoria_id = c.id
    JOIN usuarios u ON p.usuario_id = u.id
"#;

impl ListingRepository for PgMarketRepository {
    async fn search(&self, filter: &ListingFilter) -> MarketResult<Vec<ListingDetails>> {
        let mut query = QueryBuilder::<Postgres>::new(DETAILS_SELECT);
        query.push(" WHERE TRUE");

        if let Some(category_id) = filter.category_id {
            query.push(" AND p.categoria_id = ").push_bind(category_id);
        }
        if let Some(modality) = &filter.modality {
            query.push(" AND p.modalidad = ").push_bind(modality.clone());
        }
        if let Some(kind) = &filter.kind {
            query.push(" AND p.tipo = ").push_bind(kind.clone());
        }
        if let Some(text) = &filter.text {
            let pattern = format!("%{}%", escape_like(text));
            query
                .push(" AND (p.titulo ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.descripcion ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        query
            .push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(filter.limit);

        let rows = query
            .build_query_as::<ListingDetailsRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ListingDetailsRow::into_details).collect())
    }

    async fn find_details(&self, id: &ListingId) -> MarketResult<Option<ListingDetails>> {
        let row = sqlx::query_as::<_, ListingDetailsRow>(&format!(
            "{DETAILS_SELECT} WHERE p.id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ListingDetailsRow::into_details))
    }

    async fn list_by_owner(&self, owner: &UserId) -> MarketResult<Vec<ListingDetails>> {
        let rows = sqlx::query_as::<_, ListingDetailsRow>(&format!(
            "{DETAILS_SELECT} WHERE p.usuario_id = $1 ORDER BY p.created_at DESC"
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ListingDetailsRow::into_details).collect())
    }

    async fn create(&self, listing: &Listing, images: &[String]) -> MarketResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO publicaciones (
                id,
                usuario_id,
                categoria_id,
                modalidad,
                tipo,
                titulo,
                descripcion,
                precio,
                facultad,
                estado,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(listing.id.as_uuid())
        .bind(listing.owner_id.as_uuid())
        .bind(listing.category_id)
        .bind(&listing.modality)
        .bind(&listing.kind)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(&listing.faculty)
        .bind(&listing.status)
        .bind(listing.created_at)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;

        if !images.is_empty() {
            // One statement for all URLs, order preserved by the serial id
            sqlx::query(
                r#"
                INSERT INTO imagenes_publicacion (publicacion_id, url)
                SELECT $1::uuid, url FROM UNNEST($2::text[]) WITH ORDINALITY AS t(url, n)
                ORDER BY n
                "#,
            )
            .bind(listing.id.as_uuid())
            .bind(images)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_owned(
        &self,
        id: &ListingId,
        requester: &UserId,
        patch: ListingPatch,
    ) -> MarketResult<Listing> {
        let mut tx = self.pool.begin().await?;

        let owner = lock_owner(&mut tx, id).await?;
        ensure_owner(&owner, requester, ListingAction::Edit)?;

        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            UPDATE publicaciones SET
                categoria_id = COALESCE($2, categoria_id),
                modalidad    = COALESCE($3, modalidad),
                tipo         = COALESCE($4, tipo),
                titulo       = COALESCE($5, titulo),
                descripcion  = COALESCE($6, descripcion),
                precio       = COALESCE($7, precio),
                facultad     = COALESCE($8, facultad),
                estado       = COALESCE($9, estado)
            WHERE id = $1
            RETURNING
                id,
                usuario_id,
                categoria_id,
                modalidad,
                tipo,
                titulo,
                descripcion,
                precio,
                facultad,
                estado,
                created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.category_id)
        .bind(patch.modality)
        .bind(patch.kind)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.faculty)
        .bind(patch.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error)?;

        tx.commit().await?;
        Ok(row.into_listing())
    }

    async fn delete_owned(&self, id: &ListingId, requester: &UserId) -> MarketResult<()> {
        // Early returns drop `tx`, which rolls back
        let mut tx = self.pool.begin().await?;

        let owner = lock_owner(&mut tx, id).await?;
        ensure_owner(&owner, requester, ListingAction::Delete)?;

        sqlx::query("DELETE FROM imagenes_publicacion WHERE publicacion_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM publicaciones WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(delete_error)?;

        tx.commit().await?;
        Ok(())
    }
}

/// Owner of the listing, with the row locked for the rest of the transaction
async fn lock_owner(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    id: &ListingId,
) -> MarketResult<UserId> {
    let owner: Option<Uuid> =
        sqlx::query_scalar("SELECT usuario_id FROM publicaciones WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut **tx)
            .await?;

    owner
        .map(UserId::from_uuid)
        .ok_or(MarketError::ListingNotFound)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ListingRow {
    id: Uuid,
    usuario_id: Uuid,
    categoria_id: Option<i32>,
    modalidad: String,
    tipo: String,
    titulo: String,
    descripcion: String,
    precio: Option<Decimal>,
    facultad: Option<String>,
    estado: String,
    created_at: DateTime<Utc>,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        Listing {
            id: ListingId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.usuario_id),
            category_id: self.categoria_id,
            modality: self.modalidad,
            kind: self.tipo,
            title: self.titulo,
            description: self.descripcion,
            price: self.precio,
            faculty: self.facultad,
            status: self.estado,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListingDetailsRow {
    #[sqlx(flatten)]
    listing: ListingRow,
    categoria_nombre: Option<String>,
    usuario_nombre: String,
    correo_institucional: String,
    imagenes: Vec<String>,
}

impl ListingDetailsRow {
    fn into_details(self) -> ListingDetails {
        ListingDetails {
            listing: self.listing.into_listing(),
            category_name: self.categoria_nombre,
            owner_name: self.usuario_nombre,
            owner_email: self.correo_institucional,
            images: self.imagenes,
        }
    }
}
