use chrono::{DateTime, Utc};
use kernel::id::{ListingId, OrderId, UserId};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{PgMarketRepository, write_error};
use crate::domain::entity::order::{NewOrder, Order, OrderSummary};
use crate::domain::repository::OrderRepository;
use crate::error::{MarketError, MarketResult};

impl OrderRepository for PgMarketRepository {
    async fn place(&self, input: &NewOrder) -> MarketResult<Order> {
        let mut tx = self.pool.begin().await?;

        // Shared lock: concurrent orders proceed, a price edit waits for commit
        let listing: Option<(Uuid, Option<Decimal>)> = sqlx::query_as(
            "SELECT usuario_id, precio FROM publicaciones WHERE id = $1 FOR SHARE",
        )
        .bind(input.listing_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let (seller, price) = listing.ok_or(MarketError::ListingNotFound)?;
        let order = Order::place(input, UserId::from_uuid(seller), price)?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO ordenes (
                id,
                publicacion_id,
                comprador_id,
                vendedor_id,
                cantidad,
                monto_total,
                estado,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id,
                publicacion_id,
                comprador_id,
                vendedor_id,
                cantidad,
                monto_total,
                estado,
                created_at
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.listing_id.as_uuid())
        .bind(order.buyer_id.as_uuid())
        .bind(order.seller_id.as_uuid())
        .bind(order.quantity)
        .bind(order.total)
        .bind(&order.status)
        .bind(order.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error)?;

        tx.commit().await?;
        Ok(row.into_order())
    }

    async fn list_for_user(&self, user: &UserId) -> MarketResult<Vec<OrderSummary>> {
        let rows = sqlx::query_as::<_, OrderSummaryRow>(
            r#"
            SELECT
                o.id,
                o.publicacion_id,
                o.comprador_id,
                o.vendedor_id,
                o.cantidad,
                o.monto_total,
                o.estado,
                o.created_at,
                p.titulo,
                uc.nombre AS comprador_nombre,
                uv.nombre AS vendedor_nombre
            FROM ordenes o
            JOIN publicaciones p ON o.publicacion_id = p.id
            JOIN usuarios uc ON o.comprador_id = uc.id
            JOIN usuarios uv ON o.vendedor_id = uv.id
            WHERE o.comprador_id = $1 OR o.vendedor_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(user.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderSummaryRow::into_summary).collect())
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    publicacion_id: Uuid,
    comprador_id: Uuid,
    vendedor_id: Uuid,
    cantidad: i32,
    monto_total: Decimal,
    estado: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Order {
        Order {
            id: OrderId::from_uuid(self.id),
            listing_id: ListingId::from_uuid(self.publicacion_id),
            buyer_id: UserId::from_uuid(self.comprador_id),
            seller_id: UserId::from_uuid(self.vendedor_id),
            quantity: self.cantidad,
            total: self.monto_total,
            status: self.estado,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderSummaryRow {
    #[sqlx(flatten)]
    order: OrderRow,
    titulo: String,
    comprador_nombre: String,
    vendedor_nombre: String,
}

impl OrderSummaryRow {
    fn into_summary(self) -> OrderSummary {
        OrderSummary {
            order: self.order.into_order(),
            listing_title: self.titulo,
            buyer_name: self.comprador_nombre,
            seller_name: self.vendedor_nombre,
        }
    }
}
