use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use auth::CurrentUser;

use super::MarketAppState;
use crate::application::{OrderUseCase, PlaceOrderInput};
use crate::domain::repository::MarketRepository;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{OrderResponse, OrderSummaryResponse, PlaceOrderRequest};

/// POST /api/ordenes
pub async fn place<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<PlaceOrderRequest>, MarketError>,
) -> MarketResult<(StatusCode, Json<OrderResponse>)>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let order = OrderUseCase::new(state.repo.clone())
        .place(
            current.user_id,
            PlaceOrderInput {
                listing_id: req.publicacion_id,
                quantity: req.cantidad,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/ordenes/mias
pub async fn list_mine<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
) -> MarketResult<Json<Vec<OrderSummaryResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let orders = OrderUseCase::new(state.repo.clone())
        .list_mine(&current.user_id)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
