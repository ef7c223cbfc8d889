use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use auth::CurrentUser;

use super::MarketAppState;
use crate::application::{BarterUseCase, ProposeBarterInput};
use crate::domain::repository::MarketRepository;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{BarterResponse, BarterSummaryResponse, ProposeBarterRequest};

/// POST /api/trueques
pub async fn propose<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<ProposeBarterRequest>, MarketError>,
) -> MarketResult<(StatusCode, Json<BarterResponse>)>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let barter = BarterUseCase::new(state.repo.clone())
        .propose(
            current.user_id,
            ProposeBarterInput {
                listing_id: req.publicacion_id,
                receiver_id: req.receptor_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(barter.into())))
}

/// GET /api/trueques/mios
pub async fn list_mine<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
) -> MarketResult<Json<Vec<BarterSummaryResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let barters = BarterUseCase::new(state.repo.clone())
        .list_mine(&current.user_id)
        .await?;

    Ok(Json(barters.into_iter().map(Into::into).collect()))
}
