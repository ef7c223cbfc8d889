use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use auth::CurrentUser;
use kernel::id::UserId;

use super::MarketAppState;
use crate::application::{RateInput, RatingUseCase};
use crate::domain::repository::MarketRepository;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{RateRequest, RatingResponse, RatingViewResponse};

/// POST /api/calificaciones
pub async fn rate<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<RateRequest>, MarketError>,
) -> MarketResult<(StatusCode, Json<RatingResponse>)>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let rating = RatingUseCase::new(state.repo.clone())
        .rate(
            current.user_id,
            RateInput {
                barter_id: req.trueque_id,
                order_id: req.orden_id,
                recipient_id: req.receptor_id,
                score: req.puntaje,
                comment: req.comentario,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(rating.into())))
}

/// GET /api/calificaciones/usuario/{usuarioId}
pub async fn received_by<R>(
    State(state): State<MarketAppState<R>>,
    WithRejection(Path(user_id), _): WithRejection<Path<UserId>, MarketError>,
) -> MarketResult<Json<Vec<RatingViewResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let ratings = RatingUseCase::new(state.repo.clone())
        .received_by(&user_id)
        .await?;

    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}
