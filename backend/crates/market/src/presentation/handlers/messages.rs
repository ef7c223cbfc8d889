use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use auth::CurrentUser;
use kernel::id::ListingId;

use super::MarketAppState;
use crate::application::{MessageUseCase, SendMessageInput};
use crate::domain::repository::MarketRepository;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{ChatMessageResponse, ChatMessageViewResponse, SendMessageRequest};

/// POST /api/mensajes
pub async fn send<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<SendMessageRequest>, MarketError>,
) -> MarketResult<(StatusCode, Json<ChatMessageResponse>)>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let message = MessageUseCase::new(state.repo.clone())
        .send(
            current.user_id,
            SendMessageInput {
                listing_id: req.publicacion_id,
                recipient_id: req.destinatario_id,
                content: req.contenido,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(message.into())))
}

/// GET /api/mensajes/publicacion/{publicacionId}
pub async fn thread<R>(
    State(state): State<MarketAppState<R>>,
    _current: CurrentUser,
    WithRejection(Path(listing_id), _): WithRejection<Path<ListingId>, MarketError>,
) -> MarketResult<Json<Vec<ChatMessageViewResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let messages = MessageUseCase::new(state.repo.clone())
        .thread(&listing_id)
        .await?;

    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
