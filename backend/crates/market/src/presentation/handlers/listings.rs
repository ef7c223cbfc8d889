use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use auth::CurrentUser;
use kernel::id::ListingId;

use super::MarketAppState;
use crate::application::{CreateListingInput, ListingUseCase, SearchInput, UpdateListingInput};
use crate::domain::repository::MarketRepository;
use crate::error::{MarketError, MarketResult};
use crate::presentation::dto::{
    CreateListingRequest, ListingCreatedResponse, ListingDetailsResponse, ListingResponse,
    MessageResponse, SearchQuery, UpdateListingRequest,
};

fn use_case<R>(state: &MarketAppState<R>) -> ListingUseCase<R>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    ListingUseCase::new(state.repo.clone(), state.config.clone())
}

/// GET /api/publicaciones
pub async fn search<R>(
    State(state): State<MarketAppState<R>>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, MarketError>,
) -> MarketResult<Json<Vec<ListingDetailsResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let listings = use_case(&state)
        .search(SearchInput {
            category_id: query.categoria_id,
            modality: query.modalidad,
            kind: query.tipo,
            q: query.q,
        })
        .await?;

    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

/// GET /api/publicaciones/{id}
pub async fn get<R>(
    State(state): State<MarketAppState<R>>,
    WithRejection(Path(id), _): WithRejection<Path<ListingId>, MarketError>,
) -> MarketResult<Json<ListingDetailsResponse>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let details = use_case(&state).get(&id).await?;
    Ok(Json(details.into()))
}

/// POST /api/publicaciones
pub async fn create<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Json(req), _): WithRejection<Json<CreateListingRequest>, MarketError>,
) -> MarketResult<(StatusCode, Json<ListingCreatedResponse>)>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let id = use_case(&state)
        .create(
            current.user_id,
            CreateListingInput {
                category_id: req.categoria_id,
                modality: req.modalidad,
                kind: req.tipo,
                title: req.titulo,
                description: req.descripcion,
                price: req.precio,
                faculty: req.facultad,
                images: req.imagenes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ListingCreatedResponse {
            id: id.into_uuid(),
            message: "Publicación creada",
        }),
    ))
}

/// PUT /api/publicaciones/{id}
pub async fn update<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<ListingId>, MarketError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateListingRequest>, MarketError>,
) -> MarketResult<Json<ListingResponse>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let listing = use_case(&state)
        .update(
            &id,
            &current.user_id,
            UpdateListingInput {
                category_id: req.categoria_id,
                modality: req.modalidad,
                kind: req.tipo,
                title: req.titulo,
                description: req.descripcion,
                price: req.precio,
                faculty: req.facultad,
                status: req.estado,
            },
        )
        .await?;

    Ok(Json(listing.into()))
}

/// DELETE /api/publicaciones/{id}
pub async fn delete<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
    WithRejection(Path(id), _): WithRejection<Path<ListingId>, MarketError>,
) -> MarketResult<Json<MessageResponse>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    use_case(&state).delete(&id, &current.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Publicación eliminada correctamente",
    }))
}

/// GET /api/usuarios/me/publicaciones
pub async fn list_mine<R>(
    State(state): State<MarketAppState<R>>,
    current: CurrentUser,
) -> MarketResult<Json<Vec<ListingDetailsResponse>>>
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let listings = use_case(&state).list_mine(&current.user_id).await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}
