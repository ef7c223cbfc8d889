//! Market Router
//!
//! Browsing listings and reading a user's ratings are public; everything
//! else sits behind the bearer gate from the `auth` crate.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::{TokenService, require_auth};

use crate::application::MarketConfig;
use crate::domain::repository::MarketRepository;
use crate::infra::postgres::PgMarketRepository;
use crate::presentation::handlers::{
    MarketAppState, barters, listings, messages, orders, ratings,
};

/// Create the Market router with PostgreSQL repository
pub fn market_router(
    repo: PgMarketRepository,
    config: Arc<MarketConfig>,
    tokens: Arc<TokenService>,
) -> Router {
    market_router_generic(repo, config, tokens)
}

/// Create a generic Market router for any repository implementation
pub fn market_router_generic<R>(
    repo: R,
    config: Arc<MarketConfig>,
    tokens: Arc<TokenService>,
) -> Router
where
    R: MarketRepository + Clone + Send + Sync + 'static,
{
    let state = MarketAppState {
        repo: Arc::new(repo),
        config,
    };

    let public = Router::new()
        .route("/publicaciones", get(listings::search::<R>))
        .route("/publicaciones/{id}", get(listings::get::<R>))
        .route(
            "/calificaciones/usuario/{usuarioId}",
            get(ratings::received_by::<R>),
        );

    let protected = Router::new()
        .route("/publicaciones", post(listings::create::<R>))
        .route(
            "/publicaciones/{id}",
            put(listings::update::<R>).delete(listings::delete::<R>),
        )
        .route("/usuarios/me/publicaciones", get(listings::list_mine::<R>))
        .route("/trueques", post(barters::propose::<R>))
        .route("/trueques/mios", get(barters::list_mine::<R>))
        .route("/ordenes", post(orders::place::<R>))
        .route("/ordenes/mias", get(orders::list_mine::<R>))
        .route("/mensajes", post(messages::send::<R>))
        .route(
            "/mensajes/publicacion/{publicacionId}",
            get(messages::thread::<R>),
        )
        .route("/calificaciones", post(ratings::rate::<R>))
        .route_layer(middleware::from_fn_with_state(tokens, require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
}
