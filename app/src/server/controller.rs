use super::open_api;
use crate::{
    modules::carrapato::{self, service::CarrapatoService},
    utils::string::StringExt,
};
use axum::{body::Body, extract::State, routing::get, Json, Router};
use http::{header, HeaderValue, Method, Request, StatusCode};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level, Span};
use url::Url;
use utoipa::ToSchema;

/// The main application state, this is cloned for every HTTP request
/// and thus its fields should contain types that are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// carrapatos stored on the mongodb `Carrapatos` collection
    pub mongo_carrapatos: CarrapatoService,

    /// carrapatos stored on the relational database, only available when it is configured
    pub relational_carrapatos: Option<CarrapatoService>,
}

fn cors_layer(frontend_url: &Url) -> CorsLayer {
    // URL.to_string for some reason adds a trailing slash
    // we need to remove it to avoid cors errors
    let mut frontend_origin = frontend_url.to_string();
    frontend_origin.pop_if_is('/');

    let allowed_origin = match frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            warn!("[WEB] invalid CORS origin {}: {}", frontend_origin, e);
            AllowOrigin::list([])
        }
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origin)
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
}

/// Creates the main axum router/controller to be served over http
pub fn new(state: AppState, frontend_url: &Url) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new()
        .layer(tracing_layer)
        .layer(cors_layer(frontend_url));

    let mut router = Router::new()
        .merge(open_api::create_openapi_router(
            state.relational_carrapatos.is_some(),
        ))
        .route("/healthcheck", get(healthcheck))
        .nest(
            "/api/v2/mongo/carrapatos",
            carrapato::routes::create_router(state.mongo_carrapatos.clone()),
        );

    if let Some(relational) = &state.relational_carrapatos {
        router = router.nest(
            "/api/v1/carrapatos",
            carrapato::routes::create_router(relational.clone()),
        );
    }

    router.layer(global_middlewares).with_state(state)
}

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreHealth {
    Up,
    Down,
}

/// Reachability of every configured store
#[derive(Serialize, ToSchema, Debug)]
pub struct HealthReport {
    pub mongo: StoreHealth,

    /// absent when the relational database is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relational: Option<StoreHealth>,
}

async fn store_health(service: &CarrapatoService, name: &str) -> StoreHealth {
    match service.ping().await {
        Ok(()) => StoreHealth::Up,
        Err(e) => {
            warn!("[HEALTHCHECK] {} store is down: {:#}", name, e);
            StoreHealth::Down
        }
    }
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses(
        (status = OK, body = HealthReport, content_type = "application/json"),
        (status = SERVICE_UNAVAILABLE, body = HealthReport, content_type = "application/json"),
    ),
)]
pub async fn healthcheck(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let mongo = store_health(&state.mongo_carrapatos, "mongo").await;

    let relational = match &state.relational_carrapatos {
        Some(service) => Some(store_health(service, "relational").await),
        None => None,
    };

    let all_up =
        mongo == StoreHealth::Up && relational.map_or(true, |r| r == StoreHealth::Up);

    let status = if all_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(HealthReport { mongo, relational }))
}
