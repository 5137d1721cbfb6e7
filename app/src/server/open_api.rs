use crate::modules::{carrapato, common};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::{ContactBuilder, InfoBuilder, OpenApi as OpenApiDoc};
use utoipa::{openapi::OpenApiBuilder, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

const MONGO_CARRAPATOS_PATH: &str = "/api/v2/mongo/carrapatos";
const RELATIONAL_CARRAPATOS_PATH: &str = "/api/v1/carrapatos";

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        shared::StatusBateria,
        shared::StatusDeUso,
        shared::Localizacao,

        common::responses::SimpleError,
        common::responses::FieldViolation,

        controller::StoreHealth,
        controller::HealthReport,

        carrapato::dto::CarrapatoDto,
        carrapato::dto::CreateCarrapatoDto,
        carrapato::dto::UpdateCarrapatoDto,
    )),
    paths(
        controller::healthcheck,

        carrapato::routes::list_carrapatos,
        carrapato::routes::get_carrapato,
        carrapato::routes::create_carrapato,
        carrapato::routes::update_carrapato,
        carrapato::routes::delete_carrapato,
    ),
)]
struct ApiDoc;

/// The carrapato routes are documented once, for the mongodb store, the relational
/// store serves the exact same operations under another prefix.
fn add_relational_paths(doc: &mut OpenApiDoc) {
    let mirrored: Vec<_> = doc
        .paths
        .paths
        .iter()
        .filter(|(path, _)| path.starts_with(MONGO_CARRAPATOS_PATH))
        .map(|(path, item)| {
            let mut item = item.clone();

            for operation in item.operations.values_mut() {
                operation.tags = Some(vec![String::from("carrapato (relational)")]);
                operation.operation_id = None;
            }

            let path = path.replacen(MONGO_CARRAPATOS_PATH, RELATIONAL_CARRAPATOS_PATH, 1);
            (path, item)
        })
        .collect();

    doc.paths.paths.extend(mirrored);
}

pub fn create_openapi_doc(with_relational_routes: bool) -> OpenApiDoc {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("Carrapato API")
        .description(Some(
            "Registry of the carrapato tags attached to the motorcycles parked on each patio.",
        ))
        .version("0.1.0")
        .contact(Some(
            ContactBuilder::new()
                .name(Some("Carrapato API maintainers"))
                .build(),
        ))
        .build();

    let mut api_doc = builder.info(info).build();

    if with_relational_routes {
        add_relational_paths(&mut api_doc);
    }

    api_doc
}

pub fn create_openapi_router(with_relational_routes: bool) -> Router<controller::AppState> {
    let api_doc = create_openapi_doc(with_relational_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", api_doc))
        .merge(RapiDoc::new("/docs/openapi.json").path("/rapidoc"))
}
