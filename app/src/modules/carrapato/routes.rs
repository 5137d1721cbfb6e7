use super::{
    dto::{CarrapatoDto, CreateCarrapatoDto, UpdateCarrapatoDto},
    service::CarrapatoService,
};
use crate::{
    modules::common::{
        error_codes::CODIGO_SERIAL_IMMUTABLE, extractors::ValidatedJson, responses::SimpleError,
    },
    utils::string::encode_path_segment,
};
use axum::{
    extract::{OriginalUri, Path, State},
    routing::get,
    Json, Router,
};
use http::{header, HeaderName, StatusCode};

pub fn create_router<S>(service: CarrapatoService) -> Router<S> {
    Router::new()
        .route("/", get(list_carrapatos).post(create_carrapato))
        .route(
            "/:codigo_serial",
            get(get_carrapato)
                .put(update_carrapato)
                .delete(delete_carrapato),
        )
        .with_state(service)
}

fn not_found(codigo_serial: &str) -> (StatusCode, SimpleError) {
    (
        StatusCode::NOT_FOUND,
        SimpleError::from(format!("carrapato {} not found", codigo_serial)),
    )
}

/// List every carrapato
#[utoipa::path(
    get,
    tag = "carrapato",
    path = "/api/v2/mongo/carrapatos",
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = Vec<CarrapatoDto>,
        ),
    ),
)]
pub async fn list_carrapatos(
    State(service): State<CarrapatoService>,
) -> Result<Json<Vec<CarrapatoDto>>, (StatusCode, SimpleError)> {
    let carrapatos = service.list().await?;

    Ok(Json(carrapatos.into_iter().map(CarrapatoDto::from).collect()))
}

/// Get a carrapato by its codigo serial
#[utoipa::path(
    get,
    tag = "carrapato",
    path = "/api/v2/mongo/carrapatos/{codigo_serial}",
    params(
        ("codigo_serial" = String, Path, description = "codigo serial of the carrapato"),
    ),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = CarrapatoDto,
        ),
        (
            status = NOT_FOUND,
            content_type = "application/json",
            body = SimpleError,
        ),
    ),
)]
pub async fn get_carrapato(
    State(service): State<CarrapatoService>,
    Path(codigo_serial): Path<String>,
) -> Result<Json<CarrapatoDto>, (StatusCode, SimpleError)> {
    let carrapato = service
        .get(&codigo_serial)
        .await?
        .ok_or_else(|| not_found(&codigo_serial))?;

    Ok(Json(CarrapatoDto::from(carrapato)))
}

/// Register a new carrapato
///
/// the carrapato starts with a full battery (`Alta`) and available for use (`Disponivel`),
/// the `Location` header of the response points to the created carrapato.
#[utoipa::path(
    post,
    tag = "carrapato",
    path = "/api/v2/mongo/carrapatos",
    request_body(content = CreateCarrapatoDto, content_type = "application/json"),
    responses(
        (
            status = CREATED,
            content_type = "application/json",
            body = CarrapatoDto,
            headers(("Location" = String, description = "url of the created carrapato")),
        ),
        (
            status = BAD_REQUEST,
            description = "invalid request body or CODIGO_SERIAL_IN_USE",
            content_type = "application/json",
            body = SimpleError,
        ),
    ),
)]
pub async fn create_carrapato(
    State(service): State<CarrapatoService>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(dto): ValidatedJson<CreateCarrapatoDto>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CarrapatoDto>), (StatusCode, SimpleError)>
{
    let carrapato = dto
        .into_carrapato()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let created = service.create(carrapato).await?;

    let location = format!(
        "{}/{}",
        uri.path().trim_end_matches('/'),
        encode_path_segment(created.codigo_serial())
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CarrapatoDto::from(created)),
    ))
}

/// Replace a carrapato
///
/// statuses and location that are not sent are reset, the codigo serial
/// on the body must be the same as the one on the path.
#[utoipa::path(
    put,
    tag = "carrapato",
    path = "/api/v2/mongo/carrapatos/{codigo_serial}",
    params(
        ("codigo_serial" = String, Path, description = "codigo serial of the carrapato to update"),
    ),
    request_body(content = UpdateCarrapatoDto, content_type = "application/json"),
    responses(
        (
            status = OK,
            content_type = "application/json",
            body = CarrapatoDto,
        ),
        (
            status = BAD_REQUEST,
            description = "invalid request body or CODIGO_SERIAL_IMMUTABLE",
            content_type = "application/json",
            body = SimpleError,
        ),
        (
            status = NOT_FOUND,
            content_type = "application/json",
            body = SimpleError,
        ),
    ),
)]
pub async fn update_carrapato(
    State(service): State<CarrapatoService>,
    Path(codigo_serial): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCarrapatoDto>,
) -> Result<Json<CarrapatoDto>, (StatusCode, SimpleError)> {
    if dto.codigo_serial != codigo_serial {
        return Err((
            StatusCode::BAD_REQUEST,
            SimpleError::from(CODIGO_SERIAL_IMMUTABLE),
        ));
    }

    let replacement = dto
        .into_carrapato()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let updated = service
        .update(&codigo_serial, replacement)
        .await?
        .ok_or_else(|| not_found(&codigo_serial))?;

    Ok(Json(CarrapatoDto::from(updated)))
}

/// Deletes a carrapato
#[utoipa::path(
    delete,
    tag = "carrapato",
    path = "/api/v2/mongo/carrapatos/{codigo_serial}",
    params(
        ("codigo_serial" = String, Path, description = "codigo serial of the carrapato to delete"),
    ),
    responses(
        (
            status = OK,
            description = "success message",
            body = String,
            content_type = "application/json",
            example = json!("carrapato deleted successfully"),
        ),
        (
            status = NOT_FOUND,
            content_type = "application/json",
            body = SimpleError,
        ),
    ),
)]
pub async fn delete_carrapato(
    State(service): State<CarrapatoService>,
    Path(codigo_serial): Path<String>,
) -> Result<Json<String>, (StatusCode, SimpleError)> {
    if service.delete(&codigo_serial).await? {
        Ok(Json(String::from("carrapato deleted successfully")))
    } else {
        Err(not_found(&codigo_serial))
    }
}
