use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use service::animal::AnimalInput;

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::ServerState,
};

type Animal = models::animal::Model;
type ApiResult<T> = Result<Json<T>, JsonApiError>;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive substring of the name
    pub name: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrefixQuery {
    /// Case-insensitive start of the name
    pub prefix: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpeciesSetQuery {
    /// Comma-separated species, e.g. `Lion,Zebra`
    pub species: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AgeRangeQuery {
    /// Inclusive lower bound
    pub min: i32,
    /// Inclusive upper bound
    pub max: i32,
}

#[utoipa::path(
    post, path = "/api/animals", tag = "animals",
    request_body = crate::openapi::AnimalInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AnimalDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): ApiJson<AnimalInput>,
) -> Result<(StatusCode, Json<Animal>), JsonApiError> {
    let created = state.animals.create(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/animals", tag = "animals", responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc])))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.list().await?))
}

#[utoipa::path(
    get, path = "/api/animals/{id}", tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AnimalDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, WithRejection(Path(id), _): ApiPath<i32>) -> ApiResult<Animal> {
    Ok(Json(state.animals.get(id).await?))
}

#[utoipa::path(
    get, path = "/api/animals/species/{species}", tag = "animals",
    params(("species" = String, Path, description = "Species, compared ignoring case")),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn by_species(State(state): State<ServerState>, WithRejection(Path(species), _): ApiPath<String>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.by_species(&species).await?))
}

#[utoipa::path(
    get, path = "/api/animals/search", tag = "animals",
    params(NameQuery),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn search(State(state): State<ServerState>, WithRejection(Query(q), _): ApiQuery<NameQuery>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.by_name(&q.name).await?))
}

#[utoipa::path(
    get, path = "/api/animals/search/prefix", tag = "animals",
    params(PrefixQuery),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn search_prefix(
    State(state): State<ServerState>,
    WithRejection(Query(q), _): ApiQuery<PrefixQuery>,
) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.by_name_prefix(&q.prefix).await?))
}

#[utoipa::path(
    get, path = "/api/animals/species", tag = "animals",
    params(SpeciesSetQuery),
    responses((status = 200, description = "Animals of any listed species", body = [crate::openapi::AnimalDoc]))
)]
pub async fn by_species_set(
    State(state): State<ServerState>,
    WithRejection(Query(q), _): ApiQuery<SpeciesSetQuery>,
) -> ApiResult<Vec<Animal>> {
    let wanted: Vec<String> = q.species.split(',').map(str::to_string).collect();
    Ok(Json(state.animals.by_species_in(&wanted).await?))
}

#[utoipa::path(
    get, path = "/api/animals/younger/{age}", tag = "animals",
    params(("age" = i32, Path, description = "Exclusive upper age bound")),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn younger(State(state): State<ServerState>, WithRejection(Path(age), _): ApiPath<i32>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.younger_than(age).await?))
}

#[utoipa::path(
    get, path = "/api/animals/older/{age}", tag = "animals",
    params(("age" = i32, Path, description = "Exclusive lower age bound")),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn older(State(state): State<ServerState>, WithRejection(Path(age), _): ApiPath<i32>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.older_than(age).await?))
}

#[utoipa::path(
    get, path = "/api/animals/age-range", tag = "animals",
    params(AgeRangeQuery),
    responses((status = 200, description = "OK; empty when min > max", body = [crate::openapi::AnimalDoc]))
)]
pub async fn age_range(State(state): State<ServerState>, WithRejection(Query(q), _): ApiQuery<AgeRangeQuery>) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.by_age_range(q.min, q.max).await?))
}

#[utoipa::path(
    get, path = "/api/animals/species/{species}/age-range", tag = "animals",
    params(("species" = String, Path, description = "Species, compared ignoring case"), AgeRangeQuery),
    responses((status = 200, description = "OK", body = [crate::openapi::AnimalDoc]))
)]
pub async fn by_species_and_age_range(
    State(state): State<ServerState>,
    WithRejection(Path(species), _): ApiPath<String>,
    WithRejection(Query(q), _): ApiQuery<AgeRangeQuery>,
) -> ApiResult<Vec<Animal>> {
    Ok(Json(state.animals.by_species_and_age_range(&species, q.min, q.max).await?))
}

#[utoipa::path(get, path = "/api/animals/species/list", tag = "animals", responses((status = 200, description = "Distinct species, sorted", body = [String])))]
pub async fn species_list(State(state): State<ServerState>) -> ApiResult<Vec<String>> {
    Ok(Json(state.animals.species().await?))
}

#[utoipa::path(
    get, path = "/api/animals/species/{species}/count", tag = "animals",
    params(("species" = String, Path, description = "Species, compared ignoring case")),
    responses((status = 200, description = "Number of animals", body = u64))
)]
pub async fn count_by_species(State(state): State<ServerState>, WithRejection(Path(species), _): ApiPath<String>) -> ApiResult<u64> {
    Ok(Json(state.animals.count_by_species(&species).await?))
}

#[utoipa::path(
    put, path = "/api/animals/{id}", tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    request_body = crate::openapi::AnimalInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AnimalDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(id), _): ApiPath<i32>,
    WithRejection(Json(input), _): ApiJson<AnimalInput>,
) -> ApiResult<Animal> {
    Ok(Json(state.animals.update(id, &input).await?))
}

#[utoipa::path(
    delete, path = "/api/animals/{id}", tag = "animals",
    params(("id" = i32, Path, description = "Animal ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, WithRejection(Path(id), _): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    state.animals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/animals", tag = "animals", responses((status = 204, description = "All animals deleted")))]
pub async fn delete_all(State(state): State<ServerState>) -> Result<StatusCode, JsonApiError> {
    state.animals.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
