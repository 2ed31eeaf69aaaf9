use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct AnimalInputDoc {
    /// 2..=100 characters, not blank
    pub name: String,
    /// 2..=100 characters, not blank
    pub species: String,
    /// >= 0
    pub age: i32,
}

#[derive(ToSchema)]
pub struct AnimalDoc {
    pub id: i32,
    pub name: String,
    pub species: String,
    pub age: i32,
    pub created_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub updated_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(ToSchema)]
pub struct ExportResultDoc {
    pub message: String,
    pub path: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::animals::create,
        crate::routes::animals::list,
        crate::routes::animals::get,
        crate::routes::animals::by_species,
        crate::routes::animals::search,
        crate::routes::animals::search_prefix,
        crate::routes::animals::by_species_set,
        crate::routes::animals::younger,
        crate::routes::animals::older,
        crate::routes::animals::age_range,
        crate::routes::animals::by_species_and_age_range,
        crate::routes::animals::species_list,
        crate::routes::animals::count_by_species,
        crate::routes::animals::update,
        crate::routes::animals::delete,
        crate::routes::animals::delete_all,
        crate::routes::export::export,
        crate::routes::export::list_files,
        crate::routes::export::download,
    ),
    components(
        schemas(
            HealthResponse,
            AnimalInputDoc,
            AnimalDoc,
            ExportResultDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "animals"),
        (name = "export")
    )
)]
pub struct ApiDoc;
