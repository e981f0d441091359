//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use galleria_core::models;

/// Returns the OpenAPI spec for the gallery API.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Galleria API",
        version = "0.1.0",
        description = "Image gallery backend: upload images to blob storage, manage their metadata, and serve them back. All endpoints live under the /images prefix."
    ),
    paths(
        handlers::image_upload::upload_image,
        handlers::image_list::list_images,
        handlers::image_get::get_image,
        handlers::image_update::update_image,
        handlers::image_serve::serve_image,
        handlers::image_delete::delete_image,
    ),
    components(schemas(
        models::ImageAssetResponse,
        models::UpdateImageMetadata,
        models::Page<models::ImageAssetResponse>,
        handlers::image_delete::DeleteResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "images", description = "Gallery image management")
    )
)]
struct ApiDoc;
