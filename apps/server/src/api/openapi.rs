//! OpenAPI document and Swagger UI.

use crate::api::handlers::properties::{
    self, GeneratedProperties, PropertyForm, SeedOutcome,
};
use crate::error::{ErrorBody, ValidationProblem};
use estate_catalog::{NewProperty, PublicProperty, PublicPropertyPage};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate Catalog API",
        description = "Search, pagination and creation of real-estate listings"
    ),
    paths(
        super::health_check,
        properties::list_properties,
        properties::get_property,
        properties::create_property,
        properties::create_property_from_form,
        properties::generate_properties,
        properties::seed_properties,
    ),
    components(schemas(
        PublicProperty,
        NewProperty,
        PublicPropertyPage,
        PropertyForm,
        GeneratedProperties,
        SeedOutcome,
        ValidationProblem,
        ErrorBody,
    )),
    tags(
        (name = "Properties", description = "Listing search and creation"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger`, backed by the generated document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
