use utoipa::openapi::{
    OpenApi,
    security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::common::middleware::SESSION_HEADER;

/// Serves the generated document at `/api-docs/openapi.json` with the UI at
/// `/swagger-ui`.
pub fn create_swagger_ui(mut openapi: OpenApi) -> SwaggerUi {
    let components = openapi.components.get_or_insert_with(Default::default);
    components.add_security_scheme(
        "sessionId",
        SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_HEADER))),
    );
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi)
}
