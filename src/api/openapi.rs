//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::UserResponse;

/// OpenAPI documentation for the User API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        version = "0.1.0",
        description = "A small user resource API with Axum, SeaORM, and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::describe,
        user_handler::get_user,
        user_handler::create_user,
    ),
    components(
        schemas(
            UserResponse,
            user_handler::CreateUserRequest,
        )
    ),
    tags(
        (name = "Users", description = "User resource operations")
    )
)]
pub struct ApiDoc;
