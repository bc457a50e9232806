//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the todo and health endpoints together with the
//! request, response and error shapes from [`crate::inbound::http::schemas`].
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    DetailSchema, FieldErrorSchema, TodoCreateInput, TodoOutput, TodoUpdateInput,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Todo API",
        description = "CRUD interface for todo items with validated request and response contracts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::todos::list_todos,
        crate::inbound::http::todos::create_todo,
        crate::inbound::http::todos::get_todo,
        crate::inbound::http::todos::update_todo,
        crate::inbound::http::todos::delete_todo,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TodoCreateInput,
        TodoUpdateInput,
        TodoOutput,
        DetailSchema,
        FieldErrorSchema
    )),
    tags(
        (name = "todos", description = "Create, read, update and delete todo items"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
