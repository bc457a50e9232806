//! Todo resource handlers.
//!
//! ```text
//! GET    /todos/?done=true
//! POST   /todos/ {"name":"Buy milk","description":null}
//! GET    /todos/{todo_id}/
//! PATCH  /todos/{todo_id}/ {"done":true}
//! DELETE /todos/{todo_id}/
//! ```
//!
//! Inputs are checked by the validation extractors before a handler runs and
//! outputs by [`ValidatedResponse`] after it returns. Other methods on these
//! two paths answer 405.

use actix_web::{HttpResponse, web};

use crate::domain::TodoId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{method_not_allowed, path_error_handler};
use crate::inbound::http::schemas::{
    DetailSchema, TodoCreateInput, TodoFilterQuery, TodoOutput, TodoUpdateInput,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidatedJson, ValidatedQuery, ValidatedResponse};

/// Collection route.
pub const TODOS_PATH: &str = "/todos/";
/// Item route. Only unsigned decimal ids match; anything else falls through to
/// the 404 default service.
pub const TODO_PATH: &str = r"/todos/{todo_id:\d+}/";

/// Register the todo resources together with their path extraction config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::resource(TODOS_PATH)
                .route(web::get().to(list_todos))
                .route(web::post().to(create_todo))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource(TODO_PATH)
                .route(web::get().to(get_todo))
                .route(web::patch().to(update_todo))
                .route(web::delete().to(delete_todo))
                .default_service(web::to(method_not_allowed)),
        );
}

/// List todos, optionally narrowed by completion state.
#[utoipa::path(
    get,
    path = "/todos/",
    params(TodoFilterQuery),
    responses(
        (status = 200, description = "Todos ordered by id", body = [TodoOutput]),
        (status = 400, description = "Invalid query or output", body = DetailSchema),
        (status = 503, description = "Store unavailable", body = DetailSchema)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
pub async fn list_todos(
    state: web::Data<HttpState>,
    query: ValidatedQuery<TodoFilterQuery>,
) -> ApiResult<ValidatedResponse<Vec<TodoOutput>>> {
    let todos = state.todos_query.list_todos(query.into_inner().into()).await?;
    Ok(ValidatedResponse::ok(todos))
}

/// Create a todo. New todos start not done.
#[utoipa::path(
    post,
    path = "/todos/",
    request_body = TodoCreateInput,
    responses(
        (status = 201, description = "Todo created", body = TodoOutput),
        (status = 400, description = "Invalid input or output", body = DetailSchema),
        (status = 503, description = "Store unavailable", body = DetailSchema)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: ValidatedJson<TodoCreateInput>,
) -> ApiResult<ValidatedResponse<TodoOutput>> {
    let todo = state.todos.create_todo(payload.into_inner().into()).await?;
    Ok(ValidatedResponse::created(todo))
}

/// Fetch one todo.
#[utoipa::path(
    get,
    path = "/todos/{todo_id}/",
    params(("todo_id" = i64, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo found", body = TodoOutput),
        (status = 400, description = "Invalid output", body = DetailSchema),
        (status = 404, description = "Todo not found", body = DetailSchema)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
pub async fn get_todo(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<ValidatedResponse<TodoOutput>> {
    let todo = state
        .todos_query
        .get_todo(TodoId::new(path.into_inner()))
        .await?;
    Ok(ValidatedResponse::ok(todo))
}

/// Partially update a todo.
#[utoipa::path(
    patch,
    path = "/todos/{todo_id}/",
    params(("todo_id" = i64, Path, description = "Todo identifier")),
    request_body = TodoUpdateInput,
    responses(
        (status = 200, description = "Todo updated", body = TodoOutput),
        (status = 400, description = "Invalid input or output", body = DetailSchema),
        (status = 404, description = "Todo not found", body = DetailSchema)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: ValidatedJson<TodoUpdateInput>,
) -> ApiResult<ValidatedResponse<TodoOutput>> {
    let id = TodoId::new(path.into_inner());
    let todo = state
        .todos
        .update_todo(id, payload.into_inner().into())
        .await?;
    Ok(ValidatedResponse::ok(todo))
}

/// Delete a todo.
#[utoipa::path(
    delete,
    path = "/todos/{todo_id}/",
    params(("todo_id" = i64, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = DetailSchema)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = TodoId::new(path.into_inner());
    state.todos.delete_todo(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
