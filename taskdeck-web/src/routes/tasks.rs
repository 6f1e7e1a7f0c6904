/// Task endpoints
///
/// # Endpoints
///
/// - `GET /` - List the current user's tasks, oldest first
/// - `POST /add_task` - Create a task
/// - `POST /update_task/:id` - Edit a task
/// - `POST /delete_task/:id` - Remove a task
///
/// All four require a session; the middleware in `app` injects
/// `CurrentUser` before any handler here runs. Mutations against a task id
/// that doesn't exist return 404. Mutations against someone else's task
/// redirect back to the list with a warning instead of an HTTP error, so a
/// foreign task id and a missing one don't answer identically by accident:
/// the distinction is a deliberate part of the contract.
///
/// Importance handling is asymmetric on purpose: a bad value on create
/// falls back to the default, a bad value on update is ignored and the
/// stored rank is retained.

use crate::{
    app::AppState,
    error::{validation_error, WebError, WebResult},
    routes::{escape_html, message_banner, PageQuery},
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use taskdeck_shared::models::task::{
    parse_importance, CreateTask, Task, UpdateTask, IMPORTANCE_DEFAULT,
};
use taskdeck_shared::auth::session::CurrentUser;
use uuid::Uuid;
use validator::Validate;

/// Add-task form fields
#[derive(Debug, Deserialize, Validate)]
pub struct AddTaskForm {
    /// Task title (required)
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Description (may be empty)
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    /// Importance; missing or invalid falls back to 1
    pub importance: Option<String>,
}

/// Update-task form fields
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskForm {
    /// New title (required)
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// New description (may be empty)
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    /// New importance; missing or invalid keeps the stored value
    pub importance: Option<String>,
}

/// Renders the task list for the current user
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PageQuery>,
) -> WebResult<Html<String>> {
    let tasks = Task::list_by_owner(&state.db, user.0).await?;

    let rows: String = tasks
        .iter()
        .map(|task| {
            format!(
                "<li data-id=\"{id}\">[{importance}] {title} &mdash; {description}</li>\n",
                id = task.id,
                importance = task.importance,
                title = escape_html(&task.title),
                description = escape_html(task.description.as_deref().unwrap_or("")),
            )
        })
        .collect();

    Ok(Html(format!(
        r#"<!doctype html><html><head><title>Taskdeck</title></head><body>
<h1>Your tasks</h1>{banner}
<ul>
{rows}</ul>
<form action="/add_task" method="POST">
  <input name="title" placeholder="Title" required>
  <input name="description" placeholder="Description">
  <input name="importance" placeholder="Importance (1-4)">
  <button type="submit">Add</button>
</form>
<p><a href="/logout">Log out</a></p>
</body></html>"#,
        banner = message_banner(query.message.as_deref()),
        rows = rows,
    )))
}

/// Creates a task owned by the current user
pub async fn add_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<AddTaskForm>,
) -> WebResult<Redirect> {
    form.validate().map_err(|e| validation_error(&e))?;

    let importance = form
        .importance
        .as_deref()
        .and_then(parse_importance)
        .unwrap_or(IMPORTANCE_DEFAULT);

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: user.0,
            title: form.title,
            description: (!form.description.is_empty()).then_some(form.description),
            importance,
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, user_id = %user.0, "task created");

    Ok(Redirect::to("/"))
}

/// Edits a task
///
/// Title and description are applied unconditionally; importance only if it
/// parses into the 1..=4 domain.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Form(form): Form<UpdateTaskForm>,
) -> WebResult<Redirect> {
    form.validate().map_err(|e| validation_error(&e))?;

    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or(WebError::NotFound)?;

    if task.user_id != user.0 {
        return Err(WebError::NotOwner);
    }

    Task::update(
        &state.db,
        id,
        UpdateTask {
            title: form.title,
            description: (!form.description.is_empty()).then_some(form.description),
            importance: form.importance.as_deref().and_then(parse_importance),
        },
    )
    .await?;

    tracing::info!(task_id = %id, user_id = %user.0, "task updated");

    Ok(Redirect::to("/"))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> WebResult<Redirect> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or(WebError::NotFound)?;

    if task.user_id != user.0 {
        return Err(WebError::NotOwner);
    }

    Task::delete(&state.db, id).await?;

    tracing::info!(task_id = %id, user_id = %user.0, "task deleted");

    Ok(Redirect::to("/"))
}
