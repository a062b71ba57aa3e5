//! Work-item handlers.

use actix_web::{HttpResponse, web};

use taqsym_core::domain::{NewWorkItem, WorkItem};
use taqsym_shared::dto::{CreateTaskRequest, TaskListResponse, TaskResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(item: WorkItem) -> TaskResponse {
    TaskResponse {
        id: item.id,
        title: item.title,
        description: item.description,
        user_id: item.owner_id,
    }
}

/// GET /tasks
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let items = state.work_items.list().await?;

    Ok(HttpResponse::Ok().json(TaskListResponse {
        items: items.into_iter().map(to_response).collect(),
    }))
}

/// POST /tasks
///
/// The owner is taken from the body's `user_id`, as the work-item backend
/// expects.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateTaskRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new_item = NewWorkItem::new(req.title, req.description, req.user_id)?;

    let item = state.work_items.create(&new_item).await?;

    tracing::info!(
        task_id = item.id,
        owner_id = item.owner_id,
        subject_id = identity.subject_id(),
        "Task created"
    );
    Ok(HttpResponse::Created().json(to_response(item)))
}
