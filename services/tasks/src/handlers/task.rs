use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskdesk_auth_types::identity::AuthenticatedAccount;
use taskdesk_domain::id::{EmployeeId, TaskId};
use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::status::TaskStatus;

use crate::domain::types::Task;
use crate::error::TasksServiceError;
use crate::state::AppState;
use crate::usecase::task::{
    CloseTaskUseCase, CreateTaskInput, CreateTaskUseCase, GetTaskUseCase, ListTasksUseCase,
    UpdateTaskInput, UpdateTaskUseCase,
};

// ── Response type ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub customer_id: String,
    pub employee_id: Option<String>,
    pub status: TaskStatus,
    pub report: String,
    #[serde(serialize_with = "taskdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "taskdesk_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "taskdesk_core::serde::opt_to_rfc3339_ms")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            customer_id: task.customer_id.to_string(),
            employee_id: task.employee_id.map(|id| id.to_string()),
            status: task.status,
            report: task.report,
            created_at: task.created_at,
            updated_at: task.updated_at,
            completed_at: task.completed_at,
        }
    }
}

// ── GET /tasks ───────────────────────────────────────────────────────────────

pub async fn list_tasks(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<TaskResponse>>, TasksServiceError> {
    let usecase = ListTasksUseCase {
        profiles: state.profile_repo(),
        tasks: state.task_repo(),
    };
    let tasks = usecase.execute(identity.account_id, page).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

// ── POST /tasks ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub employee_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub report: Option<String>,
}

pub async fn create_task(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), TasksServiceError> {
    let usecase = CreateTaskUseCase {
        profiles: state.profile_repo(),
        tasks: state.task_repo(),
    };
    let task = usecase
        .execute(
            identity.account_id,
            CreateTaskInput {
                employee_id: body.employee_id.map(EmployeeId),
                status: body.status,
                report: body.report,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

// ── GET /tasks/{id} ──────────────────────────────────────────────────────────

pub async fn get_task(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, TasksServiceError> {
    let usecase = GetTaskUseCase {
        profiles: state.profile_repo(),
        tasks: state.task_repo(),
    };
    let task = usecase.execute(identity.account_id, TaskId(id)).await?;
    Ok(Json(task.into()))
}

// ── PUT/PATCH /tasks/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub employee_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
    pub report: Option<String>,
}

pub async fn update_task(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, TasksServiceError> {
    let usecase = UpdateTaskUseCase {
        profiles: state.profile_repo(),
        tasks: state.task_repo(),
    };
    let task = usecase
        .execute(
            identity.account_id,
            TaskId(id),
            UpdateTaskInput {
                employee_id: body.employee_id.map(EmployeeId),
                status: body.status,
                report: body.report,
            },
        )
        .await?;
    Ok(Json(task.into()))
}

// ── DELETE /tasks/{id} ───────────────────────────────────────────────────────

/// Tasks are never deletable through the API, whoever asks and whatever
/// state the task is in.
pub async fn delete_task(
    _identity: AuthenticatedAccount,
    Path(_id): Path<Uuid>,
) -> Result<StatusCode, TasksServiceError> {
    Err(TasksServiceError::DeletionForbidden)
}

// ── POST /tasks/{id}/close ───────────────────────────────────────────────────

// Authentication is the only gate on close; the extractor has already run.
pub async fn close_task(
    _identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskResponse>, TasksServiceError> {
    let usecase = CloseTaskUseCase {
        tasks: state.task_repo(),
    };
    let task = usecase.execute(TaskId(id)).await?;
    Ok(Json(task.into()))
}
