use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::access::AccessDenied;
use crate::domain::types::InvalidTask;

/// Tasks service error variants.
#[derive(Debug, thiserror::Error)]
pub enum TasksServiceError {
    #[error("task not found")]
    TaskNotFound,
    #[error("account not found")]
    AccountNotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("username or phone already in use")]
    AccountConflict,
    #[error("report must not be empty to complete a task")]
    EmptyReport,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("completed tasks are read-only")]
    CompletedTaskImmutable,
    #[error("task deletion is forbidden")]
    DeletionForbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TasksServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::AccountConflict => "ACCOUNT_CONFLICT",
            Self::EmptyReport => "EMPTY_REPORT",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::CompletedTaskImmutable => "TASK_COMPLETED",
            Self::DeletionForbidden => "DELETION_FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<AccessDenied> for TasksServiceError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::Terminal => Self::CompletedTaskImmutable,
            AccessDenied::NotPermitted => Self::Forbidden,
        }
    }
}

impl From<InvalidTask> for TasksServiceError {
    fn from(invalid: InvalidTask) -> Self {
        match invalid {
            InvalidTask::EmptyReport => Self::EmptyReport,
        }
    }
}

impl IntoResponse for TasksServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::TaskNotFound | Self::AccountNotFound | Self::EmployeeNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AccountConflict => StatusCode::CONFLICT,
            Self::EmptyReport | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden | Self::CompletedTaskImmutable | Self::DeletionForbidden => {
                StatusCode::FORBIDDEN
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; the trace layer already records
        // method/uri/status. Only 500s get logged here.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
