use chrono::Utc;
use uuid::Uuid;

use taskdesk_domain::id::{AccountId, EmployeeId, TaskId};
use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::status::TaskStatus;

use crate::domain::access::{self, MethodKind};
use crate::domain::repository::{ProfileRepository, TaskRepository};
use crate::domain::types::Task;
use crate::error::TasksServiceError;
use crate::usecase::resolve_requester;

// ── ListTasks ────────────────────────────────────────────────────────────────

pub struct ListTasksUseCase<P: ProfileRepository, T: TaskRepository> {
    pub profiles: P,
    pub tasks: T,
}

impl<P: ProfileRepository, T: TaskRepository> ListTasksUseCase<P, T> {
    pub async fn execute(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<Vec<Task>, TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        self.tasks.list(access::visible_scope(&requester), page).await
    }
}

// ── CreateTask ───────────────────────────────────────────────────────────────

pub struct CreateTaskInput {
    pub employee_id: Option<EmployeeId>,
    pub status: Option<TaskStatus>,
    pub report: Option<String>,
}

pub struct CreateTaskUseCase<P: ProfileRepository, T: TaskRepository> {
    pub profiles: P,
    pub tasks: T,
}

impl<P: ProfileRepository, T: TaskRepository> CreateTaskUseCase<P, T> {
    /// Only customers create tasks, and the owner is always the caller's
    /// own profile — the input carries no owner field at all.
    pub async fn execute(
        &self,
        account_id: AccountId,
        input: CreateTaskInput,
    ) -> Result<Task, TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        let Some(customer) = requester.customer() else {
            return Err(TasksServiceError::Forbidden);
        };

        if let Some(employee_id) = input.employee_id {
            self.profiles
                .find_employee(employee_id)
                .await?
                .ok_or(TasksServiceError::EmployeeNotFound)?;
        }

        let mut task = Task::new(TaskId(Uuid::now_v7()), customer.id, Utc::now());
        task.employee_id = input.employee_id;
        if let Some(status) = input.status {
            task.status = status;
        }
        if let Some(report) = input.report {
            task.report = report;
        }
        self.tasks.create(&task).await
    }
}

// ── GetTask ──────────────────────────────────────────────────────────────────

pub struct GetTaskUseCase<P: ProfileRepository, T: TaskRepository> {
    pub profiles: P,
    pub tasks: T,
}

impl<P: ProfileRepository, T: TaskRepository> GetTaskUseCase<P, T> {
    pub async fn execute(
        &self,
        account_id: AccountId,
        task_id: TaskId,
    ) -> Result<Task, TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        let task = self
            .tasks
            .find_in_scope(task_id, access::visible_scope(&requester))
            .await?
            .ok_or(TasksServiceError::TaskNotFound)?;
        access::authorize(&requester, &task, MethodKind::Read)?;
        Ok(task)
    }
}

// ── UpdateTask ───────────────────────────────────────────────────────────────

pub struct UpdateTaskInput {
    pub employee_id: Option<EmployeeId>,
    pub status: Option<TaskStatus>,
    pub report: Option<String>,
}

impl UpdateTaskInput {
    fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.status.is_none() && self.report.is_none()
    }
}

pub struct UpdateTaskUseCase<P: ProfileRepository, T: TaskRepository> {
    pub profiles: P,
    pub tasks: T,
}

impl<P: ProfileRepository, T: TaskRepository> UpdateTaskUseCase<P, T> {
    pub async fn execute(
        &self,
        account_id: AccountId,
        task_id: TaskId,
        input: UpdateTaskInput,
    ) -> Result<Task, TasksServiceError> {
        if input.is_empty() {
            return Err(TasksServiceError::MissingData);
        }

        let requester = resolve_requester(&self.profiles, account_id).await?;
        let mut task = self
            .tasks
            .find_in_scope(task_id, access::visible_scope(&requester))
            .await?
            .ok_or(TasksServiceError::TaskNotFound)?;

        access::authorize(&requester, &task, MethodKind::Write)?;

        if let Some(employee_id) = input.employee_id {
            self.profiles
                .find_employee(employee_id)
                .await?
                .ok_or(TasksServiceError::EmployeeNotFound)?;
            task.employee_id = Some(employee_id);
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        if let Some(report) = input.report {
            task.report = report;
        }

        self.tasks.save(&task).await
    }
}

// ── CloseTask ────────────────────────────────────────────────────────────────

pub struct CloseTaskUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> CloseTaskUseCase<T> {
    /// Close is gated on authentication only — any signed-in identity may
    /// close any task by id. The entity invariant still applies, so a task
    /// with an empty report refuses to complete.
    pub async fn execute(&self, task_id: TaskId) -> Result<Task, TasksServiceError> {
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TasksServiceError::TaskNotFound)?;
        task.close(Utc::now());
        self.tasks.save(&task).await
    }
}
