#![allow(async_fn_in_trait)]

use taskdesk_domain::id::{AccountId, EmployeeId, TaskId};
use taskdesk_domain::pagination::PageRequest;

use crate::domain::access::TaskScope;
use crate::domain::types::{
    Account, CustomerProfile, EmployeeProfile, RoleProfile, Task,
};
use crate::error::TasksServiceError;

/// Repository for accounts and their role profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, TasksServiceError>;

    /// The profile linked to an account, if any. At most one exists.
    async fn find_role_profile(
        &self,
        account_id: AccountId,
    ) -> Result<Option<RoleProfile>, TasksServiceError>;

    async fn find_employee(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeProfile>, TasksServiceError>;

    /// Create the account and its customer profile atomically.
    /// Duplicate username/phone surfaces as a conflict error.
    async fn create_customer(
        &self,
        account: &Account,
        profile: &CustomerProfile,
    ) -> Result<(), TasksServiceError>;

    /// Create the account and its employee profile atomically.
    async fn create_employee(
        &self,
        account: &Account,
        profile: &EmployeeProfile,
    ) -> Result<(), TasksServiceError>;

    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(CustomerProfile, Account)>, TasksServiceError>;

    async fn list_employees(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(EmployeeProfile, Account)>, TasksServiceError>;
}

/// Repository for tasks.
///
/// Both save paths enforce the task entity invariant (`Task::validate`)
/// before touching storage, so no caller can persist a completed task
/// with an empty report.
pub trait TaskRepository: Send + Sync {
    /// List tasks inside a visibility scope. `TaskScope::None` yields an
    /// empty vec without a query.
    async fn list(
        &self,
        scope: TaskScope,
        page: PageRequest,
    ) -> Result<Vec<Task>, TasksServiceError>;

    /// Find a task, but only if the scope can see it.
    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: TaskScope,
    ) -> Result<Option<Task>, TasksServiceError>;

    /// Unscoped lookup — used by the close operation, which is gated on
    /// authentication only.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TasksServiceError>;

    async fn create(&self, task: &Task) -> Result<Task, TasksServiceError>;

    /// Persist changes, refreshing `updated_at`. Returns the saved row.
    async fn save(&self, task: &Task) -> Result<Task, TasksServiceError>;
}
