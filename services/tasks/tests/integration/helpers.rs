use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use taskdesk_domain::id::{AccountId, CustomerId, EmployeeId, TaskId};
use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::status::TaskStatus;

use taskdesk_tasks::domain::access::TaskScope;
use taskdesk_tasks::domain::repository::{ProfileRepository, TaskRepository};
use taskdesk_tasks::domain::types::{
    Account, CustomerProfile, EmployeeProfile, RoleProfile, Task,
};
use taskdesk_tasks::error::TasksServiceError;

// ── InMemoryStore ────────────────────────────────────────────────────────────

/// Shared in-memory store standing in for PostgreSQL. Mirrors the
/// migrations' referential actions: unique username/phone, customer
/// deletion cascades to tasks, employee deletion unassigns them.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<Account>,
    customers: Vec<CustomerProfile>,
    employees: Vec<EmployeeProfile>,
    tasks: Vec<Task>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_customer(&self, username: &str, phone: &str) -> (Account, CustomerProfile) {
        let account = new_account(username, phone);
        let profile = CustomerProfile {
            id: CustomerId(Uuid::now_v7()),
            account_id: account.id,
        };
        let mut inner = self.inner.lock().unwrap();
        inner.accounts.push(account.clone());
        inner.customers.push(profile.clone());
        (account, profile)
    }

    pub fn seed_employee(
        &self,
        username: &str,
        phone: &str,
        can_access_all_tasks: bool,
    ) -> (Account, EmployeeProfile) {
        let account = new_account(username, phone);
        let profile = EmployeeProfile {
            id: EmployeeId(Uuid::now_v7()),
            account_id: account.id,
            can_access_all_tasks,
            photo_url: None,
        };
        let mut inner = self.inner.lock().unwrap();
        inner.accounts.push(account.clone());
        inner.employees.push(profile.clone());
        (account, profile)
    }

    /// Account row with no profile at all.
    pub fn seed_bare_account(&self, username: &str, phone: &str) -> Account {
        let account = new_account(username, phone);
        self.inner.lock().unwrap().accounts.push(account.clone());
        account
    }

    pub fn seed_task(
        &self,
        customer: &CustomerProfile,
        employee_id: Option<EmployeeId>,
        status: TaskStatus,
        report: &str,
    ) -> Task {
        let now = Utc::now();
        let task = Task {
            id: TaskId(Uuid::now_v7()),
            customer_id: customer.id,
            employee_id,
            status,
            report: report.to_owned(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        self.inner.lock().unwrap().tasks.push(task.clone());
        task
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.inner.lock().unwrap().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn task_count(&self) -> usize {
        self.inner.lock().unwrap().tasks.len()
    }

    pub fn customer_count(&self) -> usize {
        self.inner.lock().unwrap().customers.len()
    }

    pub fn employee_count(&self) -> usize {
        self.inner.lock().unwrap().employees.len()
    }

    /// ON DELETE SET NULL: tasks survive, their assignment is cleared.
    pub fn delete_employee(&self, id: EmployeeId) {
        let mut inner = self.inner.lock().unwrap();
        inner.employees.retain(|e| e.id != id);
        for task in &mut inner.tasks {
            if task.employee_id == Some(id) {
                task.employee_id = None;
            }
        }
    }

    /// ON DELETE CASCADE: the customer's tasks go with the profile.
    pub fn delete_customer(&self, id: CustomerId) {
        let mut inner = self.inner.lock().unwrap();
        inner.customers.retain(|c| c.id != id);
        inner.tasks.retain(|t| t.customer_id != id);
    }

    fn in_scope(task: &Task, scope: TaskScope) -> bool {
        match scope {
            TaskScope::None => false,
            TaskScope::OwnedBy(customer_id) => task.customer_id == customer_id,
            TaskScope::AssignedOrUnassigned(employee_id) => {
                task.employee_id.is_none() || task.employee_id == Some(employee_id)
            }
            TaskScope::All => true,
        }
    }
}

fn new_account(username: &str, phone: &str) -> Account {
    let now = Utc::now();
    Account {
        id: AccountId(Uuid::now_v7()),
        username: username.to_owned(),
        full_name: format!("{username} (test)"),
        email: format!("{username}@example.com"),
        phone: phone.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

impl ProfileRepository for InMemoryStore {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, TasksServiceError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_role_profile(
        &self,
        account_id: AccountId,
    ) -> Result<Option<RoleProfile>, TasksServiceError> {
        let inner = self.inner.lock().unwrap();
        if let Some(customer) = inner.customers.iter().find(|c| c.account_id == account_id) {
            return Ok(Some(RoleProfile::Customer(customer.clone())));
        }
        Ok(inner
            .employees
            .iter()
            .find(|e| e.account_id == account_id)
            .map(|e| RoleProfile::Employee(e.clone())))
    }

    async fn find_employee(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeProfile>, TasksServiceError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn create_customer(
        &self,
        account: &Account,
        profile: &CustomerProfile,
    ) -> Result<(), TasksServiceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .accounts
            .iter()
            .any(|a| a.username == account.username || a.phone == account.phone)
        {
            return Err(TasksServiceError::AccountConflict);
        }
        inner.accounts.push(account.clone());
        inner.customers.push(profile.clone());
        Ok(())
    }

    async fn create_employee(
        &self,
        account: &Account,
        profile: &EmployeeProfile,
    ) -> Result<(), TasksServiceError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .accounts
            .iter()
            .any(|a| a.username == account.username || a.phone == account.phone)
        {
            return Err(TasksServiceError::AccountConflict);
        }
        inner.accounts.push(account.clone());
        inner.employees.push(profile.clone());
        Ok(())
    }

    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(CustomerProfile, Account)>, TasksServiceError> {
        let inner = self.inner.lock().unwrap();
        let rows = inner
            .customers
            .iter()
            .filter_map(|c| {
                inner
                    .accounts
                    .iter()
                    .find(|a| a.id == c.account_id)
                    .map(|a| (c.clone(), a.clone()))
            })
            .collect::<Vec<_>>();
        Ok(paginate(rows, page))
    }

    async fn list_employees(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(EmployeeProfile, Account)>, TasksServiceError> {
        let inner = self.inner.lock().unwrap();
        let rows = inner
            .employees
            .iter()
            .filter_map(|e| {
                inner
                    .accounts
                    .iter()
                    .find(|a| a.id == e.account_id)
                    .map(|a| (e.clone(), a.clone()))
            })
            .collect::<Vec<_>>();
        Ok(paginate(rows, page))
    }
}

impl TaskRepository for InMemoryStore {
    async fn list(
        &self,
        scope: TaskScope,
        page: PageRequest,
    ) -> Result<Vec<Task>, TasksServiceError> {
        if scope == TaskScope::None {
            return Ok(vec![]);
        }
        let rows = self
            .inner
            .lock()
            .unwrap()
            .tasks
            .iter()
            .filter(|t| Self::in_scope(t, scope))
            .cloned()
            .collect::<Vec<_>>();
        Ok(paginate(rows, page))
    }

    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: TaskScope,
    ) -> Result<Option<Task>, TasksServiceError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id == id && Self::in_scope(t, scope))
            .cloned())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TasksServiceError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn create(&self, task: &Task) -> Result<Task, TasksServiceError> {
        task.validate()?;
        self.inner.lock().unwrap().tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn save(&self, task: &Task) -> Result<Task, TasksServiceError> {
        task.validate()?;
        let mut saved = task.clone();
        saved.updated_at = Utc::now();
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or(TasksServiceError::TaskNotFound)?;
        *row = saved.clone();
        Ok(saved)
    }
}

fn paginate<T>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    let page = page.clamped();
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}
