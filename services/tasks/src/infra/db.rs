use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};

use taskdesk_domain::id::{AccountId, CustomerId, EmployeeId, TaskId};
use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::status::TaskStatus;
use taskdesk_tasks_schema::{accounts, customers, employees, tasks};

use crate::domain::access::TaskScope;
use crate::domain::repository::{ProfileRepository, TaskRepository};
use crate::domain::types::{Account, CustomerProfile, EmployeeProfile, RoleProfile, Task};
use crate::error::TasksServiceError;

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, TasksServiceError> {
        let model = accounts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model.map(account_from_model))
    }

    async fn find_role_profile(
        &self,
        account_id: AccountId,
    ) -> Result<Option<RoleProfile>, TasksServiceError> {
        let customer = customers::Entity::find()
            .filter(customers::Column::AccountId.eq(account_id.0))
            .one(&self.db)
            .await
            .context("find customer profile")?;
        if let Some(model) = customer {
            return Ok(Some(RoleProfile::Customer(customer_from_model(model))));
        }

        let employee = employees::Entity::find()
            .filter(employees::Column::AccountId.eq(account_id.0))
            .one(&self.db)
            .await
            .context("find employee profile")?;
        Ok(employee.map(|model| RoleProfile::Employee(employee_from_model(model))))
    }

    async fn find_employee(
        &self,
        id: EmployeeId,
    ) -> Result<Option<EmployeeProfile>, TasksServiceError> {
        let model = employees::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn create_customer(
        &self,
        account: &Account,
        profile: &CustomerProfile,
    ) -> Result<(), TasksServiceError> {
        let account = account.clone();
        let profile = profile.clone();
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    account_active_model(&account).insert(txn).await?;
                    customers::ActiveModel {
                        id: Set(profile.id.0),
                        account_id: Set(profile.account_id.0),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await;
        map_txn_err(result, "create customer profile")
    }

    async fn create_employee(
        &self,
        account: &Account,
        profile: &EmployeeProfile,
    ) -> Result<(), TasksServiceError> {
        let account = account.clone();
        let profile = profile.clone();
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    account_active_model(&account).insert(txn).await?;
                    employees::ActiveModel {
                        id: Set(profile.id.0),
                        account_id: Set(profile.account_id.0),
                        can_access_all_tasks: Set(profile.can_access_all_tasks),
                        photo_url: Set(profile.photo_url.clone()),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await;
        map_txn_err(result, "create employee profile")
    }

    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(CustomerProfile, Account)>, TasksServiceError> {
        let page = page.clamped();
        let rows = customers::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(accounts::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list customers")?;
        rows.into_iter()
            .map(|(customer, account)| {
                let account = account.context("customer row without account")?;
                Ok((customer_from_model(customer), account_from_model(account)))
            })
            .collect()
    }

    async fn list_employees(
        &self,
        page: PageRequest,
    ) -> Result<Vec<(EmployeeProfile, Account)>, TasksServiceError> {
        let page = page.clamped();
        let rows = employees::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(accounts::Column::Username)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list employees")?;
        rows.into_iter()
            .map(|(employee, account)| {
                let account = account.context("employee row without account")?;
                Ok((employee_from_model(employee), account_from_model(account)))
            })
            .collect()
    }
}

fn account_active_model(account: &Account) -> accounts::ActiveModel {
    accounts::ActiveModel {
        id: Set(account.id.0),
        username: Set(account.username.clone()),
        full_name: Set(account.full_name.clone()),
        email: Set(account.email.clone()),
        phone: Set(account.phone.clone()),
        created_at: Set(account.created_at),
        updated_at: Set(account.updated_at),
    }
}

/// Unique-violation inside the profile transaction means a duplicate
/// username or phone; everything else is an internal error.
fn map_txn_err(
    result: Result<(), sea_orm::TransactionError<DbErr>>,
    what: &'static str,
) -> Result<(), TasksServiceError> {
    match result {
        Ok(()) => Ok(()),
        Err(sea_orm::TransactionError::Transaction(db_err))
            if matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
        {
            Err(TasksServiceError::AccountConflict)
        }
        Err(e) => Err(TasksServiceError::Internal(
            anyhow::Error::new(e).context(what),
        )),
    }
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: AccountId(model.id),
        username: model.username,
        full_name: model.full_name,
        email: model.email,
        phone: model.phone,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn customer_from_model(model: customers::Model) -> CustomerProfile {
    CustomerProfile {
        id: CustomerId(model.id),
        account_id: AccountId(model.account_id),
    }
}

fn employee_from_model(model: employees::Model) -> EmployeeProfile {
    EmployeeProfile {
        id: EmployeeId(model.id),
        account_id: AccountId(model.account_id),
        can_access_all_tasks: model.can_access_all_tasks,
        photo_url: model.photo_url,
    }
}

// ── Task repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaskRepository {
    pub db: DatabaseConnection,
}

/// Translate a visibility scope into a query condition. `TaskScope::None`
/// is handled by callers before any query is built.
fn scope_condition(scope: TaskScope) -> Option<Condition> {
    match scope {
        TaskScope::None => None,
        TaskScope::OwnedBy(customer_id) => {
            Some(Condition::all().add(tasks::Column::CustomerId.eq(customer_id.0)))
        }
        TaskScope::AssignedOrUnassigned(employee_id) => Some(
            Condition::any()
                .add(tasks::Column::EmployeeId.eq(employee_id.0))
                .add(tasks::Column::EmployeeId.is_null()),
        ),
        TaskScope::All => Some(Condition::all()),
    }
}

impl TaskRepository for DbTaskRepository {
    async fn list(
        &self,
        scope: TaskScope,
        page: PageRequest,
    ) -> Result<Vec<Task>, TasksServiceError> {
        let Some(condition) = scope_condition(scope) else {
            return Ok(vec![]);
        };
        let page = page.clamped();
        let models = tasks::Entity::find()
            .filter(condition)
            .order_by_asc(tasks::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list tasks")?;
        models.into_iter().map(task_from_model).collect()
    }

    async fn find_in_scope(
        &self,
        id: TaskId,
        scope: TaskScope,
    ) -> Result<Option<Task>, TasksServiceError> {
        let Some(condition) = scope_condition(scope) else {
            return Ok(None);
        };
        let model = tasks::Entity::find_by_id(id.0)
            .filter(condition)
            .one(&self.db)
            .await
            .context("find task in scope")?;
        model.map(task_from_model).transpose()
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TasksServiceError> {
        let model = tasks::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find task by id")?;
        model.map(task_from_model).transpose()
    }

    async fn create(&self, task: &Task) -> Result<Task, TasksServiceError> {
        task.validate()?;
        let model = tasks::ActiveModel {
            id: Set(task.id.0),
            customer_id: Set(task.customer_id.0),
            employee_id: Set(task.employee_id.map(|id| id.0)),
            status: Set(task.status.as_str().to_owned()),
            report: Set(task.report.clone()),
            created_at: Set(task.created_at),
            updated_at: Set(task.updated_at),
            completed_at: Set(task.completed_at),
        }
        .insert(&self.db)
        .await
        .context("create task")?;
        task_from_model(model)
    }

    async fn save(&self, task: &Task) -> Result<Task, TasksServiceError> {
        task.validate()?;
        let model = tasks::ActiveModel {
            id: Set(task.id.0),
            customer_id: Set(task.customer_id.0),
            employee_id: Set(task.employee_id.map(|id| id.0)),
            status: Set(task.status.as_str().to_owned()),
            report: Set(task.report.clone()),
            created_at: Set(task.created_at),
            updated_at: Set(Utc::now()),
            completed_at: Set(task.completed_at),
        }
        .update(&self.db)
        .await
        .context("save task")?;
        task_from_model(model)
    }
}

fn task_from_model(model: tasks::Model) -> Result<Task, TasksServiceError> {
    let status = TaskStatus::from_str_opt(&model.status)
        .with_context(|| format!("unknown task status {:?} in storage", model.status))?;
    Ok(Task {
        id: TaskId(model.id),
        customer_id: CustomerId(model.customer_id),
        employee_id: model.employee_id.map(EmployeeId),
        status,
        report: model.report,
        created_at: model.created_at,
        updated_at: model.updated_at,
        completed_at: model.completed_at,
    })
}
