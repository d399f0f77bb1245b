use chrono::Utc;
use uuid::Uuid;

use taskdesk_domain::id::{AccountId, CustomerId, EmployeeId};
use taskdesk_domain::pagination::PageRequest;

use crate::domain::repository::ProfileRepository;
use crate::domain::types::{Account, CustomerProfile, EmployeeProfile, Requester, RoleProfile};
use crate::error::TasksServiceError;
use crate::usecase::resolve_requester;

// ── GetIdentity ──────────────────────────────────────────────────────────────

pub struct GetIdentityUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> GetIdentityUseCase<P> {
    pub async fn execute(&self, account_id: AccountId) -> Result<Requester, TasksServiceError> {
        resolve_requester(&self.profiles, account_id).await
    }
}

// ── CreateCustomer ───────────────────────────────────────────────────────────

pub struct NewAccountInput {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl NewAccountInput {
    fn into_account(self, now: chrono::DateTime<Utc>) -> Account {
        Account {
            id: AccountId(Uuid::now_v7()),
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            created_at: now,
            updated_at: now,
        }
    }
}

pub struct CreateCustomerUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> CreateCustomerUseCase<P> {
    /// Profile creation is an employee-only operation ("employees onboard
    /// accounts") — customers cannot self-register.
    pub async fn execute(
        &self,
        account_id: AccountId,
        input: NewAccountInput,
    ) -> Result<(), TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        if requester.employee().is_none() {
            return Err(TasksServiceError::Forbidden);
        }
        let account = input.into_account(Utc::now());
        let profile = CustomerProfile {
            id: CustomerId(Uuid::now_v7()),
            account_id: account.id,
        };
        self.profiles.create_customer(&account, &profile).await
    }
}

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeInput {
    pub account: NewAccountInput,
    pub can_access_all_tasks: bool,
    pub photo_url: Option<String>,
}

pub struct CreateEmployeeUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> CreateEmployeeUseCase<P> {
    /// Same employee-only gate as customer creation. There is deliberately
    /// no bootstrap path: the first employee is seeded out-of-band.
    pub async fn execute(
        &self,
        account_id: AccountId,
        input: CreateEmployeeInput,
    ) -> Result<(), TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        if requester.employee().is_none() {
            return Err(TasksServiceError::Forbidden);
        }
        let account = input.account.into_account(Utc::now());
        let profile = EmployeeProfile {
            id: EmployeeId(Uuid::now_v7()),
            account_id: account.id,
            can_access_all_tasks: input.can_access_all_tasks,
            photo_url: input.photo_url,
        };
        self.profiles.create_employee(&account, &profile).await
    }
}

// ── ListCustomers ────────────────────────────────────────────────────────────

pub struct ListCustomersUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> ListCustomersUseCase<P> {
    pub async fn execute(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<Vec<(CustomerProfile, Account)>, TasksServiceError> {
        // Any authenticated account may list customers.
        resolve_requester(&self.profiles, account_id).await?;
        self.profiles.list_customers(page).await
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<P: ProfileRepository> {
    pub profiles: P,
}

impl<P: ProfileRepository> ListEmployeesUseCase<P> {
    /// Customers only — employees are denied the listing.
    pub async fn execute(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<Vec<(EmployeeProfile, Account)>, TasksServiceError> {
        let requester = resolve_requester(&self.profiles, account_id).await?;
        if !matches!(requester.profile, Some(RoleProfile::Customer(_))) {
            return Err(TasksServiceError::Forbidden);
        }
        self.profiles.list_employees(page).await
    }
}
