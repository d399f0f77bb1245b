use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use taskdesk_auth_types::identity::AuthenticatedAccount;
use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::role::Role;

use crate::domain::types::{Account, CustomerProfile, EmployeeProfile, Requester};
use crate::error::TasksServiceError;
use crate::state::AppState;
use crate::usecase::profile::{
    CreateCustomerUseCase, CreateEmployeeInput, CreateEmployeeUseCase, GetIdentityUseCase,
    ListCustomersUseCase, ListEmployeesUseCase, NewAccountInput,
};

// ── GET /identity ────────────────────────────────────────────────────────────

/// Mirrors the account record minus email — the identity endpoint has
/// never exposed it.
#[derive(Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub role: Option<Role>,
}

impl From<Requester> for IdentityResponse {
    fn from(requester: Requester) -> Self {
        let role = requester.role();
        Self {
            id: requester.account.id.to_string(),
            username: requester.account.username,
            full_name: requester.account.full_name,
            phone: requester.account.phone,
            role,
        }
    }
}

pub async fn get_identity(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
) -> Result<Json<IdentityResponse>, TasksServiceError> {
    let usecase = GetIdentityUseCase {
        profiles: state.profile_repo(),
    };
    let requester = usecase.execute(identity.account_id).await?;
    Ok(Json(requester.into()))
}

// ── POST /customers ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

pub async fn create_customer(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<StatusCode, TasksServiceError> {
    let usecase = CreateCustomerUseCase {
        profiles: state.profile_repo(),
    };
    usecase
        .execute(
            identity.account_id,
            NewAccountInput {
                username: body.username,
                full_name: body.full_name,
                email: body.email,
                phone: body.phone,
            },
        )
        .await?;
    Ok(StatusCode::CREATED)
}

// ── GET /customers ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProfileAccountResponse {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
}

impl ProfileAccountResponse {
    fn new(account: Account, role: Role) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username,
            full_name: account.full_name,
            phone: account.phone,
            role,
        }
    }
}

#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub account: ProfileAccountResponse,
}

impl From<(CustomerProfile, Account)> for CustomerResponse {
    fn from((profile, account): (CustomerProfile, Account)) -> Self {
        Self {
            id: profile.id.to_string(),
            account: ProfileAccountResponse::new(account, Role::Customer),
        }
    }
}

pub async fn list_customers(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<CustomerResponse>>, TasksServiceError> {
    let usecase = ListCustomersUseCase {
        profiles: state.profile_repo(),
    };
    let customers = usecase.execute(identity.account_id, page).await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

// ── POST /employees ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub can_access_all_tasks: bool,
    pub photo_url: Option<String>,
}

pub async fn create_employee(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<StatusCode, TasksServiceError> {
    let usecase = CreateEmployeeUseCase {
        profiles: state.profile_repo(),
    };
    usecase
        .execute(
            identity.account_id,
            CreateEmployeeInput {
                account: NewAccountInput {
                    username: body.username,
                    full_name: body.full_name,
                    email: body.email,
                    phone: body.phone,
                },
                can_access_all_tasks: body.can_access_all_tasks,
                photo_url: body.photo_url,
            },
        )
        .await?;
    Ok(StatusCode::CREATED)
}

// ── GET /employees ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub account: ProfileAccountResponse,
    pub can_access_all_tasks: bool,
    pub photo_url: Option<String>,
}

impl From<(EmployeeProfile, Account)> for EmployeeResponse {
    fn from((profile, account): (EmployeeProfile, Account)) -> Self {
        Self {
            id: profile.id.to_string(),
            account: ProfileAccountResponse::new(account, Role::Employee),
            can_access_all_tasks: profile.can_access_all_tasks,
            photo_url: profile.photo_url,
        }
    }
}

pub async fn list_employees(
    identity: AuthenticatedAccount,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<EmployeeResponse>>, TasksServiceError> {
    let usecase = ListEmployeesUseCase {
        profiles: state.profile_repo(),
    };
    let employees = usecase.execute(identity.account_id, page).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}
