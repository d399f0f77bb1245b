use chrono::{DateTime, Utc};

use taskdesk_domain::id::{AccountId, CustomerId, EmployeeId, TaskId};
use taskdesk_domain::role::Role;
use taskdesk_domain::status::TaskStatus;

/// Identity record behind a profile. Credentials live at the gateway.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer-role profile extension.
#[derive(Debug, Clone)]
pub struct CustomerProfile {
    pub id: CustomerId,
    pub account_id: AccountId,
}

/// Employee-role profile extension.
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    pub id: EmployeeId,
    pub account_id: AccountId,
    pub can_access_all_tasks: bool,
    pub photo_url: Option<String>,
}

/// The profile side of a resolved identity.
///
/// A role value with no matching profile is unrepresentable: the variant
/// *is* the role, and it carries the profile record.
#[derive(Debug, Clone)]
pub enum RoleProfile {
    Customer(CustomerProfile),
    Employee(EmployeeProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            Self::Customer(_) => Role::Customer,
            Self::Employee(_) => Role::Employee,
        }
    }
}

/// A fully resolved requester: the authenticated account plus its profile,
/// if one exists. An account with no profile is a defined state — it sees
/// an empty task set rather than an error.
#[derive(Debug, Clone)]
pub struct Requester {
    pub account: Account,
    pub profile: Option<RoleProfile>,
}

impl Requester {
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(RoleProfile::role)
    }

    pub fn customer(&self) -> Option<&CustomerProfile> {
        match &self.profile {
            Some(RoleProfile::Customer(c)) => Some(c),
            _ => None,
        }
    }

    pub fn employee(&self) -> Option<&EmployeeProfile> {
        match &self.profile {
            Some(RoleProfile::Employee(e)) => Some(e),
            _ => None,
        }
    }
}

/// The work item.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub customer_id: CustomerId,
    pub employee_id: Option<EmployeeId>,
    pub status: TaskStatus,
    pub report: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Entity invariant violation, raised by [`Task::validate`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidTask {
    #[error("report must not be empty to complete a task")]
    EmptyReport,
}

impl Task {
    /// New unassigned task owned by `customer_id`, status defaulted.
    pub fn new(id: TaskId, customer_id: CustomerId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id,
            employee_id: None,
            status: TaskStatus::default(),
            report: String::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Entity-level invariant: a task may only be `completed` while its
    /// report is non-empty. Every repository save path calls this, so the
    /// rule holds regardless of which caller produced the state.
    pub fn validate(&self) -> Result<(), InvalidTask> {
        if self.status == TaskStatus::Completed && self.report.is_empty() {
            return Err(InvalidTask::EmptyReport);
        }
        Ok(())
    }

    /// Apply the close operation: completed status plus completion stamp.
    /// The caller still has to save (and the save validates the report).
    pub fn close(&mut self, now: DateTime<Utc>) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
    }
}
