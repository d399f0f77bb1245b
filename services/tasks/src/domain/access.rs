//! Task visibility and mutation authorization.
//!
//! Visibility is expressed as a [`TaskScope`] that repositories translate
//! into query filters. Mutation authorization is an ordered list of
//! predicates over (requester, task, method kind); evaluation stops at the
//! first rule that reaches a verdict, and anything no rule claims is
//! denied. The terminal-state rule runs before every other mutation check.

use taskdesk_domain::id::{CustomerId, EmployeeId};
use taskdesk_domain::status::TaskStatus;

use crate::domain::types::{Requester, RoleProfile, Task};

/// The set of tasks a requester may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// No profile — a defined, empty result set, not an error.
    None,
    /// Customer: only tasks owned by their profile.
    OwnedBy(CustomerId),
    /// Employee without override: their tasks plus unassigned ones.
    AssignedOrUnassigned(EmployeeId),
    /// Employee with the override flag: everything.
    All,
}

/// Compute the visible scope for a resolved requester.
pub fn visible_scope(requester: &Requester) -> TaskScope {
    match &requester.profile {
        Some(RoleProfile::Customer(c)) => TaskScope::OwnedBy(c.id),
        Some(RoleProfile::Employee(e)) if e.can_access_all_tasks => TaskScope::All,
        Some(RoleProfile::Employee(e)) => TaskScope::AssignedOrUnassigned(e.id),
        None => TaskScope::None,
    }
}

/// Request method kind as the rules see it. Deletion is not represented:
/// the delete endpoint is rejected outright before authorization runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Read,
    Write,
}

/// Why a mutation was refused.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("completed tasks are read-only")]
    Terminal,
    #[error("forbidden")]
    NotPermitted,
}

enum Verdict {
    Allow,
    Deny(AccessDenied),
    /// This rule has nothing to say; fall through to the next one.
    Pass,
}

type Rule = fn(&Requester, &Task, MethodKind) -> Verdict;

/// Ordered rule pipeline. Precedence matters: reads short-circuit first,
/// then the terminal-state check guards every mutation path.
const RULES: &[Rule] = &[
    allow_safe_methods,
    deny_terminal_state,
    claim_while_waiting,
    owner_or_override,
];

/// Gate an operation on a task the requester can already see.
///
/// Scope filtering happens before this is called — a task outside the
/// requester's scope is a not-found, never a forbidden.
pub fn authorize(requester: &Requester, task: &Task, method: MethodKind) -> Result<(), AccessDenied> {
    for rule in RULES {
        match rule(requester, task, method) {
            Verdict::Allow => return Ok(()),
            Verdict::Deny(denied) => return Err(denied),
            Verdict::Pass => {}
        }
    }
    Err(AccessDenied::NotPermitted)
}

fn allow_safe_methods(_requester: &Requester, _task: &Task, method: MethodKind) -> Verdict {
    match method {
        MethodKind::Read => Verdict::Allow,
        MethodKind::Write => Verdict::Pass,
    }
}

fn deny_terminal_state(_requester: &Requester, task: &Task, _method: MethodKind) -> Verdict {
    if task.status.is_terminal() {
        Verdict::Deny(AccessDenied::Terminal)
    } else {
        Verdict::Pass
    }
}

/// Unassigned tasks, and tasks assigned to the requesting employee, may
/// only be edited while still waiting — the claim window.
fn claim_while_waiting(requester: &Requester, task: &Task, _method: MethodKind) -> Verdict {
    let assigned_to_requester = match (requester.employee(), task.employee_id) {
        (Some(employee), Some(assignee)) => employee.id == assignee,
        _ => false,
    };
    if task.employee_id.is_none() || assigned_to_requester {
        if task.status == TaskStatus::Waiting {
            Verdict::Allow
        } else {
            Verdict::Deny(AccessDenied::NotPermitted)
        }
    } else {
        Verdict::Pass
    }
}

/// A task assigned to somebody else: only the owning customer or an
/// employee with the override flag may touch it.
fn owner_or_override(requester: &Requester, task: &Task, _method: MethodKind) -> Verdict {
    let allowed = match &requester.profile {
        Some(RoleProfile::Customer(c)) => c.id == task.customer_id,
        Some(RoleProfile::Employee(e)) => e.can_access_all_tasks,
        None => false,
    };
    if allowed {
        Verdict::Allow
    } else {
        Verdict::Deny(AccessDenied::NotPermitted)
    }
}
