use taskdesk_domain::pagination::PageRequest;
use taskdesk_domain::status::TaskStatus;

use taskdesk_tasks::error::TasksServiceError;
use taskdesk_tasks::usecase::task::{
    CloseTaskUseCase, CreateTaskInput, CreateTaskUseCase, GetTaskUseCase, ListTasksUseCase,
    UpdateTaskInput, UpdateTaskUseCase,
};

use crate::helpers::InMemoryStore;

fn no_changes() -> UpdateTaskInput {
    UpdateTaskInput {
        employee_id: None,
        status: None,
        report: None,
    }
}

#[tokio::test]
async fn full_task_lifecycle() {
    let store = InMemoryStore::new();
    let (customer_account, customer) = store.seed_customer("c1", "100");
    let (employee_account, employee) = store.seed_employee("e1", "200", false);

    // Customer creates a waiting task; ownership is stamped from their
    // own profile.
    let create = CreateTaskUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let task = create
        .execute(
            customer_account.id,
            CreateTaskInput {
                employee_id: None,
                status: None,
                report: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(task.customer_id, customer.id);
    assert_eq!(task.status, TaskStatus::Waiting);

    // Employee without override claims it while waiting.
    let update = UpdateTaskUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let claimed = update
        .execute(
            employee_account.id,
            task.id,
            UpdateTaskInput {
                employee_id: Some(employee.id),
                ..no_changes()
            },
        )
        .await
        .unwrap();
    assert_eq!(claimed.employee_id, Some(employee.id));

    // Closing with an empty report is rejected before persistence.
    let close = CloseTaskUseCase {
        tasks: store.clone(),
    };
    let result = close.execute(task.id).await;
    assert!(matches!(result, Err(TasksServiceError::EmptyReport)));
    assert_eq!(store.task(task.id).unwrap().status, TaskStatus::Waiting);

    // Write the report (still waiting, so the assignee may edit), then close.
    update
        .execute(
            employee_account.id,
            task.id,
            UpdateTaskInput {
                report: Some("done".to_owned()),
                ..no_changes()
            },
        )
        .await
        .unwrap();
    let closed = close.execute(task.id).await.unwrap();
    assert_eq!(closed.status, TaskStatus::Completed);
    assert!(closed.completed_at.is_some());
    assert!(closed.updated_at >= task.updated_at);

    // Completed is terminal: further updates bounce, whoever asks.
    let result = update
        .execute(
            employee_account.id,
            task.id,
            UpdateTaskInput {
                report: Some("more".to_owned()),
                ..no_changes()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(TasksServiceError::CompletedTaskImmutable)
    ));
    let result = update
        .execute(
            customer_account.id,
            task.id,
            UpdateTaskInput {
                report: Some("more".to_owned()),
                ..no_changes()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(TasksServiceError::CompletedTaskImmutable)
    ));
}

#[tokio::test]
async fn customer_sees_exactly_their_own_tasks() {
    let store = InMemoryStore::new();
    let (account_a, customer_a) = store.seed_customer("alice", "101");
    let (_account_b, customer_b) = store.seed_customer("bob", "102");

    let mine_1 = store.seed_task(&customer_a, None, TaskStatus::Waiting, "");
    let mine_2 = store.seed_task(&customer_a, None, TaskStatus::InProgress, "");
    store.seed_task(&customer_b, None, TaskStatus::Waiting, "");

    let list = ListTasksUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let visible = list
        .execute(account_a.id, PageRequest::default())
        .await
        .unwrap();

    let mut ids: Vec<_> = visible.iter().map(|t| t.id).collect();
    ids.sort_by_key(|id| id.0);
    let mut expected = vec![mine_1.id, mine_2.id];
    expected.sort_by_key(|id| id.0);
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn employee_without_override_sees_assigned_and_unassigned_only() {
    let store = InMemoryStore::new();
    let (_ca, customer) = store.seed_customer("client", "103");
    let (account_e1, e1) = store.seed_employee("e1", "201", false);
    let (_account_e2, e2) = store.seed_employee("e2", "202", false);

    let assigned_to_me = store.seed_task(&customer, Some(e1.id), TaskStatus::InProgress, "");
    let unassigned = store.seed_task(&customer, None, TaskStatus::Waiting, "");
    let foreign = store.seed_task(&customer, Some(e2.id), TaskStatus::InProgress, "");

    let list = ListTasksUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let visible = list
        .execute(account_e1.id, PageRequest::default())
        .await
        .unwrap();

    let ids: Vec<_> = visible.iter().map(|t| t.id).collect();
    assert!(ids.contains(&assigned_to_me.id));
    assert!(ids.contains(&unassigned.id));
    assert!(!ids.contains(&foreign.id));

    // The foreign task is invisible, so retrieval reports not-found
    // rather than forbidden.
    let get = GetTaskUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let result = get.execute(account_e1.id, foreign.id).await;
    assert!(matches!(result, Err(TasksServiceError::TaskNotFound)));
}

#[tokio::test]
async fn override_employee_sees_and_edits_everything() {
    let store = InMemoryStore::new();
    let (_ca, customer) = store.seed_customer("client", "104");
    let (account_e1, e1) = store.seed_employee("e1", "203", false);
    let (account_boss, _boss) = store.seed_employee("boss", "204", true);

    let task = store.seed_task(&customer, Some(e1.id), TaskStatus::InProgress, "");

    let list = ListTasksUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let visible = list
        .execute(account_boss.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);

    let update = UpdateTaskUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };

    // The assignee cannot edit once the task left waiting…
    let result = update
        .execute(
            account_e1.id,
            task.id,
            UpdateTaskInput {
                report: Some("progress".to_owned()),
                ..no_changes()
            },
        )
        .await;
    assert!(matches!(result, Err(TasksServiceError::Forbidden)));

    // …but the override employee can.
    let updated = update
        .execute(
            account_boss.id,
            task.id,
            UpdateTaskInput {
                report: Some("progress".to_owned()),
                ..no_changes()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.report, "progress");
}

#[tokio::test]
async fn account_without_profile_gets_an_empty_list() {
    let store = InMemoryStore::new();
    let (_ca, customer) = store.seed_customer("client", "105");
    store.seed_task(&customer, None, TaskStatus::Waiting, "");

    let bare = store.seed_bare_account("ghost", "106");
    let list = ListTasksUseCase {
        profiles: store.clone(),
        tasks: store.clone(),
    };
    let visible = list.execute(bare.id, PageRequest::default()).await.unwrap();
    assert!(visible.is_empty());
}

#[tokio::test]
async fn deleting_an_employee_unassigns_their_tasks() {
    let store = InMemoryStore::new();
    let (_ca, customer) = store.seed_customer("client", "107");
    let (_ea, employee) = store.seed_employee("leaver", "205", false);
    let task = store.seed_task(&customer, Some(employee.id), TaskStatus::InProgress, "");

    store.delete_employee(employee.id);

    assert_eq!(store.employee_count(), 0);
    let survivor = store.task(task.id).unwrap();
    assert_eq!(survivor.employee_id, None);
    assert_eq!(survivor.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn deleting_a_customer_removes_their_tasks() {
    let store = InMemoryStore::new();
    let (_a1, doomed) = store.seed_customer("doomed", "108");
    let (_a2, keeper) = store.seed_customer("keeper", "109");
    store.seed_task(&doomed, None, TaskStatus::Waiting, "");
    store.seed_task(&doomed, None, TaskStatus::InProgress, "");
    let kept = store.seed_task(&keeper, None, TaskStatus::Waiting, "");

    store.delete_customer(doomed.id);

    assert_eq!(store.customer_count(), 1);
    assert_eq!(store.task_count(), 1);
    assert!(store.task(kept.id).is_some());
}

#[tokio::test]
async fn anyone_authenticated_can_close_any_task() {
    // Preserved under-enforcement: close has no per-caller check.
    let store = InMemoryStore::new();
    let (_ca, customer) = store.seed_customer("client", "110");
    let task = store.seed_task(&customer, None, TaskStatus::InProgress, "written up");

    let close = CloseTaskUseCase {
        tasks: store.clone(),
    };
    let closed = close.execute(task.id).await.unwrap();
    assert_eq!(closed.status, TaskStatus::Completed);
    assert!(closed.completed_at.is_some());
}
