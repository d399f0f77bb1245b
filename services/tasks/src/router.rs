use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use taskdesk_core::http::{healthz, readyz, request_id_layer};

use crate::handlers::{
    profile::{create_customer, create_employee, get_identity, list_customers, list_employees},
    task::{close_task, create_task, delete_task, get_task, list_tasks, update_task},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Identity
        .route("/identity", get(get_identity))
        // Profiles
        .route("/customers", post(create_customer).get(list_customers))
        .route("/employees", post(create_employee).get(list_employees))
        // Tasks
        .route("/tasks", post(create_task).get(list_tasks))
        .route(
            "/tasks/{id}",
            get(get_task)
                .put(update_task)
                .patch(update_task)
                .delete(delete_task),
        )
        .route("/tasks/{id}/close", post(close_task))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
