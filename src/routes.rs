use crate::{
    middleware::auth_middleware,
    notification::{self, Notification},
    state::AppState,
    task::{self, CreateTaskRequest, Task, TaskPermissionsResponse, TaskPriority, TaskStatus},
    user::{self, UserSummary},
};
use axum::{
    middleware,
    routing::{delete, get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        task::task_handlers::list_tasks,
        task::task_handlers::create_task,
        task::task_handlers::delete_task,
        task::task_handlers::get_task_permissions,
        user::user_handlers::list_users,
        notification::notification_handlers::list_notifications,
        notification::notification_handlers::mark_notification_read,
    ),
    components(
        schemas(
            CreateTaskRequest,
            Task,
            TaskStatus,
            TaskPriority,
            TaskPermissionsResponse,
            UserSummary,
            Notification,
        )
    ),
    tags(
        (name = "tasks", description = "Task and permission endpoints"),
        (name = "users", description = "User directory"),
        (name = "notifications", description = "Notification endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every API route requires a session
    let project_routes = Router::new()
        .route("/:id/tasks", get(task::list_tasks).post(task::create_task))
        .route("/:id/tasks/:task_id", delete(task::delete_task))
        .route(
            "/:id/tasks/:task_id/permissions",
            get(task::get_task_permissions),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let user_routes = Router::new()
        .route("/", get(user::list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let notification_routes = Router::new()
        .route("/", get(notification::list_notifications))
        .route("/:id/read", patch(notification::mark_notification_read))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .nest("/projects", project_routes)
        .nest("/users", user_routes)
        .nest("/notifications", notification_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
