pub mod task_models;
pub mod task_dto;
pub mod task_repository;
pub mod task_handlers;
pub mod task_service;

pub use task_models::{Task, TaskPriority, TaskStatus};
pub use task_dto::{CreateTaskRequest, TaskPermissionsResponse};
pub use task_repository::{PgTaskRepository, TaskRepository};
pub use task_handlers::{create_task, delete_task, get_task_permissions, list_tasks};
pub use task_service::TaskService;
