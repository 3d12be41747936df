use async_trait::async_trait;
use super::todo::{NewTodo, Todo, UpdateTodo};

/// Remote todo store exposed by the backend REST API.
///
/// Any transport or server failure comes back as an opaque error; callers
/// decide how much of it to surface.
#[async_trait]
pub trait TodoApi: Send + Sync + 'static {
    async fn list_todos(&self) -> anyhow::Result<Vec<Todo>>;
    async fn create_todo(&self, input: NewTodo) -> anyhow::Result<Todo>;
    async fn update_todo(&self, id: i64, input: UpdateTodo) -> anyhow::Result<Todo>;
    async fn delete_todo(&self, id: i64) -> anyhow::Result<()>;
}
