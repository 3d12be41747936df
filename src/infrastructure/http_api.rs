use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{
    api::TodoApi,
    todo::{NewTodo, Todo, UpdateTodo},
};

/// Request timeout. The controller itself never times out a submission; this
/// bounds the transport so a hung backend surfaces as a failed create.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `TodoApi` over HTTP/JSON against `<base_url>/todos`.
#[derive(Clone)]
pub struct HttpTodoApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTodoApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        tracing::debug!(url = %self.todos_url(), "list todos");
        let res = self.client.get(self.todos_url()).send().await?.error_for_status()?;
        Ok(res.json().await?)
    }

    async fn create_todo(&self, input: NewTodo) -> Result<Todo> {
        tracing::debug!(title = %input.title, "create todo");
        let res = self
            .client
            .post(self.todos_url())
            .json(&input)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn update_todo(&self, id: i64, input: UpdateTodo) -> Result<Todo> {
        tracing::debug!(id, "update todo");
        let res = self
            .client
            .patch(self.todo_url(id))
            .json(&input)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }

    async fn delete_todo(&self, id: i64) -> Result<()> {
        tracing::debug!(id, "delete todo");
        self.client
            .delete(self.todo_url(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
