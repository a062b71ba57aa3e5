use async_trait::async_trait;

use taqsym_core::BackendError;
use taqsym_core::domain::{NewWorkItem, WorkItem};
use taqsym_core::ports::WorkItemBackend;
use taqsym_shared::dto::{CreateTaskRequest, TaskListResponse, TaskResponse};

use super::HttpBackend;
use crate::endpoint::{ConnectError, EndpointConfig};

/// Work-item service reached over HTTP (`GET /tasks`, `POST /tasks`).
#[derive(Clone)]
pub struct HttpWorkItemClient {
    backend: HttpBackend,
}

impl HttpWorkItemClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            backend: HttpBackend::new(config)?,
        })
    }
}

fn into_work_item(task: TaskResponse) -> WorkItem {
    WorkItem {
        id: task.id,
        title: task.title,
        description: task.description,
        owner_id: task.user_id,
    }
}

#[async_trait]
impl WorkItemBackend for HttpWorkItemClient {
    async fn list(&self) -> Result<Vec<WorkItem>, BackendError> {
        let response: TaskListResponse = self.backend.send(self.backend.get("/tasks")).await?;
        Ok(response.items.into_iter().map(into_work_item).collect())
    }

    async fn create(&self, item: &NewWorkItem) -> Result<WorkItem, BackendError> {
        let body = CreateTaskRequest {
            title: item.title().to_string(),
            description: item.description().to_string(),
            user_id: item.owner_id(),
        };

        let response: TaskResponse = self
            .backend
            .send(self.backend.post("/tasks").json(&body))
            .await?;
        Ok(into_work_item(response))
    }
}
