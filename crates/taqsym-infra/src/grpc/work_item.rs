use async_trait::async_trait;
use tonic::transport::Channel;

use taqsym_core::BackendError;
use taqsym_core::domain::{NewWorkItem, WorkItem};
use taqsym_core::ports::WorkItemBackend;

use super::proto::task::{self, task_service_client::TaskServiceClient};
use super::{RpcChannel, backend_error};
use crate::endpoint::{ConnectError, EndpointConfig};

/// Work-item service reached over gRPC (`task.TaskService`).
#[derive(Clone)]
pub struct GrpcWorkItemClient {
    channel: RpcChannel,
}

impl GrpcWorkItemClient {
    pub async fn connect(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            channel: RpcChannel::connect(config).await?,
        })
    }

    pub fn lazy(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            channel: RpcChannel::lazy(config)?,
        })
    }

    fn client(&self) -> TaskServiceClient<Channel> {
        TaskServiceClient::new(self.channel.channel())
    }
}

impl From<task::Task> for WorkItem {
    fn from(t: task::Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            owner_id: t.user_id,
        }
    }
}

#[async_trait]
impl WorkItemBackend for GrpcWorkItemClient {
    async fn list(&self) -> Result<Vec<WorkItem>, BackendError> {
        let request = self.channel.request(task::ListTasksRequest {});

        let mut client = self.client();
        let response = self
            .channel
            .bounded("ListTasks", client.list_tasks(request))
            .await
            .map_err(backend_error)?;

        Ok(response.tasks.into_iter().map(WorkItem::from).collect())
    }

    async fn create(&self, item: &NewWorkItem) -> Result<WorkItem, BackendError> {
        let request = self.channel.request(task::CreateTaskRequest {
            title: item.title().to_string(),
            description: item.description().to_string(),
            user_id: item.owner_id(),
        });

        let mut client = self.client();
        let response = self
            .channel
            .bounded("Create", client.create(request))
            .await
            .map_err(backend_error)?;

        response
            .task
            .map(WorkItem::from)
            .ok_or_else(|| BackendError::Internal("create returned no task".to_string()))
    }
}
