use tracing::debug;

use super::{ApiClient, ApiError, TaskBackend};
use crate::models::{Task, TaskDraft};

/// 任务接口:
///   GET    /api/tasks/user/{userId}
///   POST   /api/tasks
///   PUT    /api/tasks/{id}
///   DELETE /api/tasks/{id}
///   PUT    /api/tasks/{id}/complete
impl TaskBackend for ApiClient {
    fn tasks_for_user(&self, user_id: u64) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/api/tasks/user/{}", user_id)))
            .send()?;
        let tasks: Vec<Task> = Self::check(response)?.json()?;
        debug!(user_id, count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let response = self.http().post(self.url("/api/tasks")).json(draft).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn update_task(&self, id: u64, draft: &TaskDraft) -> Result<Task, ApiError> {
        let response = self
            .http()
            .put(self.url(&format!("/api/tasks/{}", id)))
            .json(draft)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.url(&format!("/api/tasks/{}", id)))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn complete_task(&self, id: u64) -> Result<(), ApiError> {
        let response = self
            .http()
            .put(self.url(&format!("/api/tasks/{}/complete", id)))
            .send()?;
        // 返回体是更新后的任务，但随后整表重载，这里不解析
        Self::check(response)?;
        Ok(())
    }
}
