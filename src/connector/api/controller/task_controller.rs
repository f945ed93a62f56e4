use std::time::Duration;

use anyhow::Result;

use crate::GenerationRequest;

use super::super::Container;

pub struct TaskController<'a> {
    container: &'a Container,
}

impl<'a> TaskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn submit(&self, prompt: String, system: Option<String>) -> Result<String> {
        let client = self.container.task_client()?;

        let mut request = GenerationRequest::new(prompt);
        if let Some(system) = system {
            request = request.with_system_prompt(system);
        }

        let submission = client.submit(&request).await?;
        Ok(submission.task_id().to_string())
    }

    pub async fn status(&self, task_id: String) -> Result<String> {
        let client = self.container.task_client()?;

        Ok(match client.detail(&task_id).await? {
            Some(snapshot) => format!("Task {}: {}", task_id, snapshot.status),
            None => format!("Task {}: not listed yet", task_id),
        })
    }

    pub async fn poll(
        &self,
        task_id: String,
        interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let client = self.container.task_client()?;
        let settings = self.container.config().wiro_settings()?;

        let interval = interval.unwrap_or(settings.poll_interval);
        let timeout = timeout.unwrap_or(settings.poll_timeout);

        let result = client.poll(&task_id, interval, timeout).await?;
        Ok(serde_json::to_string_pretty(result.raw())?)
    }

    pub async fn kill(&self, task_id: String) -> Result<String> {
        let client = self.container.task_client()?;

        Ok(if client.kill(&task_id).await? {
            format!("Kill requested for task {}", task_id)
        } else {
            format!("Kill rejected for task {}", task_id)
        })
    }
}
