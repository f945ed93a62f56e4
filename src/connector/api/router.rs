use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{GenerateController, TaskController};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    task_controller: TaskController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            task_controller: TaskController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                prompt,
                system,
                show_reasoning,
            } => {
                self.generate_controller
                    .generate(prompt, system, show_reasoning)
                    .await
            }
            Commands::Submit { prompt, system } => self.task_controller.submit(prompt, system).await,
            Commands::Status { task_id } => self.task_controller.status(task_id).await,
            Commands::Poll {
                task_id,
                interval,
                timeout,
            } => self.task_controller.poll(task_id, interval, timeout).await,
            Commands::Kill { task_id } => self.task_controller.kill(task_id).await,
        }
    }
}
