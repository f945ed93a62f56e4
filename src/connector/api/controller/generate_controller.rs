use anyhow::Result;

use crate::ChatCompletion;

use super::super::Container;

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(
        &self,
        prompt: String,
        system: Option<String>,
        show_reasoning: bool,
    ) -> Result<String> {
        let use_case = self.container.generate_use_case()?;
        let completion = use_case.execute(&prompt, system.as_deref()).await?;
        Ok(self.format_completion(&completion, show_reasoning))
    }

    fn format_completion(&self, completion: &ChatCompletion, show_reasoning: bool) -> String {
        match (&completion.reasoning, show_reasoning) {
            (Some(reasoning), true) => format!(
                "Reasoning\n=========\n{}\n\nAnswer\n======\n{}",
                reasoning, completion.content
            ),
            _ => completion.content.clone(),
        }
    }
}
