use crate::domain::TaskResult;

/// Pulls the generated text out of a finished task's payload.
///
/// Returning `None` means the payload does not contain what this extractor
/// looks for; callers decide on a fallback.
pub trait ResultExtractor: Send + Sync {
    fn extract(&self, result: &TaskResult) -> Option<String>;
}

impl<F> ResultExtractor for F
where
    F: Fn(&TaskResult) -> Option<String> + Send + Sync,
{
    fn extract(&self, result: &TaskResult) -> Option<String> {
        self(result)
    }
}
