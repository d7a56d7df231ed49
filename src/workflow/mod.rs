use crate::errors::AppError;
use crate::prompt;
use crate::provider::{ChatMessage, DynProvider};
use crate::requirements;
use crate::sanitize;

/// Drives the two LLM-backed operations. Publishing is deliberately not here:
/// it is a separate caller decision, never triggered by generation.
pub struct GenerationWorkflow {
    provider: DynProvider,
}

impl GenerationWorkflow {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Description -> requirement record -> system prompt -> one LLM call ->
    /// sanitized document.
    pub async fn generate(&self, description: &str) -> Result<String, AppError> {
        if description.trim().is_empty() {
            return Err(AppError::validation("Description is required"));
        }

        let record = requirements::analyze(description);
        let system = prompt::build_system_prompt(&record);
        let conversation = vec![
            ChatMessage::system(system),
            ChatMessage::user(prompt::generation_user_prompt(description)),
        ];

        let raw = self.provider.complete(&conversation).await?;
        Ok(sanitize::clean(&raw))
    }

    /// Revises an existing document from feedback. Uses a fixed revision
    /// instruction; the requirement analysis and prompt builder are not
    /// re-run.
    pub async fn rectify(&self, code: &str, feedback: &str) -> Result<String, AppError> {
        if code.trim().is_empty() || feedback.trim().is_empty() {
            return Err(AppError::validation("Code and feedback are required"));
        }

        let conversation = vec![
            ChatMessage::system(prompt::rectify_system_prompt()),
            ChatMessage::user(format!("Original Code:\n{code}")),
            ChatMessage::user(format!("Feedback:\n{feedback}")),
        ];

        let raw = self.provider.complete(&conversation).await?;
        Ok(sanitize::clean(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Provider, Role};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every conversation it receives; answers with a canned reply or
    /// a canned failure.
    struct StubProvider {
        calls: AtomicUsize,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
        reply: Result<String, String>,
    }

    impl StubProvider {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            })
        }

        fn failing(detail: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                reply: Err(detail.to_string()),
            })
        }
    }

    #[async_trait]
    impl Provider for StubProvider {
        async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(conversation.to_vec());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(detail) => Err(AppError::Llm(detail.clone())),
            }
        }
    }

    #[tokio::test]
    async fn generate_rejects_empty_description_without_calling_out() {
        let stub = StubProvider::replying("<html></html>");
        let wf = GenerationWorkflow::new(stub.clone());

        let err = wf.generate("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generate_sanitizes_model_output() {
        let stub = StubProvider::replying("```html\n<!DOCTYPE html><html></html>\n```");
        let wf = GenerationWorkflow::new(stub.clone());

        let doc = wf.generate("Build a weather app").await.unwrap();
        assert_eq!(doc, "<!DOCTYPE html><html></html>");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

        let seen = stub.seen.lock().unwrap();
        let turns = &seen[0];
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[1].role, Role::User);
        assert!(turns[1].content.contains("Build a weather app"));
    }

    #[tokio::test]
    async fn rectify_rejects_missing_feedback() {
        let stub = StubProvider::replying("<html></html>");
        let wf = GenerationWorkflow::new(stub.clone());

        let err = wf.rectify("<html></html>", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rectify_sends_three_turns_in_order() {
        let stub = StubProvider::replying("<html>v2</html>");
        let wf = GenerationWorkflow::new(stub.clone());

        wf.rectify("<html>v1</html>", "make it blue").await.unwrap();

        let seen = stub.seen.lock().unwrap();
        let turns = &seen[0];
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[0].content, prompt::rectify_system_prompt());
        assert_eq!(turns[1].role, Role::User);
        assert!(turns[1].content.starts_with("Original Code:\n"));
        assert!(turns[1].content.contains("<html>v1</html>"));
        assert_eq!(turns[2].role, Role::User);
        assert!(turns[2].content.starts_with("Feedback:\n"));
        assert!(turns[2].content.contains("make it blue"));
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_with_detail() {
        let stub = StubProvider::failing("LLM API error (503): upstream down");
        let wf = GenerationWorkflow::new(stub.clone());

        let err = wf.generate("Build a chess game").await.unwrap_err();
        match err {
            AppError::Llm(detail) => assert!(detail.contains("503")),
            other => panic!("expected Llm error, got {other:?}"),
        }
    }
}
