use log::{debug, warn};

use crate::error::{GenerationError, EMPTY_PROMPT};
use crate::models::{ContentRequest, ContentType, HistoryEntry, MAX_CHAR_LIMIT};
use crate::services::gemini::ContentGenerator;
use crate::services::history::HistoryStore;
use crate::services::storage::KeyValueStore;

/// What the user is currently editing.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Draft {
    pub content_type: ContentType,
    pub prompt: String,
}

/// Per-page generation state. Never persisted.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct GenerationSession {
    pub draft: Draft,
    pub in_flight: bool,
    pub last_result: Option<String>,
    pub last_error: Option<String>,
    pub last_submitted: Option<ContentRequest>,
}

/// Drives a single generation at a time and records successes in history.
///
/// `submit` runs the whole cycle. Callers that cannot hold `&mut self`
/// across the remote call (the UI, which shares the controller behind a
/// `RefCell`) use `begin`, await the generator themselves, then `finish`.
pub struct GenerationController<S: KeyValueStore> {
    session: GenerationSession,
    history: HistoryStore<S>,
}

impl<S: KeyValueStore> GenerationController<S> {
    pub fn new(storage: S) -> Self {
        Self::with_history(HistoryStore::new(storage))
    }

    pub fn with_history(history: HistoryStore<S>) -> Self {
        Self {
            session: GenerationSession::default(),
            history,
        }
    }

    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn is_in_flight(&self) -> bool {
        self.session.in_flight
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.session.draft.content_type = content_type;
    }

    /// Returns false, leaving the draft alone, when `prompt` is over the limit.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> bool {
        let prompt = prompt.into();
        if prompt.chars().count() > MAX_CHAR_LIMIT {
            return false;
        }
        self.session.draft.prompt = prompt;
        true
    }

    pub fn clear_prompt(&mut self) {
        self.session.draft.prompt.clear();
    }

    /// Validates and marks the session in flight. The returned request is what
    /// must be handed to the generator and then to `finish`.
    pub fn begin(
        &mut self,
        content_type: ContentType,
        prompt: &str,
    ) -> Result<ContentRequest, GenerationError> {
        if self.session.in_flight {
            warn!("ignoring submit while a generation is in flight");
            return Err(GenerationError::Busy);
        }
        if let Err(e) = validate_prompt(prompt) {
            self.session.last_error = Some(e.user_message());
            return Err(e);
        }

        self.session.in_flight = true;
        self.session.last_error = None;
        self.session.last_result = None;
        debug!("submitting {} request", content_type);
        Ok(ContentRequest::new(content_type, prompt))
    }

    /// Like `begin`, but for "regenerate": the last submitted request, else the
    /// draft if it has text. `Ok(None)` means there is nothing to regenerate.
    pub fn begin_regenerate(&mut self) -> Result<Option<ContentRequest>, GenerationError> {
        if self.session.in_flight {
            warn!("ignoring regenerate while a generation is in flight");
            return Err(GenerationError::Busy);
        }
        let request = match &self.session.last_submitted {
            Some(last) => last.clone(),
            None if !self.session.draft.prompt.trim().is_empty() => ContentRequest::new(
                self.session.draft.content_type.clone(),
                self.session.draft.prompt.clone(),
            ),
            None => return Ok(None),
        };
        let ContentRequest {
            content_type,
            prompt,
        } = request;
        self.begin(content_type, &prompt).map(Some)
    }

    pub fn finish(
        &mut self,
        request: ContentRequest,
        outcome: Result<String, GenerationError>,
    ) -> Result<(), GenerationError> {
        self.session.in_flight = false;
        match outcome {
            Ok(text) => {
                self.session.last_result = Some(text.clone());
                self.session.last_error = None;
                self.session.last_submitted = Some(request.clone());
                self.history.append(HistoryEntry::new(request, text));
                Ok(())
            }
            Err(e) => {
                self.session.last_error = Some(e.user_message());
                self.session.last_result = None;
                Err(e)
            }
        }
    }

    pub async fn submit<G>(
        &mut self,
        generator: &G,
        content_type: ContentType,
        prompt: &str,
    ) -> Result<(), GenerationError>
    where
        G: ContentGenerator + ?Sized,
    {
        let request = self.begin(content_type, prompt)?;
        self.dispatch(generator, request).await
    }

    pub async fn regenerate<G>(&mut self, generator: &G) -> Result<(), GenerationError>
    where
        G: ContentGenerator + ?Sized,
    {
        match self.begin_regenerate()? {
            Some(request) => self.dispatch(generator, request).await,
            None => Ok(()),
        }
    }

    async fn dispatch<G>(&mut self, generator: &G, request: ContentRequest) -> Result<(), GenerationError>
    where
        G: ContentGenerator + ?Sized,
    {
        let outcome = generator
            .generate(&request.content_type, &request.prompt)
            .await;
        self.finish(request, outcome)
    }

    pub fn clear_all(&mut self) {
        self.session.draft.prompt.clear();
        self.session.last_result = None;
        self.session.last_error = None;
        self.session.last_submitted = None;
    }

    pub fn select_history(&mut self, entry: &HistoryEntry) {
        self.session.draft = Draft {
            content_type: entry.request.content_type.clone(),
            prompt: entry.request.prompt.clone(),
        };
        self.session.last_result = Some(entry.result.clone());
        self.session.last_submitted = Some(entry.request.clone());
        self.session.last_error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.session.last_error = None;
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn validate_prompt(prompt: &str) -> Result<(), GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::Validation(EMPTY_PROMPT.to_string()));
    }
    if prompt.chars().count() > MAX_CHAR_LIMIT {
        return Err(GenerationError::Validation(format!(
            "Please keep your description under {} characters.",
            MAX_CHAR_LIMIT
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GENERIC_FAILURE, SAFETY_BLOCKED};
    use crate::services::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::cell::RefCell;

    /// Replies from a script and records every call.
    #[derive(Default)]
    struct ScriptedGenerator {
        replies: RefCell<Vec<Result<String, GenerationError>>>,
        calls: RefCell<Vec<(ContentType, String)>>,
    }

    impl ScriptedGenerator {
        fn replying(replies: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into_iter().rev().collect()),
                calls: RefCell::default(),
            }
        }

        fn calls(&self) -> Vec<(ContentType, String)> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl ContentGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            content_type: &ContentType,
            prompt: &str,
        ) -> Result<String, GenerationError> {
            self.calls
                .borrow_mut()
                .push((content_type.clone(), prompt.to_string()));
            self.replies
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok(format!("generated for {}", prompt)))
        }
    }

    fn controller() -> GenerationController<MemoryStorage> {
        GenerationController::new(MemoryStorage::default())
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_without_a_remote_call() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();

        for prompt in ["", "   ", "\n\t "] {
            let err = ctrl
                .submit(&generator, ContentType::BlogIdea, prompt)
                .await
                .unwrap_err();
            assert!(matches!(err, GenerationError::Validation(_)));
            assert_eq!(ctrl.session().last_error.as_deref(), Some(EMPTY_PROMPT));
            assert!(!ctrl.is_in_flight());
        }
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn over_long_prompt_is_rejected() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();
        let prompt = "a".repeat(MAX_CHAR_LIMIT + 1);

        let err = ctrl
            .submit(&generator, ContentType::BlogIdea, &prompt)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Validation(_)));
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn success_sets_result_and_writes_history() {
        let generator = ScriptedGenerator::replying(vec![Ok("# Cold Brew\n...".into())]);
        let mut ctrl = controller();

        ctrl.submit(&generator, ContentType::BlogIdea, "cold brew brand")
            .await
            .unwrap();

        let session = ctrl.session();
        assert_eq!(session.last_result.as_deref(), Some("# Cold Brew\n..."));
        assert_eq!(session.last_error, None);
        assert!(!session.in_flight);
        assert_eq!(
            session.last_submitted,
            Some(ContentRequest::new(ContentType::BlogIdea, "cold brew brand"))
        );

        let first = &ctrl.history()[0];
        assert_eq!(first.request.content_type, ContentType::BlogIdea);
        assert_eq!(first.request.prompt, "cold brew brand");
        assert_eq!(first.result, "# Cold Brew\n...");
        assert_eq!(
            generator.calls(),
            vec![(ContentType::BlogIdea, "cold brew brand".to_string())]
        );
    }

    #[tokio::test]
    async fn failure_sets_error_and_skips_history() {
        let generator = ScriptedGenerator::replying(vec![Err(GenerationError::SafetyBlock)]);
        let mut ctrl = controller();
        ctrl.select_history(&HistoryEntry::new(
            ContentRequest::new(ContentType::SocialMedia, "old"),
            "old result".into(),
        ));

        let err = ctrl
            .submit(&generator, ContentType::SocialMedia, "something edgy")
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::SafetyBlock);
        assert_eq!(ctrl.session().last_error.as_deref(), Some(SAFETY_BLOCKED));
        assert_eq!(ctrl.session().last_result, None);
        assert!(!ctrl.is_in_flight());
        assert!(ctrl.history().is_empty());
    }

    #[tokio::test]
    async fn failure_without_message_uses_generic_text() {
        let generator =
            ScriptedGenerator::replying(vec![Err(GenerationError::Configuration(String::new()))]);
        let mut ctrl = controller();

        let _ = ctrl.submit(&generator, ContentType::BlogIdea, "x").await;
        assert_eq!(ctrl.session().last_error.as_deref(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn begin_while_in_flight_is_busy_and_leaves_state_alone() {
        let mut ctrl = controller();
        ctrl.begin(ContentType::BlogIdea, "first").unwrap();
        let before = ctrl.session().clone();

        let err = ctrl.begin(ContentType::BlogIdea, "second").unwrap_err();
        assert_eq!(err, GenerationError::Busy);
        assert_eq!(ctrl.session(), &before);

        assert_eq!(ctrl.begin_regenerate().unwrap_err(), GenerationError::Busy);
        assert_eq!(ctrl.session(), &before);
    }

    #[tokio::test]
    async fn regenerate_while_in_flight_is_busy_even_with_nothing_to_replay() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();
        ctrl.begin(ContentType::BlogIdea, "pending").unwrap();
        let before = ctrl.session().clone();
        assert_eq!(before.last_submitted, None);
        assert_eq!(before.draft.prompt, "");

        let err = ctrl.regenerate(&generator).await.unwrap_err();
        assert_eq!(err, GenerationError::Busy);
        assert_eq!(ctrl.session(), &before);
        assert!(generator.calls().is_empty());
    }

    #[test]
    fn begin_clears_previous_result_and_error() {
        let mut ctrl = controller();
        ctrl.select_history(&HistoryEntry::new(
            ContentRequest::new(ContentType::SocialMedia, "old"),
            "old result".into(),
        ));
        ctrl.session.last_error = Some("stale".into());

        ctrl.begin(ContentType::BlogIdea, "fresh").unwrap();
        assert!(ctrl.is_in_flight());
        assert_eq!(ctrl.session().last_result, None);
        assert_eq!(ctrl.session().last_error, None);
    }

    #[tokio::test]
    async fn regenerate_reuses_last_submitted_request() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();
        ctrl.set_content_type(ContentType::ProductDesc);
        ctrl.set_prompt("solar lamp");
        ctrl.submit(&generator, ContentType::ProductDesc, "solar lamp")
            .await
            .unwrap();

        ctrl.set_content_type(ContentType::EmailTemplate);
        ctrl.set_prompt("something else entirely");
        ctrl.regenerate(&generator).await.unwrap();

        assert_eq!(
            generator.calls(),
            vec![
                (ContentType::ProductDesc, "solar lamp".to_string()),
                (ContentType::ProductDesc, "solar lamp".to_string()),
            ]
        );
        assert_eq!(ctrl.history().len(), 2);
    }

    #[tokio::test]
    async fn regenerate_falls_back_to_draft_then_noops() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();

        ctrl.regenerate(&generator).await.unwrap();
        assert!(generator.calls().is_empty());

        ctrl.set_content_type(ContentType::EmailTemplate);
        ctrl.set_prompt("welcome email");
        ctrl.regenerate(&generator).await.unwrap();
        assert_eq!(
            generator.calls(),
            vec![(ContentType::EmailTemplate, "welcome email".to_string())]
        );
    }

    #[tokio::test]
    async fn select_history_restores_entry_without_calling_remote() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();
        ctrl.submit(&generator, ContentType::BlogIdea, "one").await.unwrap();
        ctrl.submit(&generator, ContentType::EmailTemplate, "two").await.unwrap();
        let order_before: Vec<String> = ctrl.history().iter().map(|e| e.id.clone()).collect();
        let older = ctrl.history()[1].clone();
        ctrl.session.last_error = Some("stale".into());

        ctrl.select_history(&older);

        let session = ctrl.session();
        assert_eq!(session.draft.content_type, ContentType::BlogIdea);
        assert_eq!(session.draft.prompt, "one");
        assert_eq!(session.last_result.as_deref(), Some(older.result.as_str()));
        assert_eq!(session.last_submitted.as_ref(), Some(&older.request));
        assert_eq!(session.last_error, None);
        assert_eq!(generator.calls().len(), 2);
        let order_after: Vec<String> = ctrl.history().iter().map(|e| e.id.clone()).collect();
        assert_eq!(order_before, order_after);
    }

    #[tokio::test]
    async fn clear_all_resets_session_but_not_history() {
        let generator = ScriptedGenerator::default();
        let mut ctrl = controller();
        ctrl.set_prompt("topic");
        ctrl.submit(&generator, ContentType::BlogIdea, "topic").await.unwrap();

        ctrl.clear_all();

        let session = ctrl.session();
        assert_eq!(session.draft.prompt, "");
        assert_eq!(session.last_result, None);
        assert_eq!(session.last_error, None);
        assert_eq!(session.last_submitted, None);
        assert_eq!(ctrl.history().len(), 1);

        ctrl.regenerate(&generator).await.unwrap();
        assert_eq!(generator.calls().len(), 1);
    }

    #[test]
    fn set_prompt_enforces_the_character_limit() {
        let mut ctrl = controller();
        assert!(ctrl.set_prompt("é".repeat(MAX_CHAR_LIMIT)));
        assert!(!ctrl.set_prompt("é".repeat(MAX_CHAR_LIMIT + 1)));
        assert_eq!(ctrl.session().draft.prompt.chars().count(), MAX_CHAR_LIMIT);
    }

    #[test]
    fn dismiss_error_only_touches_the_error() {
        let mut ctrl = controller();
        ctrl.set_prompt("draft");
        let _ = ctrl.begin(ContentType::BlogIdea, " ");
        assert!(ctrl.session().last_error.is_some());

        ctrl.dismiss_error();
        assert_eq!(ctrl.session().last_error, None);
        assert_eq!(ctrl.session().draft.prompt, "draft");
    }

    #[tokio::test]
    async fn history_is_capped_to_most_recent_entries() {
        let generator = ScriptedGenerator::default();
        let storage = MemoryStorage::default();
        let mut ctrl = GenerationController::new(storage.clone());
        for n in 0..8 {
            ctrl.submit(&generator, ContentType::SocialMedia, &format!("p{}", n))
                .await
                .unwrap();
        }

        let prompts: Vec<&str> = ctrl.history().iter().map(|e| e.request.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["p7", "p6", "p5", "p4", "p3"]);

        let reloaded = GenerationController::new(storage.clone());
        assert_eq!(reloaded.history(), ctrl.history());

        ctrl.clear_history();
        assert!(ctrl.history().is_empty());
        assert!(GenerationController::new(storage).history().is_empty());
    }
}
