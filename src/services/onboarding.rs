use crate::{
    db::PreferenceStore,
    error::{AppError, AppResult},
    models::{PreferenceQuestion, PreferenceSelections, QUESTIONS},
};

/// Where the flow stands after `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingProgress {
    /// Moved to the question at this index
    Step(usize),
    /// Answers and completion flag are persisted
    Completed,
}

/// Short preference questionnaire shown once per device
#[derive(Debug, Clone, Default)]
pub struct OnboardingFlow {
    step: usize,
    selections: PreferenceSelections,
    complete: bool,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow still needs to run on this device
    pub async fn should_show(store: &dyn PreferenceStore) -> AppResult<bool> {
        Ok(!store.read_onboarding_complete().await?)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn is_final_step(&self) -> bool {
        self.step + 1 == QUESTIONS.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// `None` once the flow is complete
    pub fn current_question(&self) -> Option<&'static PreferenceQuestion> {
        if self.complete {
            return None;
        }
        QUESTIONS.get(self.step)
    }

    pub fn selections(&self) -> &PreferenceSelections {
        &self.selections
    }

    pub fn current_selections(&self) -> &[String] {
        match self.current_question() {
            Some(question) => self.selections.selected(question.id),
            None => &[],
        }
    }

    /// Toggles or replaces `option` on the current question
    pub fn select(&mut self, option: &str) -> AppResult<()> {
        let question = self.require_question()?;
        self.selections.select(question, option)
    }

    /// At least one option is chosen on the current question
    pub fn can_proceed(&self) -> bool {
        !self.current_selections().is_empty()
    }

    /// Moves to the next question, or persists everything on the last one
    pub async fn advance(&mut self, store: &dyn PreferenceStore) -> AppResult<OnboardingProgress> {
        let question = self.require_question()?;
        if !self.can_proceed() {
            return Err(AppError::InvalidInput(format!(
                "select at least one option for {:?}",
                question.id
            )));
        }

        if !self.is_final_step() {
            self.step += 1;
            return Ok(OnboardingProgress::Step(self.step));
        }

        store.write_preferences(&self.selections).await?;
        store.mark_onboarding_complete().await?;
        self.complete = true;

        tracing::info!(
            tags = self.selections.flatten_tags().len(),
            "Onboarding completed"
        );

        Ok(OnboardingProgress::Completed)
    }

    /// Dismisses the flow for good without saving any answers
    pub async fn skip(&mut self, store: &dyn PreferenceStore) -> AppResult<()> {
        store.mark_onboarding_complete().await?;
        self.complete = true;
        tracing::info!(step = self.step, "Onboarding skipped");
        Ok(())
    }

    fn require_question(&self) -> AppResult<&'static PreferenceQuestion> {
        self.current_question()
            .ok_or_else(|| AppError::InvalidInput("onboarding already complete".to_string()))
    }
}
