use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Onboarding question identifier
///
/// Declaration order is the order selections are flattened into profile tags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionId {
    Style,
    Interests,
    Budget,
}

/// One onboarding question and its fixed option labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceQuestion {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Multi-choice questions toggle options; single-choice questions replace
    pub multi: bool,
}

impl PreferenceQuestion {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

pub static QUESTIONS: [PreferenceQuestion; 3] = [
    PreferenceQuestion {
        id: QuestionId::Style,
        prompt: "What's your style?",
        options: &["Minimalist", "Modern", "Classic", "Eclectic"],
        multi: true,
    },
    PreferenceQuestion {
        id: QuestionId::Interests,
        prompt: "What are you interested in?",
        options: &["Tech", "Fashion", "Home & Living", "Sports", "Books", "Art"],
        multi: true,
    },
    PreferenceQuestion {
        id: QuestionId::Budget,
        prompt: "Your typical budget?",
        options: &["Budget-Friendly", "Mid-Range", "Premium", "Luxury"],
        multi: false,
    },
];

/// Options the user picked, per question
///
/// Serializes as a flat JSON object: `{"style": ["Minimalist"], "budget": ["Premium"]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PreferenceSelections(BTreeMap<QuestionId, Vec<String>>);

impl PreferenceSelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a selection for `question`
    ///
    /// Multi-choice: toggles the option on or off. Single-choice: the option
    /// replaces whatever was selected.
    pub fn select(&mut self, question: &PreferenceQuestion, option: &str) -> AppResult<()> {
        if !question.has_option(option) {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not an option for {:?}",
                option, question.id
            )));
        }

        let chosen = self.0.entry(question.id).or_default();
        if question.multi {
            if let Some(pos) = chosen.iter().position(|o| o == option) {
                chosen.remove(pos);
            } else {
                chosen.push(option.to_string());
            }
        } else {
            *chosen = vec![option.to_string()];
        }
        Ok(())
    }

    pub fn selected(&self, question: QuestionId) -> &[String] {
        self.0.get(&question).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// All selected labels, lowercased, in question order
    ///
    /// Duplicates are kept.
    pub fn flatten_tags(&self) -> Vec<String> {
        self.0
            .values()
            .flatten()
            .map(|label| label.to_lowercase())
            .collect()
    }
}

impl From<BTreeMap<QuestionId, Vec<String>>> for PreferenceSelections {
    fn from(map: BTreeMap<QuestionId, Vec<String>>) -> Self {
        Self(map)
    }
}
