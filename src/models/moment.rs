use serde::Serialize;

/// Icon the presentation layer shows next to a moment
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MomentIcon {
    Coffee,
    Briefcase,
    Sun,
    Moon,
}

/// Time-of-day activity band
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Moment {
    pub name: &'static str,
    pub display_phrase: &'static str,
    pub icon: MomentIcon,
}

impl Moment {
    /// Text shown under the moment name: the AI message, or a generic line
    pub fn caption(&self, ai_message: Option<&str>) -> String {
        match ai_message {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => format!("Perfect for your {}", self.name.to_lowercase()),
        }
    }
}
