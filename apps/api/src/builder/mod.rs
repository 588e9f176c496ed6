//! The document builder: the resume/cover-letter form state and its AI
//! assists. Each assist belongs to a slot (the summary box, one experience
//! description, the skills list, the cover letter body); a slot admits one
//! generation at a time, while distinct slots may run concurrently.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use uuid::Uuid;

/// Which form slot an assist targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistTarget {
    Summary,
    ExperienceDescription { id: Uuid },
    Skills,
    CoverLetter,
}

impl AssistTarget {
    /// Stable key for the per-slot in-flight set.
    pub fn slot_key(&self) -> String {
        match self {
            AssistTarget::Summary => "summary".to_string(),
            AssistTarget::ExperienceDescription { id } => format!("exp_desc_{id}"),
            AssistTarget::Skills => "skills".to_string(),
            AssistTarget::CoverLetter => "cover_letter".to_string(),
        }
    }
}

/// "React, TypeScript , Node.js" → ["React", "TypeScript", "Node.js"]
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
