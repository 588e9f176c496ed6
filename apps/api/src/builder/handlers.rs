use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::builder::{parse_skills, prompts, AssistTarget};
use crate::errors::AppError;
use crate::llm_client::WebSource;
use crate::models::document::{CoverLetterInfo, ResumeInfo};
use crate::models::plan::PlanTier;
use crate::plans::details_for;
use crate::state::{AppCore, AppState};

#[derive(Debug, Serialize)]
pub struct BuilderView {
    pub plan: PlanTier,
    pub model: &'static str,
    pub resume: ResumeInfo,
    pub cover_letter: CoverLetterInfo,
    pub cover_letter_sources: Vec<WebSource>,
    pub assists_in_flight: Vec<String>,
}

/// The builder surface is reachable only once the gate has unlocked it.
fn require_builder(core: &AppCore) -> Result<PlanTier, AppError> {
    core.gate.active_tier().ok_or(AppError::BuilderLocked)
}

fn builder_view(core: &AppCore, plan: PlanTier) -> BuilderView {
    BuilderView {
        plan,
        model: details_for(plan).model,
        resume: core.resume.clone(),
        cover_letter: core.cover_letter.clone(),
        cover_letter_sources: core.cover_letter_sources.clone(),
        assists_in_flight: core.assists_in_flight.iter().cloned().collect(),
    }
}

/// GET /api/v1/builder
pub async fn handle_get_builder(State(state): State<AppState>) -> Result<Json<BuilderView>, AppError> {
    let core = state.lock_core();
    let plan = require_builder(&core)?;
    Ok(Json(builder_view(&core, plan)))
}

/// PUT /api/v1/builder/resume
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Json(resume): Json<ResumeInfo>,
) -> Result<Json<BuilderView>, AppError> {
    let mut core = state.lock_core();
    let plan = require_builder(&core)?;
    core.resume = resume;
    Ok(Json(builder_view(&core, plan)))
}

/// PUT /api/v1/builder/cover-letter
pub async fn handle_put_cover_letter(
    State(state): State<AppState>,
    Json(letter): Json<CoverLetterInfo>,
) -> Result<Json<BuilderView>, AppError> {
    let mut core = state.lock_core();
    let plan = require_builder(&core)?;
    core.cover_letter = letter;
    Ok(Json(builder_view(&core, plan)))
}

#[derive(Deserialize)]
pub struct AssistRequest {
    pub target: AssistTarget,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub slot: String,
    pub text: String,
    pub sources: Vec<WebSource>,
}

/// POST /api/v1/builder/assist
///
/// Drafts text for one form slot. The slot is flagged in-flight before the
/// generation call and released afterwards, success or not; a second request
/// for the same slot while one is running is rejected. A generation failure
/// touches nothing but the flag.
pub async fn handle_assist(
    State(state): State<AppState>,
    Json(req): Json<AssistRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let slot = req.target.slot_key();

    // Claim the slot and build the prompt from a consistent document snapshot.
    let (prompt, model, use_search) = {
        let mut core = state.lock_core();
        let plan = require_builder(&core)?;

        if core.assists_in_flight.contains(&slot) {
            return Err(AppError::Conflict(format!(
                "an assist for '{slot}' is already in progress"
            )));
        }

        let (prompt, use_search) = match req.target {
            AssistTarget::Summary => (prompts::summary_prompt(&core.resume), false),
            AssistTarget::ExperienceDescription { id } => {
                let exp = core
                    .resume
                    .experience_by_id(id)
                    .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;
                (prompts::experience_description_prompt(&exp.job_title), false)
            }
            AssistTarget::Skills => (prompts::skills_prompt(&core.resume), false),
            AssistTarget::CoverLetter => (
                prompts::cover_letter_prompt(&core.cover_letter, &core.resume),
                true,
            ),
        };

        core.assists_in_flight.insert(slot.clone());
        (prompt, details_for(plan).model, use_search)
    };

    // Generation runs without the lock; other slots stay usable meanwhile.
    let outcome = if use_search {
        state.llm.generate_with_search(&prompt).await.map(|grounded| {
            (grounded.text, grounded.sources)
        })
    } else {
        state
            .llm
            .generate(&prompt, model)
            .await
            .map(|text| (text, Vec::new()))
    };

    let mut core = state.lock_core();
    core.assists_in_flight.remove(&slot);

    let (text, sources) = outcome?;

    match req.target {
        AssistTarget::Summary => core.resume.summary = text.clone(),
        AssistTarget::ExperienceDescription { id } => {
            if let Some(exp) = core.resume.experience_by_id_mut(id) {
                exp.description = text.clone();
            } else {
                // The entry was edited away while the draft was in flight.
                tracing::warn!("Experience {id} vanished during generation; dropping draft");
            }
        }
        AssistTarget::Skills => core.resume.skills = parse_skills(&text),
        AssistTarget::CoverLetter => {
            core.cover_letter.content = text.clone();
            core.cover_letter_sources = sources.clone();
        }
    }

    Ok(Json(AssistResponse { slot, text, sources }))
}
