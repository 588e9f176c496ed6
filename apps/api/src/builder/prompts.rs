// Prompt construction for the builder's AI assists. The document context is
// inlined as JSON; the gate never sees any of this.

use serde_json::json;

use crate::models::document::{CoverLetterInfo, ResumeInfo};

pub fn summary_prompt(resume: &ResumeInfo) -> String {
    let context = json!({
        "experience": resume.experience,
        "skills": resume.skills,
    });
    format!(
        "Generate a professional summary for a resume based on this information: {context}"
    )
}

pub fn experience_description_prompt(job_title: &str) -> String {
    format!(
        "For a job title of \"{job_title}\", write 3-5 professional resume bullet points \
         describing key responsibilities and achievements. Use action verbs."
    )
}

pub fn skills_prompt(resume: &ResumeInfo) -> String {
    let context = serde_json::to_string(&resume.experience).unwrap_or_default();
    format!(
        "Based on this resume information: {context}, suggest a list of 10 relevant skills. \
         Return as a comma-separated list."
    )
}

pub fn cover_letter_prompt(letter: &CoverLetterInfo, resume: &ResumeInfo) -> String {
    let context = serde_json::to_string(resume).unwrap_or_default();
    format!(
        "Write a professional cover letter for the position of '{job}' at '{company}'. \
         My name is {name}. Use my resume for context: {context}. \
         Use Google Search to find recent news or the mission of '{company}' and \
         incorporate it to show genuine interest.",
        job = letter.job_title,
        company = letter.company_name,
        name = resume.full_name,
    )
}
