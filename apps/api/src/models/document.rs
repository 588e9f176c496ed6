use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The resume form state — one document per process, edited in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetterInfo {
    pub company_name: String,
    pub job_title: String,
    pub content: String,
}

impl ResumeInfo {
    /// Placeholder document shown when the builder first unlocks.
    pub fn starter() -> Self {
        Self {
            full_name: "Your Name".to_string(),
            email: "your.email@example.com".to_string(),
            phone: "(123) 456-7890".to_string(),
            address: "Your City, State".to_string(),
            summary: "A brief professional summary about yourself. \
                      Click the magic wand to generate one with AI!"
                .to_string(),
            experience: vec![WorkExperience {
                id: Uuid::new_v4(),
                job_title: "Software Engineer".to_string(),
                company: "Tech Corp".to_string(),
                location: "San Francisco, CA".to_string(),
                start_date: "Jan 2022".to_string(),
                end_date: "Present".to_string(),
                description: "- Developed and maintained web applications using React and Node.js.\n\
                              - Collaborated with cross-functional teams to deliver high-quality software."
                    .to_string(),
            }],
            education: vec![Education {
                id: Uuid::new_v4(),
                school: "University of Technology".to_string(),
                degree: "Bachelor of Science".to_string(),
                field_of_study: "Computer Science".to_string(),
                graduation_date: "Dec 2021".to_string(),
            }],
            skills: vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "Node.js".to_string(),
                "Tailwind CSS".to_string(),
                "Gemini API".to_string(),
            ],
        }
    }

    pub fn experience_by_id(&self, id: Uuid) -> Option<&WorkExperience> {
        self.experience.iter().find(|e| e.id == id)
    }

    pub fn experience_by_id_mut(&mut self, id: Uuid) -> Option<&mut WorkExperience> {
        self.experience.iter_mut().find(|e| e.id == id)
    }
}

impl CoverLetterInfo {
    pub fn starter() -> Self {
        Self {
            company_name: "Acme Inc.".to_string(),
            job_title: "Frontend Developer".to_string(),
            content: "Dear Hiring Manager,\n\nI am writing to express my interest in the \
                      Frontend Developer position at Acme Inc. With my experience in building \
                      modern web applications, I am confident I can contribute to your team..."
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_resume_has_one_experience_and_one_education() {
        let resume = ResumeInfo::starter();
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.education.len(), 1);
        assert!(!resume.skills.is_empty());
    }

    #[test]
    fn test_experience_lookup_by_id() {
        let mut resume = ResumeInfo::starter();
        let id = resume.experience[0].id;
        assert!(resume.experience_by_id(id).is_some());
        resume.experience_by_id_mut(id).unwrap().job_title = "Staff Engineer".to_string();
        assert_eq!(resume.experience[0].job_title, "Staff Engineer");

        assert!(resume.experience_by_id(Uuid::new_v4()).is_none());
    }
}
