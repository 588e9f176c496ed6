//! Document rendering and export.
//!
//! The builder's preview is the document model itself; export turns it into a
//! print-ready LaTeX source file the user downloads. Rasterization to PDF is
//! delegated to the user's toolchain, so the exporter stays a pure text
//! transform behind a trait — `AppState` carries `Arc<dyn DocumentExporter>`
//! and a different backend can slot in without touching handlers.

pub mod handlers;

use bytes::Bytes;
use thiserror::Error;

use crate::models::document::{CoverLetterInfo, ResumeInfo};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: {0}")]
    EmptyDocument(String),
}

/// A finished export, ready to stream back as an attachment.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

pub trait DocumentExporter: Send + Sync {
    fn export_resume(&self, resume: &ResumeInfo) -> Result<ExportedDocument, ExportError>;

    fn export_cover_letter(
        &self,
        letter: &CoverLetterInfo,
        resume: &ResumeInfo,
    ) -> Result<ExportedDocument, ExportError>;
}

/// Default exporter: renders LaTeX article source.
pub struct LatexExporter;

impl DocumentExporter for LatexExporter {
    fn export_resume(&self, resume: &ResumeInfo) -> Result<ExportedDocument, ExportError> {
        if resume.full_name.trim().is_empty() {
            return Err(ExportError::EmptyDocument(
                "the resume has no name on it".to_string(),
            ));
        }

        let source = render_resume(resume);
        Ok(ExportedDocument {
            file_name: attachment_name("Resume", &resume.full_name),
            content_type: "application/x-latex",
            bytes: Bytes::from(source),
        })
    }

    fn export_cover_letter(
        &self,
        letter: &CoverLetterInfo,
        resume: &ResumeInfo,
    ) -> Result<ExportedDocument, ExportError> {
        if letter.content.trim().is_empty() {
            return Err(ExportError::EmptyDocument(
                "the cover letter has no content".to_string(),
            ));
        }

        let source = render_cover_letter(letter, resume);
        Ok(ExportedDocument {
            file_name: attachment_name("CoverLetter", &resume.full_name),
            content_type: "application/x-latex",
            bytes: Bytes::from(source),
        })
    }
}

/// `Resume-Ada_Lovelace.tex`
fn attachment_name(kind: &str, full_name: &str) -> String {
    let safe: String = full_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                '_'
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{kind}-{safe}.tex")
}

/// Escapes LaTeX special characters in user text.
fn latex_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Multi-line user text: escape, then turn blank-line breaks into paragraphs
/// and single newlines into forced line breaks.
fn latex_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(|para| {
            para.lines()
                .map(latex_escape)
                .collect::<Vec<_>>()
                .join(" \\\\\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_resume(resume: &ResumeInfo) -> String {
    let mut doc = String::new();

    doc.push_str("\\documentclass[11pt]{article}\n");
    doc.push_str("\\usepackage[margin=1in]{geometry}\n");
    doc.push_str("\\usepackage{enumitem}\n");
    doc.push_str("\\pagestyle{empty}\n");
    doc.push_str("\\begin{document}\n\n");

    doc.push_str(&format!(
        "{{\\LARGE\\bfseries {}}}\\par\\smallskip\n",
        latex_escape(&resume.full_name)
    ));
    doc.push_str(&format!(
        "{} \\textbar{{}} {} \\textbar{{}} {}\\par\\bigskip\n\n",
        latex_escape(&resume.email),
        latex_escape(&resume.phone),
        latex_escape(&resume.address)
    ));

    if !resume.summary.trim().is_empty() {
        doc.push_str("\\section*{Professional Summary}\n");
        doc.push_str(&latex_paragraphs(&resume.summary));
        doc.push_str("\n\n");
    }

    if !resume.experience.is_empty() {
        doc.push_str("\\section*{Work Experience}\n");
        for exp in &resume.experience {
            doc.push_str(&format!(
                "\\textbf{{{}}} --- {} \\hfill {} -- {}\\par\n",
                latex_escape(&exp.job_title),
                latex_escape(&exp.company),
                latex_escape(&exp.start_date),
                latex_escape(&exp.end_date)
            ));
            if !exp.location.trim().is_empty() {
                doc.push_str(&format!("\\textit{{{}}}\\par\n", latex_escape(&exp.location)));
            }
            doc.push_str(&latex_paragraphs(&exp.description));
            doc.push_str("\\par\\medskip\n");
        }
        doc.push('\n');
    }

    if !resume.education.is_empty() {
        doc.push_str("\\section*{Education}\n");
        for edu in &resume.education {
            doc.push_str(&format!(
                "\\textbf{{{}}}, {} in {} \\hfill {}\\par\\smallskip\n",
                latex_escape(&edu.school),
                latex_escape(&edu.degree),
                latex_escape(&edu.field_of_study),
                latex_escape(&edu.graduation_date)
            ));
        }
        doc.push('\n');
    }

    if !resume.skills.is_empty() {
        doc.push_str("\\section*{Skills}\n");
        let skills: Vec<String> = resume.skills.iter().map(|s| latex_escape(s)).collect();
        doc.push_str(&skills.join(" \\textbullet{} "));
        doc.push('\n');
    }

    doc.push_str("\n\\end{document}\n");
    doc
}

fn render_cover_letter(letter: &CoverLetterInfo, resume: &ResumeInfo) -> String {
    let mut doc = String::new();

    doc.push_str("\\documentclass[11pt]{letter}\n");
    doc.push_str("\\usepackage[margin=1in]{geometry}\n");
    doc.push_str(&format!(
        "\\signature{{{}}}\n",
        latex_escape(&resume.full_name)
    ));
    doc.push_str("\\begin{document}\n");
    doc.push_str(&format!(
        "\\begin{{letter}}{{{}}}\n\n",
        latex_escape(&letter.company_name)
    ));

    doc.push_str(&latex_paragraphs(&letter.content));
    doc.push_str("\n\n\\end{letter}\n\\end{document}\n");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_escape_specials() {
        assert_eq!(latex_escape("R&D 100%"), "R\\&D 100\\%");
        assert_eq!(latex_escape("a_b"), "a\\_b");
        assert!(latex_escape("C:\\temp").starts_with("C:\\textbackslash{}"));
    }

    #[test]
    fn test_render_resume_contains_all_sections() {
        let resume = ResumeInfo::starter();
        let source = render_resume(&resume);

        assert!(source.contains("Your Name"));
        assert!(source.contains("Professional Summary"));
        assert!(source.contains("Work Experience"));
        assert!(source.contains("Tech Corp"));
        assert!(source.contains("Education"));
        assert!(source.contains("University of Technology"));
        assert!(source.contains("Skills"));
        assert!(source.contains("\\end{document}"));
    }

    #[test]
    fn test_export_resume_names_file_after_candidate() {
        let mut resume = ResumeInfo::starter();
        resume.full_name = "Ada Lovelace".to_string();

        let exported = LatexExporter.export_resume(&resume).unwrap();
        assert_eq!(exported.file_name, "Resume-Ada_Lovelace.tex");
        assert_eq!(exported.content_type, "application/x-latex");
    }

    #[test]
    fn test_export_blank_resume_fails() {
        let mut resume = ResumeInfo::starter();
        resume.full_name = "   ".to_string();

        let err = LatexExporter.export_resume(&resume).unwrap_err();
        assert!(matches!(err, ExportError::EmptyDocument(_)));
    }

    #[test]
    fn test_export_cover_letter_requires_content() {
        let resume = ResumeInfo::starter();
        let mut letter = CoverLetterInfo::starter();
        letter.content = String::new();

        let err = LatexExporter
            .export_cover_letter(&letter, &resume)
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyDocument(_)));
    }

    #[test]
    fn test_cover_letter_renders_company_and_signature() {
        let resume = ResumeInfo::starter();
        let letter = CoverLetterInfo::starter();

        let exported = LatexExporter.export_cover_letter(&letter, &resume).unwrap();
        let source = String::from_utf8(exported.bytes.to_vec()).unwrap();
        assert!(source.contains("Acme Inc."));
        assert!(source.contains("\\signature{Your Name}"));
        assert_eq!(exported.file_name, "CoverLetter-Your_Name.tex");
    }
}
