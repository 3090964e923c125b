//! ATS resume builder — turns a raw profile into a keyword-optimized
//! resume document with an ATS score and gap report.

use serde::{Deserialize, Serialize};

use crate::advice::prompts::ATS_RESUME_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm::{CallOpts, LlmClient};

/// Raw profile fields as the user entered them. Everything is free text;
/// the model does the structuring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub experience_years: String,
    #[serde(default)]
    pub work_experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub achievements: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationItem {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub gpa: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

/// The generated resume document itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
}

/// Resume plus the ATS audit around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsResume {
    #[serde(default)]
    pub ats_score: u32,
    #[serde(default)]
    pub ats_tips: Vec<String>,
    #[serde(default)]
    pub keywords_found: Vec<String>,
    #[serde(default)]
    pub keywords_missing: Vec<String>,
    #[serde(default)]
    pub resume: ResumeDocument,
}

/// Builds an ATS-optimized resume from the profile.
pub async fn build_resume(
    llm: &LlmClient,
    profile: &ResumeProfile,
) -> Result<AtsResume, AppError> {
    let prompt = ATS_RESUME_PROMPT_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{target_role}", &profile.target_role)
        .replace(
            "{job_description}",
            profile.job_description.as_deref().unwrap_or("Not provided"),
        )
        .replace("{experience_years}", &profile.experience_years)
        .replace("{work_experience}", &profile.work_experience)
        .replace("{skills}", &profile.skills)
        .replace("{education}", &profile.education)
        .replace("{certifications}", &profile.certifications)
        .replace("{projects}", &profile.projects)
        .replace("{achievements}", &profile.achievements);

    llm.call_structured::<AtsResume>(
        &prompt,
        CallOpts {
            max_tokens: 8192,
            temperature: 0.4,
            json_mode: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("resume build failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ats_resume_deserializes_from_full_fixture() {
        let json = r#"{
            "ats_score": 92,
            "ats_tips": ["Use more action verbs"],
            "keywords_found": ["Python"],
            "keywords_missing": ["Kubernetes"],
            "resume": {
                "contact": {"name": "A. Candidate", "email": "a@example.com", "phone": "+91-9999999999", "linkedin": "linkedin.com/in/ac", "location": "Pune, MH"},
                "summary": "Backend engineer with 4 years of experience.",
                "experience": [
                    {"title": "SDE II", "company": "Acme", "duration": "Jan 2022 – Present", "bullets": ["Cut p99 latency 40%"]}
                ],
                "skills": {"technical": ["Rust"], "soft": ["Leadership"], "tools": ["Docker"]},
                "education": [{"degree": "B.Tech CS", "institution": "IIT", "year": "2020", "gpa": "8.5/10"}],
                "certifications": ["AWS SAA"],
                "projects": [{"name": "plume", "description": "Log shipper in Rust", "link": ""}]
            }
        }"#;
        let out: AtsResume = serde_json::from_str(json).unwrap();
        assert_eq!(out.ats_score, 92);
        assert_eq!(out.resume.experience[0].bullets.len(), 1);
        assert_eq!(out.resume.skills.technical, vec!["Rust"]);
    }

    #[test]
    fn test_partial_resume_still_deserializes() {
        let json = r#"{"ats_score": 70, "resume": {"summary": "ok"}}"#;
        let out: AtsResume = serde_json::from_str(json).unwrap();
        assert_eq!(out.ats_score, 70);
        assert_eq!(out.resume.summary, "ok");
        assert!(out.resume.experience.is_empty());
        assert!(out.keywords_found.is_empty());
    }
}
