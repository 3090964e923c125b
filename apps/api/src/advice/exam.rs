//! Exam (PYQ) hub: curated preparation resources and generated
//! question papers for a company/role.

use serde::{Deserialize, Serialize};

use crate::advice::prompts::{EXAM_PAPER_PROMPT_TEMPLATE, EXAM_RESOURCES_PROMPT_TEMPLATE};
use crate::errors::AppError;
use crate::llm::{CallOpts, LlmClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub authenticity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGuide {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub overall_confidence: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub exam_pattern: String,
    #[serde(default)]
    pub resources: Vec<ExamResource>,
    #[serde(default)]
    pub preparation_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub question: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSection {
    pub section: String,
    #[serde(default)]
    pub questions: Vec<ExamQuestion>,
}

/// Curates authentic preparation resources for a company's hiring process.
pub async fn find_resources(
    llm: &LlmClient,
    company: &str,
    role: &str,
) -> Result<ResourceGuide, AppError> {
    let prompt = EXAM_RESOURCES_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{role}", role);

    llm.call_structured::<ResourceGuide>(
        &prompt,
        CallOpts {
            max_tokens: 3000,
            temperature: 0.3,
            json_mode: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("resource curation failed: {e}")))
}

/// Generates a sectioned PYQ-style question paper. Empty output is an
/// error, never an empty paper.
pub async fn generate_paper(
    llm: &LlmClient,
    company: &str,
    role: &str,
    count: u32,
) -> Result<Vec<PaperSection>, AppError> {
    let prompt = EXAM_PAPER_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{role}", role)
        .replace("{count}", &count.to_string())
        .replace("{per_section}", &(count / 3).max(1).to_string());

    let sections: Vec<PaperSection> = llm
        .call_structured(
            &prompt,
            CallOpts {
                max_tokens: 6000,
                temperature: 0.6,
                json_mode: true,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("paper generation failed: {e}")))?;

    if sections.is_empty() {
        return Err(AppError::Llm(
            "paper generation returned no sections".to_string(),
        ));
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_guide_deserializes() {
        let json = r#"{
            "company": "TCS", "role": "Ninja", "overall_confidence": "High",
            "summary": "Well documented process.",
            "exam_pattern": "NQT: aptitude + coding.",
            "resources": [
                {"name": "PrepInsta TCS NQT", "url": "https://prepinsta.com/tcs-nqt/", "description": "Past papers", "content_type": "PYQs", "authenticity": "Verified High Quality"}
            ],
            "preparation_tips": ["Practice aptitude daily"]
        }"#;
        let guide: ResourceGuide = serde_json::from_str(json).unwrap();
        assert_eq!(guide.resources.len(), 1);
        assert_eq!(guide.overall_confidence, "High");
    }

    #[test]
    fn test_paper_sections_deserialize() {
        let json = r#"[
            {"section": "Aptitude", "questions": [
                {"question": "2+2?", "code": "", "options": ["A) 3","B) 4"], "answer": "B) 4", "explanation": "Basic addition."}
            ]},
            {"section": "Coding", "questions": []}
        ]"#;
        let sections: Vec<PaperSection> = serde_json::from_str(json).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].questions[0].answer, "B) 4");
    }
}
