//! Career analysis — matches a profile against 6-8 candidate career paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::advice::prompts::{
    CAREER_ADVICE_PROMPT_TEMPLATE, SALARY_FORMAT_INR, SALARY_FORMAT_USD,
};
use crate::errors::AppError;
use crate::llm::{CallOpts, LlmClient};

/// User-supplied targeting context for an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerContext {
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub career_stage: Option<String>,
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for CareerContext {
    fn default() -> Self {
        Self {
            industries: Vec::new(),
            career_stage: None,
            location: default_location(),
        }
    }
}

fn default_location() -> String {
    "India - Metro".to_string()
}

/// One suggested career path. Fields default individually because models
/// routinely omit the optional ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    #[serde(default)]
    pub match_score: u32,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub reason: String,
    /// Skill name → current proficiency estimate (0-100).
    #[serde(default)]
    pub skill_gap_analysis: BTreeMap<String, u32>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub learning_path: Vec<String>,
    #[serde(default)]
    pub interview_tips: Vec<String>,
    #[serde(default)]
    pub job_search_keywords: String,
    #[serde(default)]
    pub top_companies: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Full structured output of a career analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerAnalysis {
    #[serde(default)]
    pub profile_summary: String,
    #[serde(default)]
    pub current_skills: Vec<String>,
    #[serde(default)]
    pub careers: Vec<CareerPath>,
}

/// Picks the salary formatting rule from the location preference.
fn salary_instruction(location: &str) -> &'static str {
    if location.to_lowercase().contains("international") {
        SALARY_FORMAT_USD
    } else {
        SALARY_FORMAT_INR
    }
}

/// Runs the career analysis through the session's LLM.
pub async fn career_advice(
    llm: &LlmClient,
    profile_text: &str,
    context: &CareerContext,
) -> Result<CareerAnalysis, AppError> {
    let prompt = CAREER_ADVICE_PROMPT_TEMPLATE
        .replace("{profile_text}", profile_text)
        .replace("{industries}", &context.industries.join(", "))
        .replace(
            "{career_stage}",
            context.career_stage.as_deref().unwrap_or("Not specified"),
        )
        .replace("{location}", &context.location)
        .replace("{salary_instruction}", salary_instruction(&context.location));

    llm.call_structured::<CareerAnalysis>(
        &prompt,
        CallOpts {
            max_tokens: 8192,
            temperature: 0.7,
            json_mode: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("career analysis failed: {e}")))
}
