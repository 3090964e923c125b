//! Mock interview: question generation, per-answer evaluation, and the
//! final hire/no-hire verdict over a full session.

use serde::{Deserialize, Serialize};

use crate::advice::prompts::{
    EVALUATE_ANSWER_PROMPT_TEMPLATE, FINAL_VERDICT_PROMPT_TEMPLATE,
    INTERVIEW_QUESTIONS_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::llm::{CallOpts, LlmClient};

/// Candidate answers longer than this are cut before prompting.
const MAX_ANSWER_LEN: usize = 1500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub category: String,
    pub question: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub ideal_answer_points: Vec<String>,
    #[serde(default)]
    pub follow_ups: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFeedback {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub one_line_reaction: String,
    #[serde(default)]
    pub what_you_did_well: Vec<String>,
    #[serde(default)]
    pub what_went_wrong: Vec<String>,
    #[serde(default)]
    pub how_to_improve: Vec<String>,
    #[serde(default)]
    pub sample_better_answer: String,
    #[serde(default)]
    pub keywords_used: Vec<String>,
    #[serde(default)]
    pub keywords_missed: Vec<String>,
    #[serde(default)]
    pub crack_this_question: String,
    #[serde(default)]
    pub crack_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewVerdict {
    #[serde(default)]
    pub overall_score: u32,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub can_crack_company: String,
    #[serde(default)]
    pub crack_verdict_message: String,
    #[serde(default)]
    pub top_strengths: Vec<String>,
    #[serde(default)]
    pub top_weaknesses: Vec<String>,
    #[serde(default)]
    pub priority_action_plan: Vec<String>,
    #[serde(default)]
    pub ready_to_apply: bool,
    #[serde(default)]
    pub estimated_weeks_to_ready: u32,
    #[serde(default)]
    pub motivational_close: String,
}

/// Generates the 8-question mock interview. An empty list from the model
/// is an error, never a silent empty session.
pub async fn generate_questions(
    llm: &LlmClient,
    role: &str,
    level: &str,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{level}", level);

    let questions: Vec<InterviewQuestion> = llm
        .call_structured(
            &prompt,
            CallOpts {
                max_tokens: 6000,
                temperature: 0.65,
                json_mode: true,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("interview generation failed: {e}")))?;

    if questions.is_empty() {
        return Err(AppError::Llm(
            "interview generation returned no questions".to_string(),
        ));
    }
    Ok(questions)
}

/// Double quotes break the embedding prompt's own quoting rules, so user
/// text is normalized to single quotes before interpolation.
fn sanitize(text: &str) -> String {
    text.replace('"', "'")
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Scores one answer against the question's ideal points.
pub async fn evaluate_answer(
    llm: &LlmClient,
    question: &str,
    answer: &str,
    ideal_points: &[String],
    role: &str,
    companies: &[String],
) -> Result<AnswerFeedback, AppError> {
    let companies_str = if companies.is_empty() {
        "top tech companies".to_string()
    } else {
        companies.join(", ")
    };

    let prompt = EVALUATE_ANSWER_PROMPT_TEMPLATE
        .replace("{companies}", &companies_str)
        .replace("{role}", role)
        .replace("{question}", &sanitize(question))
        .replace("{answer}", &truncate_chars(&sanitize(answer), MAX_ANSWER_LEN))
        .replace("{ideal_points}", &format!("{ideal_points:?}"));

    llm.call_structured::<AnswerFeedback>(
        &prompt,
        CallOpts {
            max_tokens: 1800,
            temperature: 0.4,
            json_mode: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("answer evaluation failed: {e}")))
}

/// Aggregate statistics fed into the verdict prompt.
#[derive(Debug, PartialEq)]
struct FeedbackSummary {
    avg_score: f64,
    scores: Vec<u32>,
    weak_areas: Vec<Vec<String>>,
    strong_areas: Vec<Vec<String>>,
}

fn summarize_feedback(feedback: &[AnswerFeedback]) -> FeedbackSummary {
    let scores: Vec<u32> = feedback.iter().map(|f| f.score).collect();
    let avg_score = scores.iter().sum::<u32>() as f64 / feedback.len() as f64;
    let weak_areas = feedback
        .iter()
        .filter(|f| f.score < 70)
        .map(|f| f.what_went_wrong.clone())
        .collect();
    let strong_areas = feedback
        .iter()
        .filter(|f| f.score >= 80)
        .map(|f| f.what_you_did_well.clone())
        .collect();
    FeedbackSummary {
        avg_score,
        scores,
        weak_areas,
        strong_areas,
    }
}

/// Produces the final verdict across a full interview session.
pub async fn final_verdict(
    llm: &LlmClient,
    role: &str,
    level: &str,
    companies: &[String],
    feedback: &[AnswerFeedback],
) -> Result<InterviewVerdict, AppError> {
    if feedback.is_empty() {
        return Err(AppError::Validation(
            "cannot produce a verdict with no answer feedback".to_string(),
        ));
    }

    let summary = summarize_feedback(feedback);
    let companies_str = if companies.is_empty() {
        "top companies".to_string()
    } else {
        companies
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let weak: Vec<_> = summary.weak_areas.iter().take(3).collect();
    let strong: Vec<_> = summary.strong_areas.iter().take(3).collect();

    let prompt = FINAL_VERDICT_PROMPT_TEMPLATE
        .replace("{companies}", &companies_str)
        .replace("{role}", role)
        .replace("{level}", level)
        .replace("{avg_score}", &format!("{:.1}", summary.avg_score))
        .replace("{avg_score_rounded}", &format!("{:.0}", summary.avg_score))
        .replace("{scores}", &format!("{:?}", summary.scores))
        .replace("{weak_areas}", &format!("{weak:?}"))
        .replace("{strong_areas}", &format!("{strong:?}"));

    llm.call_structured::<InterviewVerdict>(
        &prompt,
        CallOpts {
            max_tokens: 2000,
            temperature: 0.5,
            json_mode: true,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("final verdict failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(score: u32, wrong: &[&str], well: &[&str]) -> AnswerFeedback {
        AnswerFeedback {
            score,
            what_went_wrong: wrong.iter().map(|s| s.to_string()).collect(),
            what_you_did_well: well.iter().map(|s| s.to_string()).collect(),
            verdict: String::new(),
            one_line_reaction: String::new(),
            how_to_improve: Vec::new(),
            sample_better_answer: String::new(),
            keywords_used: Vec::new(),
            keywords_missed: Vec::new(),
            crack_this_question: String::new(),
            crack_message: String::new(),
        }
    }

    #[test]
    fn test_question_list_deserializes() {
        let json = r#"[
            {"id":1,"category":"Behavioral","question":"Tell me about a conflict.","difficulty":"Easy","companies":["Infosys","TCS"],"hint":"STAR","ideal_answer_points":["Situation","Resolution"],"follow_ups":["What would you change?"]}
        ]"#;
        let questions: Vec<InterviewQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].companies.len(), 2);
    }

    #[test]
    fn test_sanitize_replaces_double_quotes() {
        assert_eq!(sanitize(r#"she said "hi""#), "she said 'hi'");
    }

    #[test]
    fn test_answer_truncated_to_limit() {
        let long = "a".repeat(5000);
        assert_eq!(truncate_chars(&long, MAX_ANSWER_LEN).len(), 1500);
    }

    #[test]
    fn test_summary_averages_scores() {
        let all = vec![
            feedback(60, &["rambled"], &[]),
            feedback(80, &[], &["specific"]),
            feedback(100, &[], &["quantified"]),
        ];
        let summary = summarize_feedback(&all);
        assert!((summary.avg_score - 80.0).abs() < f64::EPSILON);
        assert_eq!(summary.scores, vec![60, 80, 100]);
    }

    #[test]
    fn test_summary_partitions_weak_and_strong() {
        let all = vec![
            feedback(65, &["vague"], &["tried"]),
            feedback(72, &["slow"], &["ok"]),
            feedback(85, &[], &["crisp"]),
        ];
        let summary = summarize_feedback(&all);
        // score<70 feeds weaknesses; score>=80 feeds strengths; the 72 is neither.
        assert_eq!(summary.weak_areas, vec![vec!["vague".to_string()]]);
        assert_eq!(summary.strong_areas, vec![vec!["crisp".to_string()]]);
    }

    #[test]
    fn test_verdict_deserializes() {
        let json = r#"{
            "overall_score": 74, "grade": "B", "headline": "Close but not ready.",
            "can_crack_company": "Borderline", "crack_verdict_message": "Needs depth.",
            "top_strengths": ["Communication"], "top_weaknesses": ["System design"],
            "priority_action_plan": ["Practice design questions"],
            "ready_to_apply": false, "estimated_weeks_to_ready": 4,
            "motivational_close": "Keep going."
        }"#;
        let verdict: InterviewVerdict = serde_json::from_str(json).unwrap();
        assert_eq!(verdict.overall_score, 74);
        assert!(!verdict.ready_to_apply);
        assert_eq!(verdict.estimated_weeks_to_ready, 4);
    }
}
