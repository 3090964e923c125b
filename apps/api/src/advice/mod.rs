// Advice operations: career analysis, ATS resume building, mock interviews,
// exam (PYQ) resources and papers.
// All LLM calls go through the llm module — no direct vendor calls here.

pub mod career;
pub mod exam;
pub mod handlers;
pub mod interview;
pub mod prompts;
pub mod resume;
