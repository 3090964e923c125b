//! Job-board search links for a suggested career title.
//!
//! Pure URL construction; which boards appear depends on whether the user
//! is India-based (Naukri, Glassdoor India) or international (RemoteOK).

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct JobLink {
    pub site: &'static str,
    pub url: String,
}

fn is_india(location: &str) -> bool {
    location.to_lowercase().contains("india")
}

/// Builds search links for a job title. Keywords override the title as
/// the search query when present.
pub fn job_links(title: &str, location: &str, keywords: &str) -> Vec<JobLink> {
    let query = if keywords.is_empty() { title } else { keywords };
    let q_enc = query.replace(' ', "+");
    let title_enc = title.replace(' ', "+");
    let slug = title.to_lowercase().replace(' ', "-");

    if is_india(location) {
        vec![
            JobLink {
                site: "LinkedIn",
                url: format!(
                    "https://www.linkedin.com/jobs/search/?keywords={q_enc}&location=India"
                ),
            },
            JobLink {
                site: "Naukri",
                url: format!("https://www.naukri.com/{slug}-jobs"),
            },
            JobLink {
                site: "Indeed",
                url: format!("https://in.indeed.com/jobs?q={q_enc}&l=India"),
            },
            JobLink {
                site: "Glassdoor",
                url: format!(
                    "https://www.glassdoor.co.in/Jobs/{}-jobs-SRCH_KO0,{}.htm",
                    title_enc.replace('+', "-"),
                    title.len()
                ),
            },
        ]
    } else {
        vec![
            JobLink {
                site: "LinkedIn",
                url: format!("https://www.linkedin.com/jobs/search/?keywords={q_enc}"),
            },
            JobLink {
                site: "Indeed",
                url: format!("https://www.indeed.com/jobs?q={q_enc}"),
            },
            JobLink {
                site: "Glassdoor",
                url: format!("https://www.glassdoor.com/Job/jobs.htm?sc.keyword={q_enc}"),
            },
            JobLink {
                site: "RemoteOK",
                url: format!("https://remoteok.com/remote-{slug}-jobs"),
            },
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct JobLinksQuery {
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub keywords: String,
}

#[derive(Debug, Serialize)]
pub struct JobLinksResponse {
    pub links: Vec<JobLink>,
}

/// GET /api/v1/jobs/links?title=&location=&keywords=
pub async fn handle_job_links(
    Query(query): Query<JobLinksQuery>,
) -> Result<Json<JobLinksResponse>, AppError> {
    if query.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(Json(JobLinksResponse {
        links: job_links(&query.title, &query.location, &query.keywords),
    }))
}
