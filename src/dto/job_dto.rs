use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::application::ApplicationWithCandidate;
use crate::models::job::Job;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub contract: String,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub title: Option<String>,
    pub location: Option<String>,
    pub contract: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: uuid::Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub contract: String,
    pub requirements: Option<String>,
    pub salary: Option<Decimal>,
    pub recruiter_id: uuid::Uuid,
    pub is_approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// One posting in the recruiter dashboard, with every applicant nested.
#[derive(Debug, Clone, Serialize)]
pub struct RecruiterJobResponse {
    pub job: JobResponse,
    pub applications: Vec<ApplicationWithCandidate>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            location: value.location,
            description: value.description,
            contract: value.contract,
            requirements: value.requirements,
            salary: value.salary,
            recruiter_id: value.recruiter_id,
            is_approved: value.is_approved,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
