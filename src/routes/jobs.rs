use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, JobResponse, RecruiterJobResponse},
    error::{Error, Result},
    middleware::auth::Actor,
    models::application::ApplicationWithCandidate,
    models::job::Job,
    models::user::Role,
    services::application_service::NewApplication,
    utils::{files, validation},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/jobs",
    params(
        ("title" = Option<String>, Query, description = "Title substring filter"),
        ("location" = Option<String>, Query, description = "Location substring filter"),
        ("contract" = Option<String>, Query, description = "Exact contract type filter")
    ),
    responses(
        (status = 200, description = "Approved jobs matching the filters", body = Json<Vec<JobResponse>>),
        (status = 400, description = "Invalid contract type")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let jobs = state.job_service.list_public(query).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = Json<JobResponse>),
        (status = 404, description = "Job missing or not approved")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_public(id).await?;
    Ok(Json(job))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created, pending approval", body = Json<JobResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Recruiter)?;
    payload.validate()?;
    let job = state.job_service.create(actor.id, payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[axum::debug_handler]
pub async fn my_jobs(State(state): State<AppState>, actor: Actor) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Recruiter)?;
    let jobs = state.job_service.list_for_recruiter(actor.id).await?;
    let applications = state
        .application_service
        .list_for_recruiter(actor.id)
        .await?;
    Ok(Json(group_by_job(jobs, applications)))
}

#[axum::debug_handler]
pub async fn my_applications(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Candidate)?;
    let applications = state
        .application_service
        .list_for_candidate(actor.id)
        .await?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 201, description = "Application submitted"),
        (status = 400, description = "Missing file or invalid contact"),
        (status = 403, description = "Caller is not a candidate"),
        (status = 404, description = "Job missing or not approved"),
        (status = 409, description = "Already applied to this job")
    )
)]
#[axum::debug_handler]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Candidate)?;

    let mut cv_path = None;
    let mut motivation_letter_path = None;
    let mut contact = String::new();
    let mut note = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "cv" => {
                let filename = field.file_name().unwrap_or("cv.bin").to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    cv_path = Some(files::save_upload("cv", &filename, &data).await?);
                }
            }
            "motivation_letter" => {
                let filename = field.file_name().unwrap_or("letter.bin").to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    motivation_letter_path =
                        Some(files::save_upload("letters", &filename, &data).await?);
                }
            }
            "contact" => contact = field.text().await.unwrap_or_default(),
            "note" => {
                let text = field.text().await.unwrap_or_default();
                if !text.is_empty() {
                    note = Some(text);
                }
            }
            _ => {}
        }
    }

    let Some(cv_path) = cv_path else {
        return Err(Error::BadRequest("CV file is required".to_string()));
    };
    let Some(motivation_letter_path) = motivation_letter_path else {
        return Err(Error::BadRequest(
            "Motivation letter file is required".to_string(),
        ));
    };
    if contact.is_empty() {
        return Err(Error::BadRequest(
            "Contact phone number is required".to_string(),
        ));
    }
    if !validation::is_phone_like(&contact) {
        return Err(Error::BadRequest(
            "Contact must be a valid phone number".to_string(),
        ));
    }

    let application = state
        .application_service
        .apply(
            id,
            actor.id,
            NewApplication {
                cv_path,
                motivation_letter_path,
                contact,
                note,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

fn group_by_job(
    jobs: Vec<Job>,
    applications: Vec<ApplicationWithCandidate>,
) -> Vec<RecruiterJobResponse> {
    let mut by_job: HashMap<Uuid, Vec<ApplicationWithCandidate>> = HashMap::new();
    for application in applications {
        by_job.entry(application.job_id).or_default().push(application);
    }

    jobs.into_iter()
        .map(|job| {
            let applications = by_job.remove(&job.id).unwrap_or_default();
            RecruiterJobResponse {
                job: JobResponse::from(job),
                applications,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job(id: Uuid) -> Job {
        Job {
            id,
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            description: "Build things".to_string(),
            contract: "full-time".to_string(),
            requirements: None,
            salary: None,
            recruiter_id: Uuid::new_v4(),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn application(job_id: Uuid) -> ApplicationWithCandidate {
        ApplicationWithCandidate {
            id: Uuid::new_v4(),
            job_id,
            candidate_id: Uuid::new_v4(),
            cv_path: "uploads/cv/x.pdf".to_string(),
            motivation_letter_path: "uploads/letters/x.pdf".to_string(),
            contact: "+1 555-0100".to_string(),
            note: None,
            status: "pending".to_string(),
            applied_at: Utc::now(),
            candidate_name: "Alice".to_string(),
            candidate_email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn applications_land_under_their_job() {
        let a = job(Uuid::new_v4());
        let b = job(Uuid::new_v4());
        let apps = vec![application(a.id), application(a.id), application(b.id)];

        let grouped = group_by_job(vec![a.clone(), b.clone()], apps);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].job.id, a.id);
        assert_eq!(grouped[0].applications.len(), 2);
        assert_eq!(grouped[1].applications.len(), 1);
    }

    #[test]
    fn jobs_without_applicants_get_empty_lists() {
        let a = job(Uuid::new_v4());
        let grouped = group_by_job(vec![a], vec![]);
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].applications.is_empty());
    }
}
