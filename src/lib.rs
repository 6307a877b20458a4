pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, job_service::JobService,
    message_service::MessageService, notification_service::NotificationService,
    user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub message_service: MessageService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let notification_service = NotificationService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone(), notification_service.clone());
        let application_service = ApplicationService::new(pool.clone(), notification_service.clone());
        let message_service = MessageService::new(pool.clone(), notification_service.clone());

        Self {
            pool,
            user_service,
            job_service,
            application_service,
            message_service,
            notification_service,
        }
    }
}
