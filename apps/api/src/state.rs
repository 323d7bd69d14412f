use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::notifications::Notifier;
use crate::repository::PortalRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store. Postgres in production, in-memory in tests.
    pub repo: Arc<dyn PortalRepository>,
    /// Applicant status notifications. Default: RedisNotifier.
    pub notifier: Arc<dyn Notifier>,
    /// Resume PDF storage.
    pub s3: S3Client,
    pub config: Config,
}
