//! Service context - dependency container for services
//!
//! Holds all repositories, the realtime publisher and the JWT service
//! needed by services.

use std::sync::Arc;

use matcha_common::auth::JwtService;
use matcha_core::traits::{
    BlockRepository, ChatRepository, MatchRepository, MessageRepository, NotificationRepository,
    ProfileRepository, RealtimePublisher, ReportRepository, SwipeRepository, TagRepository,
    TokenRepository, UserRepository, ViewRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (one per aggregate)
/// - The realtime publisher used for best-effort push
/// - JWT service for authentication
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn TokenRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    swipe_repo: Arc<dyn SwipeRepository>,
    match_repo: Arc<dyn MatchRepository>,
    chat_repo: Arc<dyn ChatRepository>,
    message_repo: Arc<dyn MessageRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    view_repo: Arc<dyn ViewRepository>,
    block_repo: Arc<dyn BlockRepository>,
    report_repo: Arc<dyn ReportRepository>,
    tag_repo: Arc<dyn TagRepository>,

    // Realtime
    publisher: Arc<dyn RealtimePublisher>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn token_repo(&self) -> &dyn TokenRepository {
        self.token_repo.as_ref()
    }

    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    pub fn swipe_repo(&self) -> &dyn SwipeRepository {
        self.swipe_repo.as_ref()
    }

    pub fn match_repo(&self) -> &dyn MatchRepository {
        self.match_repo.as_ref()
    }

    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn view_repo(&self) -> &dyn ViewRepository {
        self.view_repo.as_ref()
    }

    pub fn block_repo(&self) -> &dyn BlockRepository {
        self.block_repo.as_ref()
    }

    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    // === Realtime ===

    /// Get the realtime publisher
    pub fn publisher(&self) -> &dyn RealtimePublisher {
        self.publisher.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("publisher", &"dyn RealtimePublisher")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    token_repo: Option<Arc<dyn TokenRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    swipe_repo: Option<Arc<dyn SwipeRepository>>,
    match_repo: Option<Arc<dyn MatchRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    view_repo: Option<Arc<dyn ViewRepository>>,
    block_repo: Option<Arc<dyn BlockRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    publisher: Option<Arc<dyn RealtimePublisher>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn TokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn swipe_repo(mut self, repo: Arc<dyn SwipeRepository>) -> Self {
        self.swipe_repo = Some(repo);
        self
    }

    pub fn match_repo(mut self, repo: Arc<dyn MatchRepository>) -> Self {
        self.match_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn view_repo(mut self, repo: Arc<dyn ViewRepository>) -> Self {
        self.view_repo = Some(repo);
        self
    }

    pub fn block_repo(mut self, repo: Arc<dyn BlockRepository>) -> Self {
        self.block_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn RealtimePublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            token_repo: required(self.token_repo, "token_repo")?,
            profile_repo: required(self.profile_repo, "profile_repo")?,
            swipe_repo: required(self.swipe_repo, "swipe_repo")?,
            match_repo: required(self.match_repo, "match_repo")?,
            chat_repo: required(self.chat_repo, "chat_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            view_repo: required(self.view_repo, "view_repo")?,
            block_repo: required(self.block_repo, "block_repo")?,
            report_repo: required(self.report_repo, "report_repo")?,
            tag_repo: required(self.tag_repo, "tag_repo")?,
            publisher: required(self.publisher, "publisher")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
        })
    }
}
