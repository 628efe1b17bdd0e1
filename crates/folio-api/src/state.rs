//! Application state shared across handlers.

use folio_core::db::{create_project_repository, create_review_repository};
use folio_core::db::{ProjectRepository, ReviewRepository};
use folio_core::{
    AdminCredentials, AppConfig, AuthConfig, DbPool, FormConfig, Mailer, TokenError, TokenSigner,
};
use std::sync::Arc;

use crate::middleware::CorsPolicy;

/// Default display name on outgoing contact mail.
pub const DEFAULT_FROM_NAME: &str = "Portfolio Contact Form";

/// Login material. Present only when token auth is configured.
pub struct AuthState {
    pub signer: TokenSigner,
    pub credentials: AdminCredentials,
}

impl AuthState {
    /// Builds the signer and credential check from configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, TokenError> {
        Ok(Self {
            signer: TokenSigner::new(&config.jwt_secret, config.token_ttl)?,
            credentials: AdminCredentials::new(&config.username, &config.password),
        })
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Review persistence.
    pub reviews: Arc<dyn ReviewRepository>,
    /// Project persistence.
    pub projects: Arc<dyn ProjectRepository>,
    /// Outbound mail transport.
    pub mailer: Arc<dyn Mailer>,
    /// Form secrets and contact recipient.
    pub forms: Arc<FormConfig>,
    /// Display name on outgoing contact mail.
    pub from_name: Arc<str>,
    /// `None` when login is not configured.
    pub auth: Option<Arc<AuthState>>,
    /// Cross-origin policy applied to every response.
    pub cors: Arc<CorsPolicy>,
    /// Pool handle for health probes, when backed by a real database.
    pub db: Option<DbPool>,
}

impl AppState {
    /// Creates state from explicit collaborators. Login is disabled and any
    /// origin is allowed until configured otherwise.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        projects: Arc<dyn ProjectRepository>,
        mailer: Arc<dyn Mailer>,
        forms: FormConfig,
    ) -> Self {
        Self {
            reviews,
            projects,
            mailer,
            forms: Arc::new(forms),
            from_name: Arc::from(DEFAULT_FROM_NAME),
            auth: None,
            cors: Arc::new(CorsPolicy::default()),
            db: None,
        }
    }

    /// Wires database-backed repositories and the given mailer according to
    /// `config`.
    pub fn from_config(
        config: &AppConfig,
        pool: DbPool,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, TokenError> {
        let reviews: Arc<dyn ReviewRepository> = Arc::from(create_review_repository(&pool));
        let projects: Arc<dyn ProjectRepository> = Arc::from(create_project_repository(&pool));

        let mut state = Self::new(reviews, projects, mailer, config.forms.clone())
            .with_from_name(&config.mail.from_name)
            .with_cors_origins(&config.server.cors_allowed_origins)
            .with_db(pool);

        if let Some(auth) = &config.auth {
            state = state.with_auth(auth)?;
        }

        Ok(state)
    }

    /// Enables token login.
    pub fn with_auth(mut self, config: &AuthConfig) -> Result<Self, TokenError> {
        self.auth = Some(Arc::new(AuthState::from_config(config)?));
        Ok(self)
    }

    /// Restricts cross-origin access to `origins`. Empty allows any origin.
    pub fn with_cors_origins(mut self, origins: &[String]) -> Self {
        self.cors = Arc::new(CorsPolicy::new(origins));
        self
    }

    pub fn with_from_name(mut self, name: &str) -> Self {
        self.from_name = Arc::from(name);
        self
    }

    /// Attaches the pool used by the health probe.
    pub fn with_db(mut self, pool: DbPool) -> Self {
        self.db = Some(pool);
        self
    }
}
