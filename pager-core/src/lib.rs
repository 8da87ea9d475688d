pub mod config;

use std::sync::Arc;

use twilight_http::Client;
use twilight_model::id::{Id, marker::UserMarker};

use pager_utils::colour::HttpColourSampler;
use pager_utils::pagination::{PaginateOptions, SharedPlatform};
use pager_utils::shutdown::Shutdown;

pub use config::{Config, ConfigError};

/// The bot's own account, resolved once at startup.
#[derive(Clone, Debug)]
pub struct BotIdentity {
    pub id: Id<UserMarker>,
    pub avatar_url: Option<String>,
}

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub platform: SharedPlatform,
    pub colours: Arc<HttpColourSampler>,
    pub config: Arc<Config>,
    pub bot: BotIdentity,
    pub shutdown: Shutdown,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        platform: SharedPlatform,
        config: Config,
        bot: BotIdentity,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            http,
            platform,
            colours: Arc::new(HttpColourSampler::new()),
            config: Arc::new(config),
            bot,
            shutdown,
        }
    }

    /// Session options honouring the configured timeout and process shutdown.
    pub fn paginate_options(&self) -> PaginateOptions {
        PaginateOptions::default()
            .with_timeout(self.config.pagination_timeout)
            .with_shutdown(self.shutdown.clone())
    }
}
