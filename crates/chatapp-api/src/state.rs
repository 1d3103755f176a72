//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/hasher traits, but AppState pins them
//! to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use chatapp_core::service::auth::AuthService;
use chatapp_core::service::chat::ChatService;
use chatapp_core::session::SessionRegistry;
use chatapp_infra::config::{load_config, resolve_database_url};
use chatapp_infra::crypto::password::Argon2PasswordHasher;
use chatapp_infra::filesystem::resolve_data_dir;
use chatapp_infra::sqlite::message::SqliteMessageRepository;
use chatapp_infra::sqlite::pool::DatabasePool;
use chatapp_infra::sqlite::user::SqliteUserRepository;
use chatapp_types::config::AppConfig;
use chatapp_types::message::ChatMessage;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthService = AuthService<SqliteUserRepository, Argon2PasswordHasher>;

pub type ConcreteChatService = ChatService<SqliteMessageRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub db_pool: DatabasePool,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve data dir, load config,
    /// connect to the database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        Self::from_parts(db_pool, config, data_dir)
    }

    /// Wire services over an already-open database pool.
    pub fn from_parts(
        db_pool: DatabasePool,
        config: AppConfig,
        data_dir: PathBuf,
    ) -> anyhow::Result<Self> {
        // One registry shared by login/logout and the send-time login check
        let sessions = Arc::new(SessionRegistry::new());

        let auth_service = AuthService::new(
            SqliteUserRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new()?,
            Arc::clone(&sessions),
        );

        let chat_service = ChatService::new(SqliteMessageRepository::new(db_pool.clone()), sessions)
            .with_listener(Arc::new(log_delivered_message));

        Ok(Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            db_pool,
            config: Arc::new(config),
            data_dir,
        })
    }
}

fn log_delivered_message(message: &ChatMessage) {
    tracing::debug!(
        message_id = message.id,
        sender = %message.sender,
        recipient = %message.recipient,
        broadcast = message.is_broadcast(),
        "message delivered"
    );
}
