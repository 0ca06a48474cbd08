// ============================================================================
// Module : api
// ============================================================================
// Client HTTP de l'API comptable : configuration, transport, middlewares
// (jeton d'accès, notifications d'erreur) et endpoints typés.
// ============================================================================

pub mod client;       // ApiClient et pipeline de middlewares
pub mod config;       // URL de base, timeout
pub mod error;        // ApiError
pub mod middleware;   // BearerAuth, ErrorNotifier
pub mod notify;       // Notifier
pub mod reports;      // /reports, /accounts
pub mod storage;      // Stockage local du jeton
pub mod transactions; // /transactions
pub mod transport;    // Transport reqwest

// Re-export des types principaux
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use middleware::{BearerAuth, ErrorNotifier, Middleware};
pub use notify::{CollectingNotifier, Notifier, TracingNotifier};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, ACCESS_TOKEN_KEY};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
