// ============================================================================
// Configuration du client HTTP
// ============================================================================
// Une seule valeur vient de l'environnement : l'URL de base de l'API
// (défaut "/api"). Une base relative est résolue contre l'adresse du
// serveur ; une base absolue ("https://...") est utilisée telle quelle.
//
// Variables d'environnement :
// - LAZYLEDGER_API_BASE_URL : base de l'API (défaut "/api")
// - LAZYLEDGER_SERVER       : origine du serveur (défaut "http://localhost:8080")
// ============================================================================

use std::time::Duration;

/// Variable d'environnement de l'URL de base
pub const BASE_URL_ENV: &str = "LAZYLEDGER_API_BASE_URL";

/// Variable d'environnement de l'origine du serveur
pub const SERVER_ENV: &str = "LAZYLEDGER_SERVER";

pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Timeout fixe de chaque requête
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration du client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origine utilisée quand la base est relative
    pub server: String,

    /// Base de l'API ("/api" ou URL absolue)
    pub base_url: String,

    pub timeout: Duration,
}

impl ClientConfig {
    /// Lit la configuration depuis l'environnement
    ///
    /// Une variable absente ou vide retombe sur la valeur par défaut.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Variante testable de from_env()
    ///
    /// CONCEPT RUST : closures en paramètre
    /// - impl Fn(&str) -> Option<String> : n'importe quelle fonction de lookup
    /// - Les tests passent une closure au lieu de toucher l'environnement global
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            server: non_empty(SERVER_ENV).unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            base_url: non_empty(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Remplace la base de l'API (builder)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Remplace l'origine du serveur (builder)
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Base absolue, sans slash final
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');

        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            let server = self.server.trim_end_matches('/');
            let base = base.trim_start_matches('/');
            if base.is_empty() {
                server.to_string()
            } else {
                format!("{}/{}", server, base)
            }
        }
    }

    /// URL complète d'un endpoint (ex: "/transactions")
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
