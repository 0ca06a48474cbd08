// ============================================================================
// Middlewares du client HTTP
// ============================================================================
// Liste explicite, appelée dans l'ordre d'enregistrement autour de chaque
// requête :
// 1. on_request : avant l'envoi, peut modifier la requête sortante
// 2. on_error   : après un échec, avant que l'erreur ne remonte à l'appelant
//
// Aucun middleware ne bloque, ne réessaie ni n'avale une erreur.
// ============================================================================

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use super::error::ApiError;
use super::notify::Notifier;
use super::storage::{KeyValueStorage, ACCESS_TOKEN_KEY};
use super::transport::ApiRequest;

// Messages affichés quand le serveur ne fournit pas de "message"
pub const NETWORK_ERROR: &str = "network error";
pub const NOT_AUTHENTICATED: &str = "not authenticated";
pub const NOT_AUTHORIZED: &str = "not authorized";
pub const SERVER_ERROR: &str = "server error";
pub const REQUEST_FAILED: &str = "request failed";

/// Étape du pipeline de requête
///
/// Les deux méthodes ont une implémentation par défaut : un middleware
/// n'implémente que ce qui le concerne.
pub trait Middleware: Send + Sync {
    /// Inspecte ou modifie la requête avant l'envoi
    fn on_request(&self, _request: &mut ApiRequest) -> Result<(), ApiError> {
        Ok(())
    }

    /// Inspecte ou modifie l'erreur avant qu'elle ne remonte
    fn on_error(&self, _request: &ApiRequest, _error: &mut ApiError) {}
}

// ============================================================================
// BearerAuth : jeton d'accès
// ============================================================================

/// Ajoute "Authorization: Bearer <token>" si un jeton est stocké
pub struct BearerAuth {
    storage: Arc<dyn KeyValueStorage>,
}

impl BearerAuth {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        // Pas de jeton : la requête part telle quelle, le serveur décide
        let Some(token) = self.storage.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty()) else {
            debug!(path = %request.path, "No access token, sending unauthenticated request");
            return Ok(());
        };

        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::Request("access token is not a valid header value".to_string()))?;
        request.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

// ============================================================================
// ErrorNotifier : normalisation des erreurs en notifications
// ============================================================================

/// Message à afficher pour une erreur
///
/// Ordre de priorité :
/// 1. pas de réponse               → "network error"
/// 2. champ "message" du serveur   → repris tel quel
/// 3. statut 401 / 403 / ≥500      → message générique
/// 4. tout le reste                → "request failed"
pub fn notification_message(error: &ApiError) -> String {
    match error {
        ApiError::Transport(_) => NETWORK_ERROR.to_string(),
        ApiError::Server { message: Some(message), .. } => message.clone(),
        ApiError::Server { status, .. } => status_message(*status).to_string(),
        ApiError::Decode(_) | ApiError::Request(_) => REQUEST_FAILED.to_string(),
    }
}

/// Message générique selon le statut HTTP
pub fn status_message(status: u16) -> &'static str {
    match status {
        401 => NOT_AUTHENTICATED,
        403 => NOT_AUTHORIZED,
        s if s >= 500 => SERVER_ERROR,
        _ => REQUEST_FAILED,
    }
}

/// Émet une notification par échec puis laisse l'erreur remonter
pub struct ErrorNotifier {
    notifier: Arc<dyn Notifier>,
}

impl ErrorNotifier {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl Middleware for ErrorNotifier {
    fn on_error(&self, request: &ApiRequest, error: &mut ApiError) {
        let message = notification_message(error);
        warn!(
            method = %request.method,
            path = %request.path,
            status = ?error.status(),
            error = %error,
            "Request failed"
        );
        self.notifier.error(&message);
    }
}
