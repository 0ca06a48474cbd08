// ============================================================================
// Erreurs de la couche HTTP
// ============================================================================
// Deux familles d'échecs :
// - Transport : aucune réponse (réseau injoignable, timeout)
// - Server    : réponse reçue avec un statut 4xx/5xx, avec éventuellement
//               un champ "message" lisible dans le corps
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] génère l'implémentation de std::error::Error
// - #[error("...")] définit le message Display de chaque variante
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

/// Échec d'un appel à l'API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Pas de réponse du serveur
    #[error("no response from server: {0}")]
    Transport(String),

    /// Le serveur a répondu avec un statut d'erreur
    #[error("server returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Server {
        status: u16,
        /// Champ "message" du corps d'erreur, s'il existe
        message: Option<String>,
        /// Corps brut, pour les logs
        body: String,
    },

    /// Réponse 2xx dont le corps ne correspond pas au type attendu
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Requête impossible à construire (en-tête invalide, corps non sérialisable)
    #[error("invalid request: {0}")]
    Request(String),
}

/// Corps d'erreur renvoyé par le serveur
/// ex: {"code": "BUSINESS_ERROR", "message": "Debits and credits differ"}
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ApiError {
    /// Construit une erreur serveur à partir du statut et du corps brut
    ///
    /// Un message vide ou non textuel est ignoré : le statut sert alors
    /// de classification.
    pub fn from_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .and_then(|value| value.as_str().map(str::to_owned))
            .filter(|message| !message.is_empty());

        ApiError::Server { status, message, body }
    }

    /// Statut HTTP, si une réponse a été reçue
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Vrai si aucune réponse n'a été reçue
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
