// ============================================================================
// Notifications utilisateur
// ============================================================================
// Le client HTTP émet exactement une notification par requête échouée.
// L'affichage (toast, barre de statut...) appartient à la couche UI ; ici on
// ne définit que le point de sortie.
// ============================================================================

use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Destination des messages d'erreur destinés à l'utilisateur
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifications envoyées dans les logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        warn!(notification = %message, "User notification");
    }
}

/// Garde les notifications en mémoire jusqu'à ce que l'UI les affiche
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copie des messages en attente
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Vide la file et renvoie son contenu
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for CollectingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
