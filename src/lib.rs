// ============================================================================
// LazyLedger - Library
// ============================================================================
// Couche client d'une application de comptabilité en partie double :
// client HTTP, modèles de données et stores.
// ============================================================================

pub mod api;     // Client HTTP de l'API comptable
pub mod models;  // Structures de données
pub mod store;   // État côté client (transactions, comptes)
