// ============================================================================
// Structure : PaginatedResult<T>
// ============================================================================
// Page de résultats produite par le serveur (format "Page" Spring).
// Le client la traite comme un instantané immuable : elle remplace
// entièrement la page précédente à chaque fetch.
//
// CONCEPT RUST : Générique <T>
// - Le même type sert pour les transactions, la réconciliation, etc.
// - Les bornes serde sont déduites par #[derive]
// ============================================================================

use serde::{Deserialize, Serialize};

/// Une page de résultats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub content: Vec<T>,

    pub total_elements: u64,

    #[serde(default)]
    pub total_pages: u32,

    /// Index de page, commence à 0
    pub number: u32,

    pub size: u32,
}

impl<T> PaginatedResult<T> {
    /// Vrai s'il existe une page après celle-ci
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
