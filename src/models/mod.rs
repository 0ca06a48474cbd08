// ============================================================================
// Module : models
// ============================================================================
// Structures de données échangées avec l'API comptable.
// Ce sont des caches transitoires de l'état serveur : créées à la réponse,
// remplacées au fetch suivant, jamais persistées côté client.
// ============================================================================

pub mod account;     // Comptes du plan comptable
pub mod pagination;  // Pages de résultats
pub mod report;      // Bilan, compte de résultat, balance
pub mod transaction; // Transactions et splits

// Re-export des structures principales pour simplifier les imports
// On peut faire : use lazyledger::models::Transaction;
pub use account::{Account, AccountType};
pub use pagination::PaginatedResult;
pub use report::{
    BalanceSheetResponse, IncomeStatementResponse, ReportItem, TrialBalanceResponse,
    TrialBalanceRow,
};
pub use transaction::{CreateTransactionRequest, Direction, Split, Transaction};
