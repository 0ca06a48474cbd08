// ============================================================================
// Module : store
// ============================================================================
// Conteneurs d'état côté client, construits une fois au démarrage et
// partagés par Arc entre les composants qui en ont besoin.
// ============================================================================

pub mod account;
pub mod transaction;

pub use account::{AccountState, AccountStore};
pub use transaction::{ResponseOrdering, TransactionState, TransactionStore, DEFAULT_PAGE_SIZE};
