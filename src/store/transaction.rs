// ============================================================================
// TransactionStore : cache d'une page de transactions
// ============================================================================
// État : liste de la page courante, total, page, taille, indicateur loading.
//
// Cycle de vie d'une opération :
//   Idle → Loading → (Succès | Échec) → Idle
//
// - Succès : list/total/page/size remplacés d'un bloc par la réponse
// - Échec  : les données restent intactes, l'erreur remonte à l'appelant
// - Dans les deux cas loading repasse à false (LoadingGuard, RAII)
//
// Après une création, la page 0 est rechargée depuis le serveur au lieu
// d'insérer localement la transaction : ids et soldes sont calculés par
// le serveur.
//
// CONCEPT RUST : Mutex + Arc
// - Le store est partagé (Arc<TransactionStore>) entre les composants
// - Le Mutex n'est jamais tenu pendant un .await
// ============================================================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument};

use crate::api::{ApiClient, ApiError};
use crate::models::{CreateTransactionRequest, PaginatedResult, Transaction};

/// Taille de page par défaut
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Que faire quand plusieurs fetchs sont en vol en même temps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Chaque réponse est appliquée à son arrivée : la dernière arrivée gagne
    #[default]
    LastResponseWins,

    /// Seule la réponse de la requête la plus récente est appliquée
    /// (jeton de séquence, les réponses périmées sont ignorées)
    LatestRequestWins,
}

/// Instantané de l'état du store
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionState {
    pub list: Vec<Transaction>,
    pub total: u64,
    /// Index de page, commence à 0
    pub page: u32,
    pub size: u32,
    pub loading: bool,
}

impl Default for TransactionState {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            loading: false,
        }
    }
}

struct Inner {
    state: TransactionState,
    /// Jeton de la dernière requête émise
    latest_ticket: u64,
}

/// Store des transactions
pub struct TransactionStore {
    client: Arc<ApiClient>,
    ordering: ResponseOrdering,
    inner: Mutex<Inner>,
}

impl TransactionStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self::with_ordering(client, ResponseOrdering::default())
    }

    pub fn with_ordering(client: Arc<ApiClient>, ordering: ResponseOrdering) -> Self {
        Self {
            client,
            ordering,
            inner: Mutex::new(Inner {
                state: TransactionState::default(),
                latest_ticket: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copie de l'état courant
    pub fn snapshot(&self) -> TransactionState {
        self.lock().state.clone()
    }

    pub fn list(&self) -> Vec<Transaction> {
        self.lock().state.list.clone()
    }

    pub fn total(&self) -> u64 {
        self.lock().state.total
    }

    pub fn page(&self) -> u32 {
        self.lock().state.page
    }

    pub fn size(&self) -> u32 {
        self.lock().state.size
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Charge une page de transactions
    ///
    /// Un argument absent reprend la page / taille courante du store
    /// (page 0, taille 20 au premier appel).
    #[instrument(skip(self))]
    pub async fn fetch_transactions(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<(), ApiError> {
        let (ticket, page, size) = {
            let mut inner = self.lock();
            inner.latest_ticket += 1;
            inner.state.loading = true;
            (
                inner.latest_ticket,
                page.unwrap_or(inner.state.page),
                size.unwrap_or(inner.state.size),
            )
        };

        // Remet loading à false sur tous les chemins de sortie
        let _guard = LoadingGuard { store: self, ticket };

        debug!(ticket, page, size, "Fetching transactions");
        let result = self.client.list_transactions(page, size).await?;
        self.apply(ticket, result);
        Ok(())
    }

    /// Crée une transaction puis recharge la page 0
    ///
    /// Renvoie la transaction créée par le serveur. Si la création échoue,
    /// aucun rechargement n'a lieu. Si le rechargement échoue, son erreur
    /// remonte même si la création a réussi.
    #[instrument(skip(self, payload))]
    pub async fn create_transaction(
        &self,
        payload: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let created = self.client.create_transaction(payload).await?;

        let size = self.size();
        self.fetch_transactions(Some(0), Some(size)).await?;

        Ok(created)
    }

    /// Remplace l'état par la page reçue
    fn apply(&self, ticket: u64, result: PaginatedResult<Transaction>) {
        let mut inner = self.lock();

        if self.ordering == ResponseOrdering::LatestRequestWins && ticket != inner.latest_ticket {
            debug!(ticket, latest = inner.latest_ticket, "Discarding stale transactions page");
            return;
        }

        let state = &mut inner.state;
        state.list = result.content;
        state.total = result.total_elements;
        state.page = result.number;
        state.size = result.size;

        info!(page = state.page, size = state.size, total = state.total, "Transactions page applied");
    }

    fn finish(&self, ticket: u64) {
        let mut inner = self.lock();

        // Une requête plus récente est encore en vol : elle gère loading
        if self.ordering == ResponseOrdering::LatestRequestWins && ticket != inner.latest_ticket {
            return;
        }
        inner.state.loading = false;
    }
}

/// Garde RAII de l'indicateur loading
///
/// CONCEPT RUST : Drop
/// - drop() est appelé quand la garde sort du scope
/// - Y compris quand `?` fait sortir la fonction en erreur
struct LoadingGuard<'a> {
    store: &'a TransactionStore,
    ticket: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.finish(self.ticket);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use reqwest::Method;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tokio::sync::Notify;

    use super::*;
    use crate::api::client::testing::test_client;
    use crate::models::{Direction, Split};

    fn tx_json(id: i64) -> Value {
        json!({
            "id": id,
            "tradeDate": "2024-05-02",
            "description": format!("tx {}", id),
            "cleared": false,
            "splits": [
                {"accountId": 1, "amount": 5, "direction": "DEBIT"},
                {"accountId": 2, "amount": 5, "direction": "CREDIT"}
            ]
        })
    }

    fn page_json(ids: &[i64], total: u64, number: u32, size: u32) -> Value {
        let content: Vec<Value> = ids.iter().map(|id| tx_json(*id)).collect();
        json!({
            "content": content,
            "totalElements": total,
            "totalPages": (total as u32).div_ceil(size.max(1)),
            "number": number,
            "size": size
        })
    }

    fn ids(store: &TransactionStore) -> Vec<i64> {
        store.list().iter().map(|tx| tx.id).collect()
    }

    fn payload() -> CreateTransactionRequest {
        CreateTransactionRequest::new(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
            .with_description("Rent")
            .with_split(Split::new(5, Decimal::new(800, 0), Direction::Debit))
            .with_split(Split::new(1, Decimal::new(800, 0), Direction::Credit))
    }

    #[test]
    fn test_initial_state() {
        let t = test_client();
        let store = TransactionStore::new(t.client);

        let state = store.snapshot();
        assert!(state.list.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.page, 0);
        assert_eq!(state.size, 20);
        assert!(!state.loading);
        assert_eq!(store.ordering(), ResponseOrdering::LastResponseWins);
    }

    #[tokio::test]
    async fn test_first_fetch_uses_defaults() {
        let t = test_client();
        t.transport.push_json(200, page_json(&[1], 1, 0, 20));
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(None, None).await.unwrap();

        let call = &t.transport.calls()[0];
        assert_eq!(call.query_value("page"), Some("0"));
        assert_eq!(call.query_value("size"), Some("20"));

        let state = store.snapshot();
        assert_eq!(ids(&store), vec![1]);
        assert_eq!(state.total, 1);
        assert_eq!(state.page, 0);
        assert_eq!(state.size, 20);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_state_mirrors_server_page() {
        let t = test_client();
        // Le serveur peut ajuster la taille demandée : on garde la sienne
        t.transport.push_json(200, page_json(&[11, 12], 42, 3, 2));
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(Some(3), Some(5)).await.unwrap();

        let state = store.snapshot();
        assert_eq!(ids(&store), vec![11, 12]);
        assert_eq!(state.total, 42);
        assert_eq!(state.page, 3);
        assert_eq!(state.size, 2);
    }

    #[tokio::test]
    async fn test_omitted_arguments_reuse_current_page() {
        let t = test_client();
        t.transport.push_json(200, page_json(&[1], 30, 2, 10));
        t.transport.push_json(200, page_json(&[2], 30, 2, 10));
        t.transport.push_json(200, page_json(&[3], 30, 0, 10));
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(Some(2), Some(10)).await.unwrap();
        store.fetch_transactions(None, None).await.unwrap();
        store.fetch_transactions(Some(0), None).await.unwrap();

        let calls = t.transport.calls();
        assert_eq!(calls[1].query_value("page"), Some("2"));
        assert_eq!(calls[1].query_value("size"), Some("10"));
        assert_eq!(calls[2].query_value("page"), Some("0"));
        assert_eq!(calls[2].query_value("size"), Some("10"));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_data() {
        let t = test_client();
        t.transport.push_json(200, page_json(&[1, 2], 2, 0, 20));
        t.transport.push_text(500, "");
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(None, None).await.unwrap();
        let before = store.snapshot();

        let error = store.fetch_transactions(Some(4), Some(50)).await.unwrap_err();
        assert_eq!(error.status(), Some(500));
        assert_eq!(store.snapshot(), before);
        assert!(!store.is_loading());
        assert_eq!(t.notifier.messages(), vec!["server error"]);
    }

    #[tokio::test]
    async fn test_network_failure_scenario() {
        let t = test_client();
        t.transport.push_no_response("timeout");
        let store = TransactionStore::new(t.client.clone());

        let error = store.fetch_transactions(None, None).await.unwrap_err();

        assert_eq!(error, ApiError::Transport("timeout".to_string()));
        assert_eq!(t.notifier.messages(), vec!["network error"]);
        assert!(!store.is_loading());
        assert_eq!(store.snapshot(), TransactionState::default());
    }

    #[tokio::test]
    async fn test_loading_only_while_in_flight() {
        let t = test_client();
        let gate = Arc::new(Notify::new());
        t.transport.push_gated_json(gate.clone(), 200, page_json(&[1], 1, 0, 20));
        let store = TransactionStore::new(t.client.clone());

        assert!(!store.is_loading());

        let check = async {
            tokio::task::yield_now().await;
            assert!(store.is_loading());
            gate.notify_one();
        };
        let (result, ()) = tokio::join!(store.fetch_transactions(None, None), check);

        result.unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_create_refetches_first_page() {
        let t = test_client();
        t.transport.push_json(200, page_json(&[3, 4], 12, 2, 5));
        t.transport.push_json(201, tx_json(7));
        t.transport.push_json(200, page_json(&[7, 6, 5, 4, 3], 5, 0, 5));
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(Some(2), Some(5)).await.unwrap();
        let created = store.create_transaction(&payload()).await.unwrap();

        assert_eq!(created.id, 7);

        let calls = t.transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].method, Method::POST);
        assert_eq!(calls[2].method, Method::GET);
        assert_eq!(calls[2].query_value("page"), Some("0"));
        assert_eq!(calls[2].query_value("size"), Some("5"));

        let state = store.snapshot();
        assert_eq!(ids(&store), vec![7, 6, 5, 4, 3]);
        assert_eq!(state.total, 5);
        assert_eq!(state.page, 0);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_refetch() {
        let t = test_client();
        t.transport.push_json(400, json!({"message": "Debits and credits differ"}));
        let store = TransactionStore::new(t.client.clone());

        let error = store.create_transaction(&payload()).await.unwrap_err();

        assert_eq!(error.status(), Some(400));
        assert_eq!(t.transport.calls().len(), 1);
        assert_eq!(t.notifier.messages(), vec!["Debits and credits differ"]);
        assert_eq!(store.snapshot(), TransactionState::default());
    }

    #[tokio::test]
    async fn test_refetch_failure_fails_create() {
        let t = test_client();
        t.transport.push_json(200, page_json(&[1], 1, 0, 20));
        t.transport.push_json(201, tx_json(2));
        t.transport.push_no_response("connection reset");
        let store = TransactionStore::new(t.client.clone());

        store.fetch_transactions(None, None).await.unwrap();
        let error = store.create_transaction(&payload()).await.unwrap_err();

        assert!(error.is_transport());
        assert_eq!(t.transport.calls().len(), 3);
        assert_eq!(ids(&store), vec![1]);
        assert!(!store.is_loading());
        assert_eq!(t.notifier.messages(), vec!["network error"]);
    }

    #[tokio::test]
    async fn test_last_response_wins_by_default() {
        let t = test_client();
        // Le premier fetch répond après le second
        t.transport.push_delayed_json(Duration::from_millis(80), 200, page_json(&[1], 9, 1, 20));
        t.transport.push_delayed_json(Duration::from_millis(5), 200, page_json(&[2], 9, 2, 20));
        let store = TransactionStore::new(t.client.clone());

        let (first, second) = tokio::join!(
            store.fetch_transactions(Some(1), None),
            store.fetch_transactions(Some(2), None),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(store.page(), 1);
        assert_eq!(ids(&store), vec![1]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_latest_request_wins_discards_stale_page() {
        let t = test_client();
        t.transport.push_delayed_json(Duration::from_millis(80), 200, page_json(&[1], 9, 1, 20));
        t.transport.push_delayed_json(Duration::from_millis(5), 200, page_json(&[2], 9, 2, 20));
        let store = TransactionStore::with_ordering(t.client.clone(), ResponseOrdering::LatestRequestWins);

        let (first, second) = tokio::join!(
            store.fetch_transactions(Some(1), None),
            store.fetch_transactions(Some(2), None),
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(store.page(), 2);
        assert_eq!(ids(&store), vec![2]);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_latest_request_keeps_loading_until_latest_resolves() {
        let t = test_client();
        let gate = Arc::new(Notify::new());
        t.transport.push_delayed_json(Duration::from_millis(10), 200, page_json(&[1], 9, 1, 20));
        t.transport.push_gated_json(gate.clone(), 200, page_json(&[2], 9, 2, 20));
        let store = TransactionStore::with_ordering(t.client.clone(), ResponseOrdering::LatestRequestWins);

        let check = async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            // Le premier fetch est terminé (réponse ignorée), le second est toujours en vol
            assert!(store.is_loading());
            assert!(store.list().is_empty());
            gate.notify_one();
        };
        let (first, second, ()) = tokio::join!(
            store.fetch_transactions(Some(1), None),
            store.fetch_transactions(Some(2), None),
            check,
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(store.page(), 2);
        assert!(!store.is_loading());
    }
}
