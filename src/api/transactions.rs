// ============================================================================
// Endpoints : /transactions
// ============================================================================
// - GET  /transactions?page={n}&size={m}           → PaginatedResult<Transaction>
// - POST /transactions                              → Transaction créée
// - GET  /transactions/{id}                         → Transaction
// - GET  /transactions/reconcile?page={n}&size={m}  → transactions à pointer
// ============================================================================

use tracing::{info, instrument};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::ApiRequest;
use crate::models::{CreateTransactionRequest, PaginatedResult, Transaction};

impl ApiClient {
    /// Récupère une page de transactions
    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResult<Transaction>, ApiError> {
        let request = ApiRequest::get("/transactions")
            .query("page", page)
            .query("size", size);

        let result: PaginatedResult<Transaction> = self.send(request).await?;
        info!(
            count = result.content.len(),
            total = result.total_elements,
            "Fetched transactions page"
        );
        Ok(result)
    }

    /// Crée une transaction
    #[instrument(skip(self, payload), fields(splits = payload.splits.len()))]
    pub async fn create_transaction(
        &self,
        payload: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let request = ApiRequest::post("/transactions").json(payload)?;

        let created: Transaction = self.send(request).await?;
        info!(id = created.id, "Transaction created");
        Ok(created)
    }

    /// Récupère une transaction par id
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: i64) -> Result<Transaction, ApiError> {
        self.send(ApiRequest::get(format!("/transactions/{}", id))).await
    }

    /// Transactions en attente de réconciliation
    #[instrument(skip(self))]
    pub async fn reconcile(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResult<Transaction>, ApiError> {
        let request = ApiRequest::get("/transactions/reconcile")
            .query("page", page)
            .query("size", size);

        self.send(request).await
    }
}
