// ============================================================================
// Endpoints : /reports et /accounts
// ============================================================================
// Lecture seule : les montants sont calculés par le serveur.
// ============================================================================

use tracing::instrument;

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::ApiRequest;
use crate::models::{Account, BalanceSheetResponse, IncomeStatementResponse, TrialBalanceResponse};

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn balance_sheet(&self) -> Result<BalanceSheetResponse, ApiError> {
        self.send(ApiRequest::get("/reports/balance-sheet")).await
    }

    #[instrument(skip(self))]
    pub async fn income_statement(&self) -> Result<IncomeStatementResponse, ApiError> {
        self.send(ApiRequest::get("/reports/income-statement")).await
    }

    #[instrument(skip(self))]
    pub async fn trial_balance(&self) -> Result<TrialBalanceResponse, ApiError> {
        self.send(ApiRequest::get("/reports/trial-balance")).await
    }

    /// Liste des comptes
    ///
    /// Réservé : l'AccountStore ne l'appelle pas encore.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.send(ApiRequest::get("/accounts")).await
    }
}
