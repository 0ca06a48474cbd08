// ============================================================================
// Rapports : bilan, compte de résultat, balance de vérification
// ============================================================================
// Réponses des endpoints /reports/*. Les montants sont calculés côté
// serveur ; le client ne fait que les afficher.
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ligne de bilan ou de compte de résultat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub account_code: String,
    pub account_name: String,
    pub account_type: String,
    pub amount: Decimal,
}

/// GET /reports/balance-sheet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BalanceSheetResponse {
    #[serde(default)]
    pub assets: Vec<ReportItem>,
    #[serde(default)]
    pub liabilities: Vec<ReportItem>,
    #[serde(default)]
    pub equity: Vec<ReportItem>,
}

impl BalanceSheetResponse {
    pub fn total_assets(&self) -> Decimal {
        sum(&self.assets)
    }

    /// Passif + capitaux propres
    pub fn total_liabilities_and_equity(&self) -> Decimal {
        sum(&self.liabilities) + sum(&self.equity)
    }
}

/// GET /reports/income-statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeStatementResponse {
    #[serde(default)]
    pub incomes: Vec<ReportItem>,
    #[serde(default)]
    pub expenses: Vec<ReportItem>,
}

impl IncomeStatementResponse {
    /// Produits - charges
    pub fn net_income(&self) -> Decimal {
        sum(&self.incomes) - sum(&self.expenses)
    }
}

/// Ligne de balance de vérification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    pub account_code: String,
    pub account_name: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// GET /reports/trial-balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceResponse {
    #[serde(default)]
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl TrialBalanceResponse {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

fn sum(items: &[ReportItem]) -> Decimal {
    items.iter().map(|item| item.amount).sum()
}
