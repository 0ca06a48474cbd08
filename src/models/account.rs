// ============================================================================
// Structure : Account
// ============================================================================
// Représente un compte du plan comptable (actif, passif, capitaux, etc.)
//
// Les comptes appartiennent au serveur : le client ne les modifie jamais
// localement, il les recharge.
//
// CONCEPT RUST : #[serde(rename_all = "camelCase")]
// - Le JSON du serveur utilise "currencySymbol", "parentId"
// - Côté Rust on garde le snake_case (currency_symbol, parent_id)
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nature d'un compte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Asset,      // Actif
    Liability,  // Passif
    Equity,     // Capitaux propres
    Income,     // Produits
    Expense,    // Charges
}

impl AccountType {
    /// Libellé court pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Asset => "ASSET",
            AccountType::Liability => "LIABILITY",
            AccountType::Equity => "EQUITY",
            AccountType::Income => "INCOME",
            AccountType::Expense => "EXPENSE",
        }
    }
}

/// Compte comptable tel que renvoyé par l'API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,

    pub name: String,

    /// Code unique (ex: "1001")
    pub code: String,

    /// "type" est un mot-clé Rust, d'où le renommage
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Solde signé
    pub balance: Decimal,

    pub currency_symbol: String,

    /// Compte parent (hiérarchie non-propriétaire : simple id)
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl Account {
    /// Vrai si le compte est à la racine de la hiérarchie
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Formatte le compte pour l'affichage
    pub fn display(&self) -> String {
        format!(
            "{:<8} {:<24} {:<10} {}{:>12}",
            self.code,
            self.name,
            self.account_type.label(),
            self.currency_symbol,
            self.balance.round_dp(2)
        )
    }
}
