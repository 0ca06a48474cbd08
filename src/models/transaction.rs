// ============================================================================
// Structures : Transaction, Split
// ============================================================================
// Une transaction en partie double est composée de plusieurs "splits"
// (jambes) : chaque split débite ou crédite un compte.
//
// Invariant comptable : somme des DEBIT == somme des CREDIT.
// Cet invariant est vérifié par le serveur, pas par le client. Les helpers
// ci-dessous ne servent qu'à l'affichage.
//
// CONCEPT RUST : Ownership
// - Transaction possède ses Split (Vec<Split>)
// - Split ne référence le compte que par son id (pas de pointeur)
// ============================================================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sens d'un split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Debit,
    Credit,
}

/// Une jambe de transaction
///
/// Côté client, un split peut être en cours de saisie :
/// account_id et amount valent alors None.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub account_id: Option<i64>,

    /// Rempli par le serveur
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,

    pub amount: Option<Decimal>,

    pub direction: Direction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl Split {
    /// Split vide, en cours de saisie
    pub fn pending(direction: Direction) -> Self {
        Self {
            id: None,
            account_id: None,
            account_name: None,
            account_code: None,
            amount: None,
            direction,
            quantity: None,
            price: None,
            memo: None,
        }
    }

    /// Split complet sur un compte
    pub fn new(account_id: i64, amount: Decimal, direction: Direction) -> Self {
        Self {
            account_id: Some(account_id),
            amount: Some(amount),
            ..Self::pending(direction)
        }
    }

    /// Ajoute un mémo (builder)
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Vrai si le compte et le montant sont renseignés
    pub fn is_complete(&self) -> bool {
        self.account_id.is_some() && self.amount.is_some()
    }
}

/// Transaction telle que renvoyée par l'API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,

    /// Format JSON : "2024-01-15"
    pub trade_date: NaiveDate,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub reference: Option<String>,

    pub cleared: bool,

    #[serde(default)]
    pub splits: Vec<Split>,
}

impl Transaction {
    pub fn debit_total(&self) -> Decimal {
        total(&self.splits, Direction::Debit)
    }

    pub fn credit_total(&self) -> Decimal {
        total(&self.splits, Direction::Credit)
    }

    /// Débits == crédits (les montants manquants comptent pour zéro)
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }

    /// Formatte la transaction pour l'affichage
    pub fn display(&self) -> String {
        let description = self.description.as_deref().unwrap_or("");
        let cleared = if self.cleared { "✓" } else { " " };

        format!(
            "#{:<6} {}  {} {:<32} {:>12}",
            self.id,
            self.trade_date.format("%Y-%m-%d"),
            cleared,
            description,
            self.debit_total().round_dp(2)
        )
    }
}

/// Corps de POST /transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub trade_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    pub cleared: bool,

    pub splits: Vec<Split>,
}

impl CreateTransactionRequest {
    pub fn new(trade_date: NaiveDate) -> Self {
        Self {
            trade_date,
            description: None,
            reference: None,
            cleared: false,
            splits: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_split(mut self, split: Split) -> Self {
        self.splits.push(split);
        self
    }

    /// Tous les splits ont un compte et un montant
    pub fn is_complete(&self) -> bool {
        !self.splits.is_empty() && self.splits.iter().all(Split::is_complete)
    }

    pub fn is_balanced(&self) -> bool {
        total(&self.splits, Direction::Debit) == total(&self.splits, Direction::Credit)
    }
}

/// Somme des montants d'un sens donné
fn total(splits: &[Split], direction: Direction) -> Decimal {
    splits
        .iter()
        .filter(|split| split.direction == direction)
        .filter_map(|split| split.amount)
        .sum()
}
