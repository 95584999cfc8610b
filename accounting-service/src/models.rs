use crate::error::AccountingError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// University campus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Sede {
    #[schema(example = "sede-lp")]
    pub id: String,
    #[schema(example = "La Paz")]
    pub name: String,
}

/// Academic or administrative department, located at one sede
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Department {
    #[schema(example = "d1")]
    pub id: String,
    #[schema(example = "Ingeniería de Sistemas")]
    pub name: String,
    /// Sede name
    #[schema(example = "La Paz")]
    pub sede: String,
}

/// Expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[schema(example = "c1")]
    pub id: String,
    #[schema(example = "Transporte")]
    pub name: String,
}

/// Expense lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Approved,
    Pending,
    Rejected,
    Draft,
}

impl ExpenseStatus {
    /// Rotation order used by the expense generator
    pub const ALL: [ExpenseStatus; 4] = [
        ExpenseStatus::Approved,
        ExpenseStatus::Pending,
        ExpenseStatus::Rejected,
        ExpenseStatus::Draft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseStatus::Approved => "approved",
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Rejected => "rejected",
            ExpenseStatus::Draft => "draft",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AccountingError::UnknownStatus(s.to_string()))
    }
}

/// Expense record
///
/// `department`, `sede`, `category` and `user` hold display names; they are
/// copied at creation time and not kept in sync with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[schema(example = "EXP-001")]
    pub id: String,
    #[schema(example = "Compra de resmas de papel y tóner")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 125.5)]
    pub amount: Decimal,
    pub status: ExpenseStatus,
    #[schema(value_type = String, format = Date, example = "2025-03-14")]
    pub date: NaiveDate,
    pub category: String,
    pub department: String,
    pub sede: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/receipts/rec-1.pdf")]
    pub receipt_url: Option<String>,
}

/// The user an expense is filed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseOwner {
    pub name: String,
    pub department: String,
    pub sede: String,
}

/// Input for filing a new expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[schema(example = "Pasajes de bus para visita a campus Cochabamba")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 85.0)]
    pub amount: Decimal,
    /// Category name
    #[schema(example = "Transporte")]
    pub category: String,
    #[schema(value_type = String, format = Date, example = "2025-10-20")]
    pub date: NaiveDate,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

/// Filter of the expenses table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the description
    pub description: Option<String>,
    /// Empty means every status
    pub statuses: HashSet<ExpenseStatus>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(needle) = self.description.as_deref().filter(|d| !d.is_empty()) {
            if !expense
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        self.statuses.is_empty() || self.statuses.contains(&expense.status)
    }

    /// Parse a `.`-separated status list such as `pending.draft`
    pub fn parse_statuses(raw: &str) -> Result<HashSet<ExpenseStatus>, AccountingError> {
        raw.split(['.', ','])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ExpenseStatus::from_str)
            .collect()
    }
}
