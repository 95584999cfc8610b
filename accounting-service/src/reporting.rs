//! Dashboard figures, report selection and exports
use crate::catalog::Catalog;
use crate::error::{AccountingError, AccountingResult};
use crate::models::{Expense, ExpenseStatus};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use utoipa::ToSchema;

/// Number of expenses shown in the dashboard's "recent" list
pub const RECENT_EXPENSES: usize = 5;

/// Filter value meaning "no restriction" on the reports page
pub const ALL: &str = "all";

pub const CSV_HEADERS: [&str; 9] = [
    "ID",
    "Descripción",
    "Monto",
    "Estado",
    "Fecha",
    "Categoría",
    "Departamento",
    "Sede",
    "Usuario",
];

const BOM: char = '\u{FEFF}';

const BRAND_GUIDELINES: &str = "
- Primary color: #007BFF
- Accent color: #FFC107
- Font: Inter (sans-serif)
- Layout: Use tables for data, include the university logo at the top.
";

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryTotal {
    #[schema(example = "Transporte")]
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 1520.75)]
    pub total: Decimal,
}

/// Per-category totals in catalog order, omitting empty categories
pub fn category_totals(catalog: &Catalog, expenses: &[Expense]) -> Vec<CategoryTotal> {
    catalog
        .categories
        .iter()
        .map(|category| CategoryTotal {
            name: category.name.clone(),
            total: expenses
                .iter()
                .filter(|e| e.category == category.name)
                .map(|e| e.amount)
                .sum(),
        })
        .filter(|c| c.total > Decimal::ZERO)
        .collect()
}

/// Dashboard summary cards, recent activity and category chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub pending_count: usize,
    pub expense_count: usize,
    pub recent: Vec<Expense>,
    pub by_category: Vec<CategoryTotal>,
}

impl DashboardSummary {
    pub fn compute(catalog: &Catalog, expenses: &[Expense]) -> Self {
        let recent = expenses
            .iter()
            .sorted_by_key(|e| Reverse(e.date))
            .take(RECENT_EXPENSES)
            .cloned()
            .collect();

        Self {
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            pending_count: expenses
                .iter()
                .filter(|e| e.status == ExpenseStatus::Pending)
                .count(),
            expense_count: expenses.len(),
            recent,
            by_category: category_totals(catalog, expenses),
        }
    }
}

/// Reports page filter
///
/// The date range only applies when both ends are set. `sede`, `department`
/// and `category` hold display names; `None` or `"all"` leaves them open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportFilter {
    #[schema(value_type = Option<String>, format = Date)]
    pub from: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    pub sede: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if expense.date < from || expense.date > to {
                return false;
            }
        }
        restricts(self.sede.as_deref(), &expense.sede)
            && restricts(self.department.as_deref(), &expense.department)
            && restricts(self.category.as_deref(), &expense.category)
    }
}

fn restricts(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some(ALL) | Some("") => true,
        Some(value) => value == actual,
    }
}

/// A report selection with its totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    pub filter: ReportFilter,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub count: usize,
    pub by_category: Vec<CategoryTotal>,
    pub expenses: Vec<Expense>,
}

impl ExpenseReport {
    pub fn new(catalog: &Catalog, filter: ReportFilter, expenses: Vec<Expense>) -> Self {
        Self {
            total_amount: expenses.iter().map(|e| e.amount).sum(),
            count: expenses.len(),
            by_category: category_totals(catalog, &expenses),
            filter,
            expenses,
        }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render a selection as CSV, prefixed with a UTF-8 byte order mark
///
/// # Errors
/// `EmptySelection` when there is nothing to export.
pub fn export_csv(expenses: &[Expense]) -> AccountingResult<String> {
    if expenses.is_empty() {
        return Err(AccountingError::EmptySelection);
    }

    let rows = expenses.iter().map(|e| {
        [
            e.id.clone(),
            quoted(&e.description),
            e.amount.to_string(),
            e.status.to_string(),
            e.date.format("%Y-%m-%d").to_string(),
            e.category.clone(),
            e.department.clone(),
            e.sede.clone(),
            quoted(&e.user),
        ]
        .join(",")
    });

    let body = std::iter::once(CSV_HEADERS.join(",")).chain(rows).join("\n");
    Ok(format!("{BOM}{body}"))
}

pub fn csv_file_name(today: NaiveDate) -> String {
    format!("export-gastos-{}.csv", today.format("%Y-%m-%d"))
}

/// Kind of branded PDF report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Expense table for the current selection
    Standard,
    /// The project's final technical report
    Final,
}

impl ReportKind {
    pub fn is_final(self) -> bool {
        self == ReportKind::Final
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Standard => "Reporte de Gastos",
            ReportKind::Final => "Informe Final del Proyecto SGC_USB",
        }
    }

    /// Brand guidelines sent with the report; empty for the final report
    pub fn brand_guidelines(self) -> &'static str {
        match self {
            ReportKind::Standard => BRAND_GUIDELINES,
            ReportKind::Final => "",
        }
    }

    pub fn file_name(self, today: NaiveDate) -> String {
        let stem = match self {
            ReportKind::Standard => "reporte-gastos",
            ReportKind::Final => "Informe-Final-SGC-USB",
        };
        format!("{stem}-{}.pdf", today.format("%Y-%m-%d"))
    }
}

/// Report payload handed to the PDF generator as a JSON string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfReportData {
    pub title: String,
    pub date: String,
    pub expenses: Vec<Expense>,
    pub is_final_report: bool,
}

impl PdfReportData {
    /// # Errors
    /// `EmptySelection` for a standard report without expenses.
    pub fn build(kind: ReportKind, expenses: Vec<Expense>, today: NaiveDate) -> AccountingResult<Self> {
        if !kind.is_final() && expenses.is_empty() {
            return Err(AccountingError::EmptySelection);
        }
        Ok(Self {
            title: kind.title().to_string(),
            date: local_date(today),
            expenses: if kind.is_final() { Vec::new() } else { expenses },
            is_final_report: kind.is_final(),
        })
    }
}

/// Bolivian short date, `d/m/yyyy`
pub fn local_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
