// In-memory expense store with the approvals workflow
use crate::catalog::Catalog;
use crate::error::{AccountingError, AccountingResult};
use crate::generator::expense_id;
use crate::models::{Expense, ExpenseFilter, ExpenseOwner, ExpenseStatus, NewExpense};
use crate::reporting::ReportFilter;
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Shortest accepted expense description
pub const MIN_DESCRIPTION_LEN: usize = 2;

#[derive(Debug, Default)]
struct LedgerState {
    expenses: Vec<Expense>,
    next_id: u64,
}

/// Shared expense ledger
///
/// Readers take a read lock and clone what they return; writers hold the
/// write lock only for the duration of the mutation.
#[derive(Debug)]
pub struct ExpenseLedger {
    catalog: Catalog,
    state: RwLock<LedgerState>,
}

impl ExpenseLedger {
    pub fn new(catalog: Catalog, expenses: Vec<Expense>) -> Self {
        let next_id = expenses
            .iter()
            .filter_map(|e| e.id.strip_prefix("EXP-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            catalog,
            state: RwLock::new(LedgerState { expenses, next_id }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.state.read().expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().expenses.is_empty()
    }

    /// Expenses matching the table filter, in ledger order
    pub fn list(&self, filter: &ExpenseFilter) -> Vec<Expense> {
        self.state
            .read()
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> AccountingResult<Expense> {
        self.state
            .read()
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AccountingError::ExpenseNotFound(id.to_string()))
    }

    /// File a new expense for `owner`
    ///
    /// # Errors
    /// `Validation` for a short description, an amount that is not positive
    /// once rounded to cents, or a date
    /// after `today`; `UnknownCategory` when the category is not in the catalog.
    pub fn create(&self, new: NewExpense, owner: &ExpenseOwner, today: NaiveDate) -> AccountingResult<Expense> {
        let description = new.description.trim();
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(AccountingError::Validation(format!(
                "description must be at least {MIN_DESCRIPTION_LEN} characters"
            )));
        }
        let amount = new.amount.round_dp(2);
        if amount <= Decimal::ZERO {
            return Err(AccountingError::Validation("amount must be at least 0.01".to_string()));
        }
        if new.date > today {
            return Err(AccountingError::Validation("date cannot be in the future".to_string()));
        }
        let category = self
            .catalog
            .category(&new.category)
            .ok_or_else(|| AccountingError::UnknownCategory(new.category.clone()))?
            .name
            .clone();

        let mut state = self.state.write();
        let expense = Expense {
            id: expense_id(state.next_id),
            description: description.to_string(),
            amount,
            status: ExpenseStatus::Pending,
            date: new.date,
            category,
            department: owner.department.clone(),
            sede: owner.sede.clone(),
            user: owner.name.clone(),
            receipt_url: new.receipt_url.filter(|url| !url.trim().is_empty()),
        };
        state.next_id += 1;
        state.expenses.insert(0, expense.clone());

        info!(expense_id = %expense.id, user = %expense.user, amount = %expense.amount, "Expense filed");
        Ok(expense)
    }

    /// The approvals queue
    pub fn pending(&self) -> Vec<Expense> {
        self.list(&ExpenseFilter {
            description: None,
            statuses: [ExpenseStatus::Pending].into_iter().collect(),
        })
    }

    /// # Errors
    /// `ExpenseNotFound`, or `InvalidTransition` when the expense is not pending.
    pub fn approve(&self, id: &str) -> AccountingResult<Expense> {
        self.decide(id, ExpenseStatus::Approved)
    }

    /// # Errors
    /// `ExpenseNotFound`, or `InvalidTransition` when the expense is not pending.
    pub fn reject(&self, id: &str) -> AccountingResult<Expense> {
        self.decide(id, ExpenseStatus::Rejected)
    }

    fn decide(&self, id: &str, to: ExpenseStatus) -> AccountingResult<Expense> {
        let mut state = self.state.write();
        let expense = state
            .expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AccountingError::ExpenseNotFound(id.to_string()))?;

        if expense.status != ExpenseStatus::Pending {
            warn!(expense_id = %id, from = %expense.status, to = %to, "Rejected status transition");
            return Err(AccountingError::InvalidTransition {
                id: id.to_string(),
                from: expense.status,
                to,
            });
        }

        expense.status = to;
        info!(expense_id = %id, status = %to, "Expense reviewed");
        Ok(expense.clone())
    }

    /// Expenses selected by a report filter
    pub fn select(&self, filter: &ReportFilter) -> Vec<Expense> {
        self.state
            .read()
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> Vec<Expense> {
        self.state.read().expenses.clone()
    }
}
