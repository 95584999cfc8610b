// Start-up history for the expense ledger
use crate::catalog::Catalog;
use crate::models::{Expense, ExpenseOwner, ExpenseStatus};
use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

/// Most expenses generated for a single day
pub const MAX_EXPENSES_PER_DAY: u32 = 5;

const DESCRIPTIONS: [&str; 13] = [
    "Viaje a conferencia de {sede}",
    "Compra de resmas de papel y tóner",
    "Almuerzo con cliente potencial",
    "Licencia anual de {software}",
    "Viáticos para evento de reclutamiento",
    "Campaña publicitaria en redes sociales",
    "Mantenimiento de servidor de base de datos",
    "Pasajes de bus para visita a campus {sede}",
    "Cena de equipo para celebrar hitos",
    "Renovación de suscripción a {software} Cloud",
    "Material de marketing para feria universitaria",
    "Reparación de aire acondicionado en oficina",
    "Desayuno de trabajo con equipo de {department}",
];

const SOFTWARE: [&str; 5] = [
    "Microsoft Office 365",
    "Adobe Creative Cloud",
    "Slack",
    "Zoom",
    "Asana",
];

/// Amount bounds in cents
const MIN_AMOUNT_CENTS: i64 = 5_000;
const MAX_AMOUNT_CENTS: i64 = 200_000;

/// Generates a plausible expense history between two dates
///
/// Each day receives 1 to [`MAX_EXPENSES_PER_DAY`] expenses. Expense `n`
/// rotates through owners, categories, description templates and statuses by
/// `n`; the amount and the presence of a receipt are random.
#[derive(Debug, Clone)]
pub struct ExpenseGenerator<'a> {
    catalog: &'a Catalog,
    owners: &'a [ExpenseOwner],
    start: NaiveDate,
    end: NaiveDate,
}

impl<'a> ExpenseGenerator<'a> {
    pub fn new(catalog: &'a Catalog, owners: &'a [ExpenseOwner], start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            catalog,
            owners,
            start,
            end,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Expense> {
        if self.owners.is_empty() || self.catalog.categories.is_empty() {
            return Vec::new();
        }

        let mut expenses = Vec::new();
        let mut next_id: u64 = 1;
        let mut day = self.start;

        while day <= self.end {
            let per_day = rng.gen_range(1..=MAX_EXPENSES_PER_DAY);
            for _ in 0..per_day {
                if let Some(expense) = self.generate_one(next_id, day, rng) {
                    expenses.push(expense);
                }
                next_id += 1;
            }
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }

        debug!(count = expenses.len(), from = %self.start, to = %self.end, "Generated expense history");
        expenses
    }

    fn generate_one<R: Rng + ?Sized>(&self, n: u64, day: NaiveDate, rng: &mut R) -> Option<Expense> {
        let owner = self.owners.get(rotation(n, self.owners.len()))?;
        let category = self.catalog.categories.get(rotation(n, self.catalog.categories.len()))?;
        let status = *ExpenseStatus::ALL.get(rotation(n, ExpenseStatus::ALL.len()))?;

        let amount = Decimal::new(rng.gen_range(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS), 2);
        let receipt_url = rng.gen_bool(0.5).then(|| format!("/receipts/rec-{n}.pdf"));

        Some(Expense {
            id: expense_id(n),
            description: self.describe(n, owner),
            amount,
            status,
            date: day,
            category: category.name.clone(),
            department: owner.department.clone(),
            sede: owner.sede.clone(),
            user: owner.name.clone(),
            receipt_url,
        })
    }

    fn describe(&self, n: u64, owner: &ExpenseOwner) -> String {
        let template = DESCRIPTIONS
            .get(rotation(n, DESCRIPTIONS.len()))
            .copied()
            .unwrap_or("Gasto general");
        let other_sede = self
            .catalog
            .sedes
            .iter()
            .find(|s| s.name != owner.sede)
            .map_or("otra sede", |s| s.name.as_str());
        let software = SOFTWARE
            .get(rotation(n, SOFTWARE.len()))
            .copied()
            .unwrap_or("Zoom");
        let other_department = self
            .catalog
            .departments
            .iter()
            .find(|d| d.name != owner.department)
            .map_or("otro departamento", |d| d.name.as_str());

        template
            .replacen("{sede}", other_sede, 1)
            .replacen("{software}", software, 1)
            .replacen("{department}", other_department, 1)
    }
}

/// Identifier for the `n`-th expense (`EXP-001`)
pub fn expense_id(n: u64) -> String {
    format!("EXP-{n:03}")
}

fn rotation(n: u64, len: usize) -> usize {
    usize::try_from(n % len as u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn owners() -> Vec<ExpenseOwner> {
        vec![
            ExpenseOwner {
                name: "Juan Pérez".to_string(),
                department: "Ingeniería de Sistemas".to_string(),
                sede: "La Paz".to_string(),
            },
            ExpenseOwner {
                name: "Maria Garcia".to_string(),
                department: "Administración de Empresas".to_string(),
                sede: "Cochabamba".to_string(),
            },
        ]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_amounts_and_per_day_counts() {
        let catalog = Catalog::reference();
        let owners = owners();
        let expenses = ExpenseGenerator::new(&catalog, &owners, date(2025, 1, 1), date(2025, 1, 20))
            .generate(&mut StdRng::seed_from_u64(3));

        for day in 1..=20 {
            let count = expenses.iter().filter(|e| e.date == date(2025, 1, day)).count();
            assert!((1..=5).contains(&count));
        }
        for e in &expenses {
            assert!(e.amount >= Decimal::new(5_000, 2) && e.amount <= Decimal::new(200_000, 2));
            assert_eq!(e.amount.scale(), 2);
        }
    }

    #[test]
    fn test_rotation_and_templates() {
        let catalog = Catalog::reference();
        let owners = owners();
        let expenses = ExpenseGenerator::new(&catalog, &owners, date(2025, 1, 1), date(2025, 1, 31))
            .generate(&mut StdRng::seed_from_u64(11));

        let first = &expenses[0];
        assert_eq!(first.id, "EXP-001");
        assert_eq!(first.user, "Maria Garcia");
        assert_eq!(first.sede, "Cochabamba");
        assert_eq!(first.category, "Material de Oficina");
        assert_eq!(first.status, ExpenseStatus::Pending);
        assert_eq!(first.description, "Compra de resmas de papel y tóner");

        let third = expenses.iter().find(|e| e.id == "EXP-003").unwrap();
        assert_eq!(third.description, "Licencia anual de Zoom");
        assert_eq!(third.user, "Maria Garcia");

        let seventh = expenses.iter().find(|e| e.id == "EXP-007").unwrap();
        assert_eq!(seventh.description, "Pasajes de bus para visita a campus La Paz");

        let twelfth = expenses.iter().find(|e| e.id == "EXP-012").unwrap();
        assert_eq!(
            twelfth.description,
            "Desayuno de trabajo con equipo de Contaduría Pública"
        );
    }

    #[test]
    fn test_receipts_follow_id() {
        let catalog = Catalog::reference();
        let owners = owners();
        let expenses = ExpenseGenerator::new(&catalog, &owners, date(2025, 1, 1), date(2025, 2, 1))
            .generate(&mut StdRng::seed_from_u64(5));
        let with_receipt: Vec<&Expense> = expenses.iter().filter(|e| e.receipt_url.is_some()).collect();
        assert!(!with_receipt.is_empty());
        assert!(with_receipt.len() < expenses.len());
        for e in with_receipt {
            let n = e.id.trim_start_matches("EXP-").trim_start_matches('0');
            assert_eq!(e.receipt_url.as_deref(), Some(format!("/receipts/rec-{n}.pdf").as_str()));
        }
    }

    #[test]
    fn test_no_owners_no_expenses() {
        let catalog = Catalog::reference();
        let generator = ExpenseGenerator::new(&catalog, &[], date(2025, 1, 1), date(2025, 1, 2));
        assert!(generator.generate(&mut StdRng::seed_from_u64(0)).is_empty());
    }
}
