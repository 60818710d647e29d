//! Budget service
//!
//! Business logic for the budget ledger: configuring monthly limits,
//! recomputing spending from the transaction history, classifying categories
//! and suggesting reallocations.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    BudgetCategory, CategoryStatus, Money, Month, ReallocationSuggestion, Transaction,
};
use crate::reports::BudgetReport;
use crate::storage::Storage;

/// Limits seeded by [`BudgetService::create_sample_budget`]
pub const SAMPLE_BUDGET: [(&str, i64); 5] = [
    ("Food", 600),
    ("Transportation", 200),
    ("Entertainment", 150),
    ("Utilities", 300),
    ("Shopping", 250),
];

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the category with zero spend, or update its limit in place
    ///
    /// The limit is not checked for sign; zero and negative limits are kept.
    pub fn set_limit(&self, category: &str, monthly_limit: Money) -> TrackerResult<BudgetCategory> {
        let name = category.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        let (before, after) = self.storage.budget.upsert_limit(name, monthly_limit)?;
        self.storage.budget.save()?;

        match before {
            Some(before) => self.storage.log_update(
                EntityType::BudgetCategory,
                name,
                Some(name.to_string()),
                &before,
                &after,
            )?,
            None => self.storage.log_create(
                EntityType::BudgetCategory,
                name,
                Some(name.to_string()),
                &after,
            )?,
        }

        Ok(after)
    }

    /// Recompute every category's spending for (year, month) from scratch
    ///
    /// Only EXPENSE transactions dated in the month count, and only toward
    /// categories that have a configured limit.
    pub fn refresh_spending(
        &self,
        transactions: &[Transaction],
        year: i32,
        month: u32,
    ) -> TrackerResult<()> {
        self.storage.budget.reset_spending()?;

        let mut matched = 0usize;
        for txn in transactions
            .iter()
            .filter(|t| t.is_expense() && t.is_in_month(year, month))
        {
            if self.storage.budget.add_spending(&txn.category, txn.amount)? {
                matched += 1;
            }
        }

        self.storage.budget.save()?;

        self.storage.log_refresh(
            EntityType::BudgetCategory,
            format!("{:04}-{:02}", year, month),
            format!(
                "{} categories recomputed from {} matching expenses",
                self.storage.budget.count()?,
                matched
            ),
        )
    }

    /// Refresh spending for a month from the stored transaction history
    pub fn refresh_month(&self, month: Month) -> TrackerResult<()> {
        let transactions = self.storage.transactions.get_all()?;
        self.refresh_spending(&transactions, month.year(), month.month())
    }

    pub fn categories(&self) -> TrackerResult<Vec<BudgetCategory>> {
        self.storage.budget.get_all()
    }

    /// Status of every category, in configuration order
    pub fn status(&self) -> TrackerResult<Vec<CategoryStatus>> {
        Ok(self
            .storage
            .budget
            .get_all()?
            .iter()
            .map(BudgetCategory::status)
            .collect())
    }

    /// Names of categories whose spending exceeds their limit
    pub fn overspent(&self) -> TrackerResult<Vec<String>> {
        Ok(self
            .storage
            .budget
            .get_all()?
            .into_iter()
            .filter(BudgetCategory::is_overspent)
            .map(|c| c.name)
            .collect())
    }

    pub fn total_budget(&self) -> TrackerResult<Money> {
        Ok(self
            .storage
            .budget
            .get_all()?
            .iter()
            .map(|c| c.monthly_limit)
            .sum())
    }

    pub fn total_spent(&self) -> TrackerResult<Money> {
        Ok(self
            .storage
            .budget
            .get_all()?
            .iter()
            .map(|c| c.current_spent)
            .sum())
    }

    pub fn suggest_reallocation(&self) -> TrackerResult<Vec<ReallocationSuggestion>> {
        Ok(suggest_reallocation(&self.storage.budget.get_all()?))
    }

    /// The full text budget report
    pub fn report(&self) -> TrackerResult<String> {
        let categories = self.storage.budget.get_all()?;
        Ok(BudgetReport::generate(&categories).format_terminal())
    }

    /// Seed the ledger with a starter set of categories
    pub fn create_sample_budget(&self) -> TrackerResult<Vec<BudgetCategory>> {
        SAMPLE_BUDGET
            .iter()
            .map(|(name, limit)| self.set_limit(name, Money::from_units(*limit)))
            .collect()
    }
}

/// Pair overspent categories with underspent donors
///
/// Overspent means spent > limit; underspent means spent < 70% of the limit.
/// Both lists are ordered by their delta, largest first (ties keep
/// configuration order). Each overspent category takes the first donor whose
/// surplus covers its deficit. Donor surplus is not reduced after a match, so
/// several categories can name the same donor.
pub fn suggest_reallocation(categories: &[BudgetCategory]) -> Vec<ReallocationSuggestion> {
    let mut overspent: Vec<(&str, Money)> = Vec::new();
    let mut underspent: Vec<(&str, Money)> = Vec::new();

    for category in categories {
        if category.is_overspent() {
            overspent.push((&category.name, category.current_spent - category.monthly_limit));
        } else if category.is_underspent() {
            underspent.push((&category.name, category.monthly_limit - category.current_spent));
        }
    }

    overspent.sort_by(|a, b| b.1.cmp(&a.1));
    underspent.sort_by(|a, b| b.1.cmp(&a.1));

    overspent
        .into_iter()
        .filter_map(|(name, deficit)| {
            underspent
                .iter()
                .find(|(_, surplus)| *surplus >= deficit)
                .map(|(donor, _)| ReallocationSuggestion {
                    category: name.to_string(),
                    donor: donor.to_string(),
                    amount: deficit,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::TrackerPaths;
    use crate::models::AlertLevel;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn category(name: &str, limit: i64, spent: i64) -> BudgetCategory {
        let mut cat = BudgetCategory::new(name, Money::from_units(limit));
        cat.current_spent = Money::from_units(spent);
        cat
    }

    fn january_history() -> Vec<Transaction> {
        vec![
            Transaction::expense(Money::from_units(300), "Food", "", date(2025, 1, 3)),
            Transaction::expense(Money::from_units(150), "Food", "", date(2025, 1, 20)),
            Transaction::expense(Money::from_units(90), "Food", "", date(2025, 2, 1)),
            Transaction::income(Money::from_units(50), "Food", "refund", date(2025, 1, 9)),
            Transaction::expense(Money::from_units(40), "Travel", "", date(2025, 1, 11)),
            Transaction::expense(Money::from_units(190), "Gas", "", date(2025, 1, 12)),
        ]
    }

    #[test]
    fn test_set_limit_creates_and_updates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set_limit("Food", Money::from_units(500)).unwrap();
        let updated = service.set_limit("Food", Money::from_units(600)).unwrap();
        assert_eq!(updated.monthly_limit, Money::from_units(600));
        assert_eq!(service.categories().unwrap().len(), 1);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit[0].operation, Operation::Create);
        assert_eq!(audit[1].operation, Operation::Update);
    }

    #[test]
    fn test_set_limit_accepts_zero_and_negative() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service.set_limit("Zero", Money::zero()).unwrap();
        service.set_limit("Negative", Money::from_units(-10)).unwrap();

        let status = service.status().unwrap();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].alert_level, AlertLevel::Green);
    }

    #[test]
    fn test_set_limit_rejects_blank_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        assert!(service.set_limit("  ", Money::from_units(1)).unwrap_err().is_validation());
    }

    #[test]
    fn test_refresh_counts_only_month_expenses_in_budgeted_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(600)).unwrap();
        service.set_limit("Gas", Money::from_units(200)).unwrap();

        service.refresh_spending(&january_history(), 2025, 1).unwrap();

        let status = service.status().unwrap();
        assert_eq!(status[0].spent, Money::from_units(450));
        assert_eq!(status[0].percentage_used, 75.0);
        assert_eq!(status[0].alert_level, AlertLevel::Green);
        assert_eq!(status[0].remaining, Money::from_units(150));

        assert_eq!(status[1].spent, Money::from_units(190));
        assert_eq!(status[1].alert_level, AlertLevel::Red);

        assert_eq!(service.total_spent().unwrap(), Money::from_units(640));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(600)).unwrap();

        service.refresh_spending(&january_history(), 2025, 1).unwrap();
        let first = service.categories().unwrap();
        service.refresh_spending(&january_history(), 2025, 1).unwrap();
        assert_eq!(service.categories().unwrap(), first);
    }

    #[test]
    fn test_refresh_resets_previous_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(600)).unwrap();

        service.refresh_spending(&january_history(), 2025, 1).unwrap();
        service.refresh_spending(&january_history(), 2025, 2).unwrap();
        assert_eq!(service.total_spent().unwrap(), Money::from_units(90));

        service.refresh_spending(&[], 2025, 2).unwrap();
        assert!(service.total_spent().unwrap().is_zero());
    }

    #[test]
    fn test_refresh_persists() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(600)).unwrap();
        service.refresh_spending(&january_history(), 2025, 1).unwrap();

        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let food = reopened.budget.get("Food").unwrap().unwrap();
        assert_eq!(food.current_spent, Money::from_units(450));
    }

    #[test]
    fn test_overspent_and_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(100)).unwrap();
        service.set_limit("Fun", Money::from_units(50)).unwrap();
        service.set_limit("Gas", Money::from_units(80)).unwrap();

        let history = vec![
            Transaction::expense(Money::from_units(120), "Food", "", date(2025, 3, 1)),
            Transaction::expense(Money::from_units(60), "Gas", "", date(2025, 3, 2)),
            Transaction::expense(Money::from_units(90), "Gas", "", date(2025, 3, 3)),
        ];
        service.refresh_spending(&history, 2025, 3).unwrap();

        assert_eq!(service.overspent().unwrap(), vec!["Food", "Gas"]);
        assert_eq!(service.total_budget().unwrap(), Money::from_units(230));
        assert_eq!(service.total_spent().unwrap(), Money::from_units(270));
    }

    #[test]
    fn test_suggestion_for_food_from_entertainment() {
        let categories = vec![category("Food", 600, 700), category("Entertainment", 150, 50)];

        let suggestions = suggest_reallocation(&categories);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "Food");
        assert_eq!(suggestions[0].donor, "Entertainment");
        assert_eq!(suggestions[0].amount, Money::from_units(100));
        assert_eq!(
            suggestions[0].to_string(),
            "Consider reallocating $100.00 from Entertainment"
        );
    }

    #[test]
    fn test_donor_is_not_decremented() {
        let categories = vec![
            category("Food", 100, 160),
            category("Gas", 100, 150),
            category("Savings", 200, 0),
        ];

        let suggestions = suggest_reallocation(&categories);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, "Food");
        assert_eq!(suggestions[1].category, "Gas");
        assert!(suggestions.iter().all(|s| s.donor == "Savings"));
    }

    #[test]
    fn test_largest_deficit_first_and_first_sufficient_donor() {
        let categories = vec![
            category("Small", 100, 110),
            category("Big", 100, 180),
            category("Tiny", 20, 0),
            category("Huge", 500, 0),
        ];

        let suggestions = suggest_reallocation(&categories);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, "Big");
        assert_eq!(suggestions[0].donor, "Huge");
        // Huge sorts before Tiny, so it is chosen even for the small deficit
        assert_eq!(suggestions[1].category, "Small");
        assert_eq!(suggestions[1].donor, "Huge");
    }

    #[test]
    fn test_no_suggestion_without_sufficient_donor() {
        let categories = vec![category("Food", 100, 300), category("Fun", 100, 0)];
        assert!(suggest_reallocation(&categories).is_empty());

        let only_over = vec![category("Food", 100, 300)];
        assert!(suggest_reallocation(&only_over).is_empty());
    }

    #[test]
    fn test_create_sample_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let created = service.create_sample_budget().unwrap();

        assert_eq!(created.len(), 5);
        assert_eq!(service.total_budget().unwrap(), Money::from_units(1500));
        let names: Vec<_> = created.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Food", "Transportation", "Entertainment", "Utilities", "Shopping"]
        );
    }

    #[test]
    fn test_report_mentions_sections() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        service.set_limit("Food", Money::from_units(600)).unwrap();
        service.set_limit("Entertainment", Money::from_units(150)).unwrap();
        let history = vec![
            Transaction::expense(Money::from_units(700), "Food", "", date(2025, 1, 3)),
            Transaction::expense(Money::from_units(50), "Entertainment", "", date(2025, 1, 4)),
        ];
        service.refresh_spending(&history, 2025, 1).unwrap();

        let report = service.report().unwrap();
        assert!(report.contains("=== MONTHLY BUDGET REPORT ==="));
        assert!(report.contains("🚨 OVERSPENT CATEGORIES:"));
        assert!(report.contains("Consider reallocating $100.00 from Entertainment"));
    }
}
