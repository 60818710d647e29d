//! Transaction service
//!
//! Business logic for recording and querying transactions, plus the input
//! parsing helpers shared by the command line and the interactive menu.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::storage::Storage;

/// Date formats accepted on input, tried in order
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y%m%d"];

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by date range start (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end (inclusive)
    pub end_date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    /// Filter by category (case-insensitive)
    pub category: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate, append and persist a transaction
    ///
    /// Nothing is stored when validation fails.
    pub fn add(&self, input: CreateTransactionInput) -> TrackerResult<Transaction> {
        let txn = Transaction::new(
            input.amount,
            input.category.trim(),
            input.description.trim(),
            input.date,
            input.kind,
        );

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let position = self.storage.transactions.append(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            format!("txn-{}", position),
            Some(format!("{} {}", txn.kind, txn.category)),
            &txn,
        )?;

        Ok(txn)
    }

    /// List transactions, newest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        let mut transactions = match (filter.start_date, filter.end_date) {
            (Some(start), Some(end)) => self.storage.transactions.get_by_date_range(start, end)?,
            _ => match filter.kind {
                Some(kind) => self.storage.transactions.get_by_kind(kind)?,
                None => self.storage.transactions.get_all()?,
            },
        };

        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(category) = &filter.category {
            transactions.retain(|t| t.category.eq_ignore_ascii_case(category));
        }

        // Stable sort: same-day entries keep insertion order
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Total income minus total expenses over all transactions
    pub fn balance(&self) -> TrackerResult<Money> {
        let transactions = self.storage.transactions.get_all()?;
        Ok(transactions.iter().map(Transaction::signed_amount).sum())
    }

    /// Total income and total expenses over all transactions
    pub fn totals(&self) -> TrackerResult<(Money, Money)> {
        let transactions = self.storage.transactions.get_all()?;
        let mut income = Money::zero();
        let mut expenses = Money::zero();

        for txn in &transactions {
            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => expenses += txn.amount,
            }
        }

        Ok((income, expenses))
    }

    pub fn count(&self) -> TrackerResult<usize> {
        self.storage.transactions.count()
    }
}

/// Parse a user-entered amount, requiring it to be positive
pub fn parse_amount(input: &str) -> TrackerResult<Money> {
    let amount = Money::parse(input).map_err(|e| TrackerError::Validation(e.to_string()))?;

    if !amount.is_positive() {
        return Err(TrackerError::Validation(format!(
            "Amount must be positive (got {})",
            amount
        )));
    }

    Ok(amount)
}

/// Parse a user-entered date in any of [`DATE_FORMATS`]
///
/// The first format that parses wins, so `01/02/2025` is January 2nd.
pub fn parse_date(input: &str) -> TrackerResult<NaiveDate> {
    let input = input.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| TrackerError::Validation(format!("Unable to parse date: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
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

    fn input(cents: i64, category: &str, d: NaiveDate, kind: TransactionKind) -> CreateTransactionInput {
        CreateTransactionInput {
            amount: Money::from_cents(cents),
            category: category.to_string(),
            description: String::new(),
            date: d,
            kind,
        }
    }

    #[test]
    fn test_add_persists_and_audits() {
        let (temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .add(input(4599, " Food ", date(2025, 1, 15), TransactionKind::Expense))
            .unwrap();
        assert_eq!(txn.category, "Food");

        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(paths.transactions_file().exists());

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].entity_id, "txn-1");
    }

    #[test]
    fn test_add_rejects_invalid_without_state_change() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .add(input(0, "Food", date(2025, 1, 1), TransactionKind::Expense))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .add(input(100, "  ", date(2025, 1, 1), TransactionKind::Income))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.count().unwrap(), 0);
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_balance_is_order_independent() {
        let entries = [
            (500000, "Salary", TransactionKind::Income),
            (12000, "Food", TransactionKind::Expense),
            (3050, "Gas", TransactionKind::Expense),
            (10000, "Gift", TransactionKind::Income),
        ];

        let mut balances = Vec::new();
        for order in [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2]] {
            let (_temp_dir, storage) = create_test_storage();
            let service = TransactionService::new(&storage);
            for i in order {
                let (cents, cat, kind) = entries[i];
                service.add(input(cents, cat, date(2025, 1, 1), kind)).unwrap();
            }
            balances.push(service.balance().unwrap());
        }

        assert!(balances.iter().all(|b| *b == Money::from_cents(494950)));
    }

    #[test]
    fn test_balance_saturates_at_the_extremes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let largest = Money::from_units(crate::models::money::MAX_UNITS);

        for _ in 0..100_000 {
            storage
                .transactions
                .append(Transaction::income(largest, "Pay", "", date(2025, 1, 1)))
                .unwrap();
        }

        assert_eq!(service.balance().unwrap(), Money::from_cents(i64::MAX));
        let (income, expenses) = service.totals().unwrap();
        assert_eq!(income, Money::from_cents(i64::MAX));
        assert!(expenses.is_zero());
    }

    #[test]
    fn test_totals() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(100000, "Salary", date(2025, 1, 1), TransactionKind::Income)).unwrap();
        service.add(input(2500, "Food", date(2025, 1, 2), TransactionKind::Expense)).unwrap();

        let (income, expenses) = service.totals().unwrap();
        assert_eq!(income, Money::from_units(1000));
        assert_eq!(expenses, Money::from_units(25));
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(input(100000, "Salary", date(2025, 1, 1), TransactionKind::Income)).unwrap();
        service.add(input(2500, "Food", date(2025, 1, 20), TransactionKind::Expense)).unwrap();
        service.add(input(1500, "food", date(2025, 2, 3), TransactionKind::Expense)).unwrap();

        let all = service.list(TransactionFilter::new()).unwrap();
        assert_eq!(all[0].date, date(2025, 2, 3));

        let jan = service
            .list(TransactionFilter::new().date_range(date(2025, 1, 1), date(2025, 1, 31)))
            .unwrap();
        assert_eq!(jan.len(), 2);

        let food = service.list(TransactionFilter::new().category("FOOD")).unwrap();
        assert_eq!(food.len(), 2);

        let income = service
            .list(TransactionFilter::new().kind(TransactionKind::Income))
            .unwrap();
        assert_eq!(income.len(), 1);

        let limited = service.list(TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("45.99").unwrap(), Money::from_cents(4599));
        assert!(parse_amount("0").unwrap_err().is_validation());
        assert!(parse_amount("-5").unwrap_err().is_validation());
        assert!(parse_amount("ten").unwrap_err().is_validation());
        assert!(parse_amount("1000000000000").is_ok());
        assert!(parse_amount("2000000000000").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-01-15").unwrap(), date(2025, 1, 15));
        assert_eq!(parse_date("01/15/2025").unwrap(), date(2025, 1, 15));
        assert_eq!(parse_date("15/01/2025").unwrap(), date(2025, 1, 15));
        assert_eq!(parse_date("20250115").unwrap(), date(2025, 1, 15));
        // month-first wins when both readings are valid
        assert_eq!(parse_date("01/02/2025").unwrap(), date(2025, 1, 2));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("yesterday").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Unable to parse date"));
        assert!(parse_date("2025-02-30").is_err());
    }
}
