//! Budget status display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::CategoryStatus;

use super::report::format_bar;

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format category statuses as a table with alert markers and usage bars
pub fn format_status_table(statuses: &[CategoryStatus], currency_symbol: &str) -> String {
    if statuses.is_empty() {
        return "No budget categories configured. Use 'fintrack budget set' to add one.\n"
            .to_string();
    }

    let rows = statuses.iter().map(|s| StatusRow {
        marker: s.alert_level.marker(),
        name: s.name.clone(),
        limit: s.limit.format_with_symbol(currency_symbol),
        spent: s.spent.format_with_symbol(currency_symbol),
        remaining: s.remaining.format_with_symbol(currency_symbol),
        used: format!("{:.1}%", s.percentage_used),
        bar: format_bar(s.percentage_used.min(100.0), 100.0, 10),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
