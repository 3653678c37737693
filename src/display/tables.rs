//! Record list tables
//!
//! Rows are built from already-formatted strings so amounts follow the
//! display currency.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::analytics::{gain_loss, goal_progress};
use crate::display::report::{format_percentage, truncate};
use crate::models::{
    Budget, CurrencyFormatter, Expense, Goal, Income, Investment, RecurringTransaction,
    SplitExpense,
};

fn render<R: Tabled>(rows: Vec<R>, amount_columns: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    for &col in amount_columns {
        table.with(Modify::new(Columns::single(col)).with(Alignment::right()));
    }
    table.to_string()
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn expense_table(expenses: &[Expense], fmt: &CurrencyFormatter) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.to_string(),
            category: e.category.clone(),
            description: truncate(&e.description, 30),
            method: e.payment_method.to_string(),
            amount: fmt.format(e.amount),
        })
        .collect();
    render(rows, &[5])
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

pub fn income_table(income: &[Income], fmt: &CurrencyFormatter) -> String {
    if income.is_empty() {
        return "No income found.".to_string();
    }

    let rows = income
        .iter()
        .map(|i| IncomeRow {
            id: i.id.to_string(),
            date: i.date.to_string(),
            source: i.source.to_string(),
            category: i.category.clone().unwrap_or_default(),
            description: truncate(&i.description, 30),
            amount: fmt.format(i.amount),
        })
        .collect();
    render(rows, &[5])
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Categories")]
    categories: usize,
}

pub fn budget_table(budgets: &[Budget], fmt: &CurrencyFormatter) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = budgets
        .iter()
        .map(|b| BudgetRow {
            month: b.month.to_string(),
            total: fmt.format(b.total_budget),
            allocated: fmt.format(b.allocated()),
            categories: b.categories.len(),
        })
        .collect();
    render(rows, &[1, 2])
}

/// Category limits of one budget; categories without a limit show "-"
pub fn budget_detail(budget: &Budget, fmt: &CurrencyFormatter) -> String {
    #[derive(Tabled)]
    struct LimitRow {
        #[tabled(rename = "Category")]
        category: String,
        #[tabled(rename = "Limit")]
        limit: String,
    }

    let mut output = format!(
        "Budget {} : {} ({} unallocated)\n",
        budget.month,
        fmt.format(budget.total_budget),
        fmt.format(budget.unallocated())
    );

    if !budget.categories.is_empty() {
        let rows = budget
            .categories
            .iter()
            .map(|(category, limit)| LimitRow {
                category: category.clone(),
                limit: limit.map(|l| fmt.format(l)).unwrap_or_else(|| "-".to_string()),
            })
            .collect();
        output.push_str(&render(rows, &[1]));
    }
    output
}

#[derive(Tabled)]
struct InvestmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Purchased")]
    purchased: String,
    #[tabled(rename = "Invested")]
    invested: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Return")]
    ret: String,
}

pub fn investment_table(investments: &[Investment], fmt: &CurrencyFormatter) -> String {
    if investments.is_empty() {
        return "No investments found.".to_string();
    }

    let rows = investments
        .iter()
        .map(|inv| InvestmentRow {
            id: inv.id.to_string(),
            name: truncate(&inv.name, 24),
            kind: inv.investment_type.to_string(),
            purchased: inv.purchase_date.to_string(),
            invested: fmt.format(inv.initial_amount),
            value: fmt.format(inv.current_value),
            ret: format_percentage(gain_loss(inv.current_value, inv.initial_amount).percent),
        })
        .collect();
    render(rows, &[4, 5, 6])
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

pub fn goal_table(goals: &[Goal], fmt: &CurrencyFormatter) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let rows = goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.to_string(),
            name: truncate(&g.name, 24),
            priority: g.priority.to_string(),
            due: g.target_date.to_string(),
            saved: fmt.format(g.current_amount),
            target: fmt.format(g.target_amount),
            progress: format_percentage(goal_progress(g.current_amount, g.target_amount)),
        })
        .collect();
    render(rows, &[4, 5, 6])
}

#[derive(Tabled)]
struct RecurringRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Starts")]
    start: String,
    #[tabled(rename = "Ends")]
    end: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Active")]
    active: String,
}

pub fn recurring_table(items: &[RecurringTransaction], fmt: &CurrencyFormatter) -> String {
    if items.is_empty() {
        return "No recurring transactions found.".to_string();
    }

    let rows = items
        .iter()
        .map(|r| RecurringRow {
            id: r.id.to_string(),
            name: truncate(&r.name, 24),
            kind: r.kind.to_string(),
            frequency: r.frequency.to_string(),
            start: r.start_date.to_string(),
            end: r.end_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            amount: fmt.format(r.amount),
            active: if r.is_active { "yes" } else { "no" }.to_string(),
        })
        .collect();
    render(rows, &[6])
}

#[derive(Tabled)]
struct SplitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Participants")]
    participants: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
}

pub fn split_table(splits: &[SplitExpense], fmt: &CurrencyFormatter) -> String {
    if splits.is_empty() {
        return "No split expenses found.".to_string();
    }

    let rows = splits
        .iter()
        .map(|s| SplitRow {
            id: s.id.to_string(),
            date: s.date.to_string(),
            description: truncate(&s.description, 24),
            participants: s
                .participants
                .iter()
                .map(|p| {
                    let mark = if p.settled { "✓" } else { "" };
                    format!("{} {}{}", p.name, fmt.format(p.amount), mark)
                })
                .collect::<Vec<_>>()
                .join(", "),
            total: fmt.format(s.total_amount),
            status: s.derive_status().to_string(),
        })
        .collect();
    render(rows, &[4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Month};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_empty_lists() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(expense_table(&[], &fmt), "No expenses found.");
        assert_eq!(goal_table(&[], &fmt), "No goals found.");
        assert_eq!(split_table(&[], &fmt), "No split expenses found.");
    }

    #[test]
    fn test_expense_table_contents() {
        let expense = Expense::new(Money::from_cents(123456), "Rent", date(1))
            .with_description("January rent");
        let table = expense_table(&[expense.clone()], &CurrencyFormatter::default());

        assert!(table.contains("Category"));
        assert!(table.contains("Rent"));
        assert!(table.contains("January rent"));
        assert!(table.contains("$1,234.56"));
        assert!(table.contains(&expense.id.to_string()));
    }

    #[test]
    fn test_budget_detail_lists_limits() {
        let mut budget = Budget::new(Month::new(2025, 1).unwrap(), Money::from_units(1000));
        budget.set_category("Food", Some(Money::from_units(300)));
        budget.set_category("Fun", None);

        let detail = budget_detail(&budget, &CurrencyFormatter::default());
        assert!(detail.contains("$700.00 unallocated"));
        assert!(detail.contains("$300.00"));
        assert!(detail.contains("Fun"));
    }

    #[test]
    fn test_split_table_marks_settled() {
        let names = vec!["Asha".to_string(), "Ben".to_string()];
        let mut split = SplitExpense::equal("Dinner", Money::from_units(50), date(2), &names);
        split.settle("Asha");

        let table = split_table(&[split], &CurrencyFormatter::default());
        assert!(table.contains("Asha $25.00✓"));
        assert!(table.contains("Partial"));
    }
}
