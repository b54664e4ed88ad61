//! Console rendering of statements, entries, the person registry and the activity log.

use crate::core::models::{AppLog, ExpenseEntry, Person, SettlementStatement};
use chrono::Local;
use colored::*;

pub fn statement_line(statement: &SettlementStatement) -> String {
    format!(
        "{} {} {} {} {}",
        statement.payer.bold().cyan(),
        "should get".bold().yellow(),
        statement.rounded_amount().bold().green(),
        "from".bold().yellow(),
        statement.owed_by.to_string().bold().magenta()
    )
}

pub fn entry_line(entry: &ExpenseEntry) -> String {
    format!(
        "{} paid {} for {} people on {}",
        entry.payer.bold().cyan(),
        entry.amount.to_string().bold().green(),
        entry.participants.join(", ").yellow(),
        entry.timestamp.with_timezone(&Local).format("%a %b %d %Y").to_string().magenta()
    )
}

pub fn person_line(person: &Person) -> String {
    format!("{:>3}  {}", person.id, person.name.bold())
}

/// `<local time>  <ACTION>  key=value ...` with detail keys sorted.
pub fn log_line(log: &AppLog) -> String {
    let mut keys: Vec<&String> = log.details.keys().collect();
    keys.sort();
    let details: Vec<String> = keys
        .into_iter()
        .map(|key| match &log.details[key] {
            serde_json::Value::String(text) => format!("{}={}", key, text),
            other => format!("{}={}", key, other),
        })
        .collect();
    format!(
        "{}  {}  {}",
        log.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        log.action.bold().blue(),
        details.join(" ")
    )
}

pub fn print_statements(statements: &[SettlementStatement]) {
    println!("\n");
    if statements.is_empty() {
        println!("{}", "No entries to settle".dimmed());
    }
    for statement in statements {
        println!("{}", statement_line(statement));
    }
    println!("\n");
}

pub fn print_entries(entries: &[ExpenseEntry]) {
    println!("\n");
    if entries.is_empty() {
        println!("{}", "No entries".dimmed());
    }
    for entry in entries {
        println!("{}", entry_line(entry));
    }
    println!("\n");
}

pub fn print_people(people: &[Person]) {
    if people.is_empty() {
        println!("{}", "No people registered".dimmed());
    }
    for person in people {
        println!("{}", person_line(person));
    }
}

pub fn print_logs(logs: &[AppLog]) {
    if logs.is_empty() {
        println!("{}", "No activity recorded".dimmed());
    }
    for log in logs {
        println!("{}", log_line(log));
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bold().red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
