use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use crate::config::Config;
use crate::models::currency::format_amount;
use crate::models::{MonthKey, Transaction};
use crate::report::{self, percent, ReportData};
use crate::state::{read_known_months, AppState};
use crate::storage::KeyValueStore;
use crate::ui::util::{default_description, output_path, parse_budget, split_spend_args};

pub(crate) fn as_cli(args: &[String], store: &dyn KeyValueStore, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args[1..], store, config, &mut out)
}

fn run_command(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];
    match command.as_str() {
        "summary" | "s" => cli_summary(rest, store, config, out),
        "months" => cli_months(store, config, out),
        "budget" => cli_budget(rest, store, config, out),
        "spend" => cli_spend(rest, store, config, out),
        "report" => cli_report(rest, store, config, out),
        "export" => cli_export(rest, store, config, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "hisabkitab {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    let usage = "\
HisabKitab: monthly budget tracker

Usage: hisabkitab [command]

Commands:
  (none)                                  Launch interactive TUI
  summary [YYYY-MM]                       Print budget, spent and per-category totals
  months                                  List recorded months with their totals
  budget <amount>                         Set the total budget
  spend <category> <amount> [description] Record a transaction now
  report [path]                           Write an HTML report
  export [path]                           Write transactions as CSV
    --month <YYYY-MM>                     Month to act on (default: current)
  --help, -h                              Show this help
  --version, -V                           Show version";
    writeln!(out, "{usage}")?;
    Ok(())
}

/// Pull `--month <YYYY-MM>` out of `args`, returning it and the remaining
/// positional arguments.
fn split_month_flag(args: &[String]) -> Result<(Option<MonthKey>, Vec<&str>)> {
    let mut month = None;
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--month" {
            let value = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("--month needs a value (YYYY-MM)"))?;
            month = Some(MonthKey::parse(value)?);
        } else {
            positional.push(arg.as_str());
        }
    }
    Ok((month, positional))
}

fn cli_summary(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let (flag, positional) = split_month_flag(args)?;
    let month = match (flag, positional.first()) {
        (Some(month), _) => month,
        (None, Some(arg)) => MonthKey::parse(arg)?,
        (None, None) => MonthKey::current(),
    };

    let state = AppState::load(store, config, month);
    let budget = &state.budget;
    let symbol = budget.currency_symbol();

    writeln!(out, "HisabKitab: {}", budget.month().label())?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Budget:     {}", format_amount(budget.total_budget(), symbol))?;
    writeln!(out, "  Spent:      {}", format_amount(budget.total_spent(), symbol))?;
    writeln!(out, "  Remaining:  {}", format_amount(budget.remaining(), symbol))?;
    writeln!(
        out,
        "  Used:       {:.0}%",
        percent(budget.total_spent(), budget.total_budget())
    )?;
    writeln!(out, "  Total Txns: {}", budget.recent_transactions().len())?;

    writeln!(out)?;
    writeln!(out, "Categories:")?;
    for category in budget.categories() {
        writeln!(
            out,
            "  {:<20} {:>16} / {}",
            category.name,
            format_amount(category.spent, symbol),
            format_amount(category.budget, symbol)
        )?;
    }
    Ok(())
}

fn cli_months(store: &dyn KeyValueStore, config: &Config, out: &mut dyn Write) -> Result<()> {
    let state = AppState::load(store, config, MonthKey::current());
    let symbol = state.budget.currency_symbol();
    // The active month is listed only once it has been written
    let stored = read_known_months(store).context("Failed to read recorded months")?;
    let totals: Vec<_> = state
        .budget
        .month_totals(store)
        .into_iter()
        .filter(|t| stored.contains(&t.month))
        .collect();

    if totals.is_empty() {
        writeln!(out, "No months recorded")?;
        return Ok(());
    }

    writeln!(out, "{:<10} {:>16} {:>16}", "Month", "Budget", "Spent")?;
    writeln!(out, "{}", "─".repeat(44))?;
    for total in &totals {
        writeln!(
            out,
            "{:<10} {:>16} {:>16}",
            total.month.as_str(),
            format_amount(total.budget, symbol),
            format_amount(total.spent, symbol)
        )?;
    }
    Ok(())
}

fn cli_budget(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let (month, positional) = split_month_flag(args)?;
    let Some(input) = positional.first() else {
        anyhow::bail!("Usage: hisabkitab budget <amount> [--month YYYY-MM]");
    };
    let amount = parse_budget(input).map_err(anyhow::Error::msg)?;

    let mut state = AppState::load(store, config, month.unwrap_or_else(MonthKey::current));
    state.budget.set_total_budget(amount);
    state.shutdown(store);

    writeln!(
        out,
        "Total budget for {} set to {}",
        state.budget.month().label(),
        format_amount(amount, state.budget.currency_symbol())
    )?;
    Ok(())
}

fn cli_spend(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let (month, positional) = split_month_flag(args)?;
    let Some((name, amount, description)) = split_spend_args(&positional.join(" ")) else {
        anyhow::bail!(
            "Usage: hisabkitab spend <category> <amount> [description] [--month YYYY-MM]"
        );
    };

    let mut state = AppState::load(store, config, month.unwrap_or_else(MonthKey::current));
    let (id, cat_name) = state
        .budget
        .find_category(&name)
        .map(|c| (c.id, c.name.clone()))
        .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?;
    let description = if description.is_empty() {
        default_description(&cat_name)
    } else {
        description
    };

    state
        .budget
        .add_transaction(id, Transaction::now(description.clone(), amount));
    state.shutdown(store);

    writeln!(
        out,
        "Added {} to {cat_name}: {description}",
        format_amount(amount, state.budget.currency_symbol())
    )?;
    Ok(())
}

fn cli_report(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let (month, positional) = split_month_flag(args)?;
    let state = AppState::load(store, config, month.unwrap_or_else(MonthKey::current));
    let data = ReportData::from_state(&state.budget);
    let path = output_path(
        positional.first().copied().unwrap_or(""),
        &data.default_file_name("html"),
    );

    report::html::write(&data, Path::new(&path))
        .inspect_err(|e| tracing::warn!(error = %format!("{e:#}"), "report failed"))
        .context(report::FAILURE_MESSAGE)?;
    writeln!(out, "Report saved to {path}")?;
    Ok(())
}

fn cli_export(
    args: &[String],
    store: &dyn KeyValueStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<()> {
    let (month, positional) = split_month_flag(args)?;
    let state = AppState::load(store, config, month.unwrap_or_else(MonthKey::current));
    let data = ReportData::from_state(&state.budget);
    let path = output_path(
        positional.first().copied().unwrap_or(""),
        &data.default_file_name("csv"),
    );

    let count = report::csv::write(&data, Path::new(&path))
        .inspect_err(|e| tracing::warn!(error = %format!("{e:#}"), "csv export failed"))
        .context(report::FAILURE_MESSAGE)?;
    if count == 0 {
        writeln!(out, "No transactions for {}", data.month)?;
    } else {
        writeln!(out, "Exported {count} transactions to {path}")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
