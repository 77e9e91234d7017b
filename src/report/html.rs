use std::fmt::Write;
use std::path::Path;

use anyhow::Result;

use super::{percent, ReportData};
use crate::models::currency::format_amount;

const STYLE: &str = "\
body { font-family: system-ui, -apple-system, sans-serif; padding: 20px; max-width: 800px; margin: 0 auto; color: #1f2937; }
h1 { margin-bottom: 0; }
.muted { color: #6b7280; }
.overview { display: flex; gap: 12px; margin: 16px 0; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px; flex: 1; }
.category { border-left: 4px solid #6b7280; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 6px; text-align: left; }
th { background-color: #f8fafc; }";

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only `#rgb` / `#rrggbb` colors reach the stylesheet.
fn safe_color(color: &str) -> &str {
    let hex = color.strip_prefix('#').unwrap_or("");
    if matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        color
    } else {
        "#6b7280"
    }
}

/// Render a standalone HTML document for the month.
pub(crate) fn render(data: &ReportData) -> String {
    let money = |v| escape(&format_amount(v, &data.currency));
    let mut html = String::new();

    // Writing to a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>HisabKitab Report - {label}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <h1>HisabKitab Financial Report</h1>\n\
         <p class=\"muted\">{label} &middot; generated {generated}</p>\n",
        label = escape(&data.month.label()),
        generated = data.generated_on.format("%Y-%m-%d"),
    );

    let _ = write!(
        html,
        "<h2>Overview</h2>\n<div class=\"overview\">\n\
         <div class=\"card\"><div class=\"muted\">Total Budget</div><strong>{}</strong></div>\n\
         <div class=\"card\"><div class=\"muted\">Spent</div><strong>{}</strong></div>\n\
         <div class=\"card\"><div class=\"muted\">Remaining</div><strong>{}</strong></div>\n\
         <div class=\"card\"><div class=\"muted\">Used</div><strong>{:.1}%</strong></div>\n\
         </div>\n",
        money(data.total_budget),
        money(data.total_spent),
        money(data.remaining),
        data.utilisation(),
    );

    html.push_str("<h2>Categories</h2>\n");
    for cat in &data.categories {
        let _ = write!(
            html,
            "<div class=\"card category\" style=\"border-left-color: {color}\">\n\
             <h3>{name}</h3>\n\
             <p>Budget {budget} &middot; Spent {spent} &middot; {share:.1}% of total budget</p>\n",
            color = safe_color(&cat.color),
            name = escape(&cat.name),
            budget = money(cat.budget),
            spent = money(cat.spent),
            share = percent(cat.spent, data.total_budget),
        );
        if cat.transactions.is_empty() {
            html.push_str("<p class=\"muted\">No transactions</p>\n");
        } else {
            html.push_str("<table>\n<tr><th>Date</th><th>Description</th><th>Amount</th></tr>\n");
            for txn in &cat.transactions {
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    txn.date.format("%Y-%m-%d %H:%M"),
                    escape(&txn.description),
                    money(txn.amount),
                );
            }
            html.push_str("</table>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub(crate) fn write(data: &ReportData, path: &Path) -> Result<()> {
    super::write_atomic(path, render(data).as_bytes())?;
    tracing::info!(month = %data.month, path = %path.display(), "wrote html report");
    Ok(())
}
