//! CLI presentation for generated search strings.
//!
//! Colored section headers, advisory lines and metrics tables. Everything
//! here writes to stdout; logging goes to stderr through `tracing`.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, Table};
use owo_colors::OwoColorize;

use crate::models::{Advisory, QueryResult};
use crate::utils::{collapse_query, format_number, terminal_width};

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
        Status::Search => "🔎",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
    Search,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => println!("{} {}", icon.red().bold(), msg),
        Status::Warning => println!("{} {}", icon.yellow().bold(), msg.yellow()),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
        Status::Search => println!("{} {}", icon.yellow(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

/// Print each advisory as a warning line
pub fn print_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        print_status(Status::Warning, &advisory.to_string());
    }
}

/// Metrics of a result as a table.
///
/// `labels` names the two input lists; the per-list rows are omitted for
/// unions, which have no list sizes of their own.
pub fn metrics_table(result: &QueryResult, labels: (&str, &str)) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_width(terminal_width().min(60) as u16);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let mut rows: Vec<(String, usize)> = Vec::new();
    if let Some(counts) = result.term_counts {
        rows.push((labels.0.to_string(), counts.first));
        rows.push((labels.1.to_string(), counts.second));
    }
    rows.push(("Total pairs".to_string(), result.pair_count));
    rows.push(("Characters typed".to_string(), result.typed_char_count));
    rows.push((
        "Characters generated".to_string(),
        result.generated_char_count(),
    ));
    rows.push(("Search string length".to_string(), result.length));
    if let Some(wildcards) = result.wildcard_count {
        rows.push(("Wildcards (*)".to_string(), wildcards));
    }

    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_number(value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print one generated string with its metrics, advisories and URL.
///
/// Strings at least `collapse_threshold` characters long are shown collapsed
/// unless `full` is set.
pub fn print_result(
    title: &str,
    result: &QueryResult,
    labels: (&str, &str),
    url: &str,
    collapse_threshold: usize,
    full: bool,
) {
    print_section(title);

    let shown = if full {
        result.query.clone()
    } else {
        collapse_query(&result.query, collapse_threshold)
    };
    println!(
        "{} (length: {} characters)",
        "Search string".bold(),
        format_number(result.length)
    );
    println!("{}", shown);
    println!();
    println!("{}", metrics_table(result, labels));
    print_advisories(&result.advisories);
    println!("{} {}", "Search PubMed:".bold(), url.blue().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_intersection;
    use crate::models::{IntersectionField, TermList};

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Warning), "⚠");
        assert_eq!(status_icon(Status::Search), "🔎");
    }

    #[test]
    fn test_metrics_table_rows() {
        let result = compose_intersection(
            &TermList::new(["frailty"]),
            &TermList::new(["assess*", "diagnos*"]),
            IntersectionField::TextWord,
        );
        let rendered = metrics_table(&result, ("Topic 1 terms", "Topic 2 terms")).to_string();
        assert!(rendered.contains("Topic 1 terms"));
        assert!(rendered.contains("Total pairs"));
        assert!(rendered.contains("Wildcards (*)"));
    }

    #[test]
    fn test_metrics_table_union_has_no_list_rows() {
        let mut result = compose_intersection(
            &TermList::new(["a"]),
            &TermList::new(["b"]),
            IntersectionField::Title,
        );
        result.term_counts = None;
        let rendered = metrics_table(&result, ("Topic 1 terms", "Topic 2 terms")).to_string();
        assert!(!rendered.contains("Topic 1 terms"));
        assert!(rendered.contains("Characters generated"));
    }
}
