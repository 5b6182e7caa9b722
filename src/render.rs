use crate::types::{LogCategory, LogEntry, ScanProblem, SearchMatch, TypeFilter};
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, Table};
use std::io::{self, Write};

pub const BIN_NAME: &str = "ttylog";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn rule() -> String {
    "-".repeat(90)
}

/// Shortest round-trip form with at least one decimal: `0.0`, `1.5`, `0.01`.
fn float_repr(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

fn size_label(entry: &LogEntry) -> String {
    format!("{}MB", float_repr(entry.size_mb))
}

fn category_color(category: LogCategory) -> Color {
    match category {
        LogCategory::Raw => Color::Yellow,
        LogCategory::Clean => Color::Green,
    }
}

pub fn print_problems(problems: &[ScanProblem], out: &mut dyn Write) -> io::Result<()> {
    for problem in problems {
        match problem {
            ScanProblem::MissingRoot(_) => writeln!(out, "{}", problem.to_string().yellow())?,
            ScanProblem::Unreadable { .. } => writeln!(out, "{}", problem.to_string().red())?,
        }
    }
    Ok(())
}

/// `--list` output: one table row per entry plus a totals footer.
pub fn print_catalog_table(
    entries: &[LogEntry],
    filter: TypeFilter,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{}", format!("Terminal Session Logs ({filter}):").cyan())?;

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["File", "Type", "Size", "Modified"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.category).fg(category_color(entry.category)),
            Cell::new(size_label(entry)),
            Cell::new(entry.modified.format(TIMESTAMP_FORMAT)),
        ]);
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    table.add_row(vec![
        Cell::new(format!("{} files", entries.len())).add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(human_bytes::human_bytes(total as f64)).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    writeln!(out, "{table}")
}

/// Default mode: summary of the first `recent` entries followed by usage hints.
pub fn print_recent(
    entries: &[LogEntry],
    recent: usize,
    filter: TypeFilter,
    out: &mut dyn Write,
) -> io::Result<()> {
    let Some(first) = entries.first() else {
        return Ok(());
    };

    let shown = recent.min(entries.len());
    writeln!(
        out,
        "{}",
        format!("Recent {shown} terminal sessions ({filter}):").cyan()
    )?;
    writeln!(out, "{}", rule())?;
    for entry in entries.iter().take(recent) {
        writeln!(
            out,
            "{} ({}) - {} - {}",
            entry.name,
            entry.category,
            size_label(entry),
            entry.modified.format(TIMESTAMP_FORMAT)
        )?;
    }

    let hints = [
        ("To view a log file:", format!("--show {}", first.name)),
        ("To search logs:", "--search 'git commit'".to_string()),
        ("To view only clean logs:", "--type clean".to_string()),
        ("To view only raw logs:", "--type raw".to_string()),
    ];
    for (title, args) in hints {
        writeln!(out, "\n{}", title.green())?;
        writeln!(out, "  {BIN_NAME} {args}")?;
    }
    Ok(())
}

pub fn print_matches(
    matches: &[SearchMatch],
    query: &str,
    filter: TypeFilter,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(
        out,
        "{}",
        format!("Found {} matches for '{query}' ({filter}):", matches.len()).cyan()
    )?;
    writeln!(out, "{}", rule())?;
    for m in matches {
        writeln!(out, "{}", format_match(m))?;
    }
    Ok(())
}

#[must_use]
pub fn format_match(m: &SearchMatch) -> String {
    format!("{} ({}):{} - {}", m.file, m.category, m.line, m.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn entry(name: &str, size: u64, category: LogCategory) -> LogEntry {
        let modified = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        LogEntry::new(name.to_string(), PathBuf::from(name), size, modified, category)
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_match() {
        let m = SearchMatch {
            file: "2024-01-01.log".to_string(),
            line: 2,
            content: "git commit abc".to_string(),
            category: LogCategory::Raw,
        };
        assert_eq!(format_match(&m), "2024-01-01.log (raw):2 - git commit abc");
    }

    #[test]
    fn test_float_repr() {
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(1.5), "1.5");
        assert_eq!(float_repr(0.01), "0.01");
        assert_eq!(float_repr(12.0), "12.0");
        assert_eq!(float_repr(1024.25), "1024.25");
    }

    #[test]
    fn test_recent_summary_and_hints() {
        let entries = vec![
            entry("b.log", 1_572_864, LogCategory::Raw),
            entry("a.log", 0, LogCategory::Clean),
            entry("c.log", 0, LogCategory::Clean),
        ];
        let text = render(|out| print_recent(&entries, 2, TypeFilter::All, out));

        assert!(text.starts_with("Recent 2 terminal sessions (all):\n"));
        assert!(text.contains("b.log (raw) - 1.5MB - 2024-01-02 03:04:05\n"));
        assert!(text.contains("a.log (clean) - 0.0MB - 2024-01-02 03:04:05\n"));
        assert!(!text.contains("c.log"));
        assert!(text.contains("To view a log file:\n  ttylog --show b.log\n"));
        assert!(text.contains("To search logs:\n  ttylog --search 'git commit'\n"));
        assert!(text.contains("To view only clean logs:\n  ttylog --type clean\n"));
        assert!(text.contains("To view only raw logs:\n  ttylog --type raw\n"));
    }

    #[test]
    fn test_recent_count_clamped() {
        let entries = vec![entry("a.log", 0, LogCategory::Raw)];
        let text = render(|out| print_recent(&entries, 5, TypeFilter::Raw, out));
        assert!(text.starts_with("Recent 1 terminal sessions (raw):"));
    }

    #[test]
    fn test_catalog_table_rows() {
        let entries = vec![
            entry("2024-01-01.log", 10_486, LogCategory::Raw),
            entry("2024-01-02.log", 0, LogCategory::Clean),
        ];
        let text = render(|out| print_catalog_table(&entries, TypeFilter::All, out));

        assert!(text.starts_with("Terminal Session Logs (all):"));
        assert!(text.contains("2024-01-01.log"));
        assert!(text.contains("0.01MB"));
        assert!(text.contains("2024-01-02 03:04:05"));
        assert!(text.contains("2 files"));
    }

    #[test]
    fn test_matches_header() {
        let matches = vec![SearchMatch {
            file: "x.log".to_string(),
            line: 7,
            content: "boom".to_string(),
            category: LogCategory::Clean,
        }];
        let text = render(|out| print_matches(&matches, "BOOM", TypeFilter::Clean, out));
        assert!(text.starts_with("Found 1 matches for 'BOOM' (clean):\n"));
        assert!(text.ends_with("x.log (clean):7 - boom\n"));
    }

    #[test]
    fn test_problems_printed_in_order() {
        let problems = vec![
            ScanProblem::MissingRoot(PathBuf::from("/a")),
            ScanProblem::Unreadable {
                path: PathBuf::from("/b.log"),
                message: "denied".to_string(),
            },
        ];
        let text = render(|out| print_problems(&problems, out));
        assert_eq!(
            text,
            "Log directory /a does not exist\nError reading /b.log: denied\n"
        );
    }
}
