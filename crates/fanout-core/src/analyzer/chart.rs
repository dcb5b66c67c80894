//! Horizontal text bar chart for the terminal.

use std::fmt::Write;

/// Width of the longest bar, in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Render `rows` as a titled bar chart. Bars scale to the largest count;
/// any nonzero count gets at least one `#`.
pub fn render_bar_chart(title: &str, rows: &[(String, u64)], bar_width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    if rows.is_empty() {
        let _ = writeln!(out, "  (no words)");
        return out;
    }

    let label_width = rows.iter().map(|(w, _)| w.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    for (word, count) in rows {
        let len = ((*count as f64 / max as f64) * bar_width as f64).round() as usize;
        let len = if *count > 0 { len.max(1) } else { 0 };
        let _ = writeln!(
            out,
            "  {:<width$}  {} {}",
            word,
            "#".repeat(len),
            count,
            width = label_width
        );
    }
    out
}
