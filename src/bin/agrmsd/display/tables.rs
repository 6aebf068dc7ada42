use std::io::{self, Write};

use antigen_rmsd::{AntigenSite, BatchSummary, DeviationResult, display_name};

use crate::util::text::truncate_middle;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_run_summary(summary: &BatchSummary, threshold: f64) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Threshold (Å)", format!("{threshold:.3}")),
        ("Samples Measured", summary.processed.to_string()),
        ("Samples Skipped", summary.skipped.len().to_string()),
        ("Rows Reported", summary.results.len().to_string()),
    ];

    for err in &summary.skipped {
        rows.push(("Skipped", display_name(&err.file)));
    }

    print_kv_table(&mut out, "Batch Summary", &rows);
}

pub fn print_site_breakdown(results: &[DeviationResult]) {
    if results.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let site_w = 6usize;
    let count_w = 7usize;
    let max_w = 9usize;
    let sep_overhead = 9;
    let file_w = SAFE_TABLE_WIDTH.saturating_sub(site_w + count_w + max_w + sep_overhead);

    let line = |l: char, m: char, r: char| {
        format!(
            "{INDENT}{l}{}{m}{}{m}{}{m}{}{r}",
            "─".repeat(site_w + 2),
            "─".repeat(count_w + 2),
            "─".repeat(max_w + 2),
            "─".repeat(file_w + 2),
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ Antigenic Site Breakdown ─┐");
    let _ = writeln!(out, "{}", line('┌', '┬', '┐'));
    let _ = writeln!(
        out,
        "{INDENT}│ {:<site_w$} │ {:>count_w$} │ {:>max_w$} │ {:<file_w$} │",
        "Site", "Samples", "Max (Å)", "Worst Sample"
    );
    let _ = writeln!(out, "{}", line('├', '┼', '┤'));

    for site in AntigenSite::ALL {
        let hits: Vec<&DeviationResult> = results.iter().filter(|r| r.site == site).collect();
        let worst = hits
            .iter()
            .copied()
            .max_by(|a, b| a.value.total_cmp(&b.value));

        let (max, file) = match worst {
            Some(r) => (format!("{:.3}", r.value), truncate_middle(&r.source_file, file_w)),
            None => ("-".to_string(), String::new()),
        };

        let _ = writeln!(
            out,
            "{INDENT}│ {:<site_w$} │ {:>count_w$} │ {:>max_w$} │ {:<file_w$} │",
            site.label(),
            hits.len(),
            max,
            file
        );
    }

    let _ = writeln!(out, "{}", line('└', '┴', '┘'));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{INDENT}┌─ {} ─┐",
        truncate_middle(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{INDENT}┌{}┬{}┐",
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate_middle(key, key_w),
            truncate_middle(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{INDENT}└{}┴{}┘",
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}
