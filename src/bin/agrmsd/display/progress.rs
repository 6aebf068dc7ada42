use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use antigen_rmsd::{BatchObserver, BatchSummary, display_name};

use super::Context;

/// The bar currently drawn on stderr, if any. Log output is written around it.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active(bar: Option<ProgressBar>) {
    if let Ok(mut slot) = ACTIVE_BAR.lock() {
        *slot = bar;
    }
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR.lock().ok().and_then(|slot| slot.clone())
}

/// Stderr writer for the log subscriber that suspends the active progress
/// bar while a line is written.
pub struct LogWriter;

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_bar() {
            Some(bar) => bar.suspend(|| io::stderr().write(buf)),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

pub struct SampleBar {
    bar: Option<ProgressBar>,
    start: Instant,
}

impl SampleBar {
    pub fn new() -> Self {
        Self {
            bar: None,
            start: Instant::now(),
        }
    }

    fn bar(&mut self, total: usize) -> &ProgressBar {
        self.bar.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} [{bar:28.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("━╸ ")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            set_active(Some(bar.clone()));
            bar
        })
    }

    fn finish(mut self, summary: &BatchSummary) {
        if let Some(bar) = self.bar.take() {
            set_active(None);
            bar.finish_and_clear();
        }

        print_footer(summary, self.start.elapsed());
    }
}

impl Default for SampleBar {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchObserver for SampleBar {
    fn sample_started(&mut self, _index: usize, total: usize, path: &Path) {
        let name = display_name(path);
        let bar = self.bar(total);
        bar.println(format!("  Processing {name} ..."));
        bar.set_message(name);
    }

    fn sample_finished(&mut self, _path: &Path, reported: usize) {
        if let Some(bar) = &self.bar {
            if reported > 0 {
                bar.println(format!(
                    "      \x1b[2m·\x1b[0m {reported} site(s) above threshold"
                ));
            }
            bar.inc(1);
        }
    }

    fn sample_skipped(&mut self, _error: &antigen_rmsd::ProcessingError) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }
}

fn print_footer(summary: &BatchSummary, elapsed: Duration) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(
        stderr,
        "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
    );
    let _ = writeln!(stderr);

    let mark = if summary.skipped.is_empty() {
        "\x1b[32m✓\x1b[0m"
    } else {
        "\x1b[33m!\x1b[0m"
    };
    let _ = writeln!(
        stderr,
        "  {mark} {:<36} {:>16}",
        format!(
            "{} measured, {} skipped",
            summary.processed,
            summary.skipped.len()
        ),
        format!("Total: {:.2}s", elapsed.as_secs_f64())
    );
    let _ = writeln!(stderr);
}

/// Plain one-line-per-sample progress for non-terminal stderr.
pub struct PlainProgress;

impl BatchObserver for PlainProgress {
    fn sample_started(&mut self, _index: usize, _total: usize, path: &Path) {
        let _ = writeln!(io::stderr().lock(), "Processing {} ...", display_name(path));
    }
}

pub enum Progress {
    Interactive(SampleBar),
    Plain(PlainProgress),
    Silent,
}

impl Progress {
    pub fn new(ctx: Context) -> Self {
        if ctx.interactive {
            Self::Interactive(SampleBar::new())
        } else if ctx.quiet {
            Self::Silent
        } else {
            Self::Plain(PlainProgress)
        }
    }

    pub fn finish(self, summary: &BatchSummary) {
        if let Self::Interactive(bar) = self {
            bar.finish(summary);
        }
    }
}

impl BatchObserver for Progress {
    fn sample_started(&mut self, index: usize, total: usize, path: &Path) {
        match self {
            Self::Interactive(p) => p.sample_started(index, total, path),
            Self::Plain(p) => p.sample_started(index, total, path),
            Self::Silent => {}
        }
    }

    fn sample_finished(&mut self, path: &Path, reported: usize) {
        if let Self::Interactive(p) = self {
            p.sample_finished(path, reported);
        }
    }

    fn sample_skipped(&mut self, error: &antigen_rmsd::ProcessingError) {
        if let Self::Interactive(p) = self {
            p.sample_skipped(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_receives_log_output_only_while_running() {
        let mut progress = SampleBar::new();
        assert!(active_bar().is_none());

        progress.sample_started(0, 2, Path::new("/models/a.pdb"));
        assert!(active_bar().is_some());
        assert_eq!(LogWriter.write(b"").unwrap(), 0);

        progress.sample_finished(Path::new("/models/a.pdb"), 0);
        progress.finish(&BatchSummary::default());
        assert!(active_bar().is_none());
        assert_eq!(LogWriter.write(b"").unwrap(), 0);
    }
}
