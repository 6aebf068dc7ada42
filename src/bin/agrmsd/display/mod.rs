mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::{LogWriter, Progress};
pub use tables::{print_run_summary, print_site_breakdown};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Stderr is a terminal and decorations are wanted.
    pub interactive: bool,
    /// Per-sample progress lines are suppressed.
    pub quiet: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
            quiet: false,
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self {
                interactive: false,
                quiet: true,
            }
        } else {
            self
        }
    }
}
