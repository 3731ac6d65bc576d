//! CLI command handlers. One file per execution path.

mod check;
mod completions;
mod urls;

pub use check::run_check;
pub use completions::run_completions;
pub use urls::run_urls;
