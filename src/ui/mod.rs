//! Console output for pipeline progress
//!
//! Progress lines go to stdout; diagnostics go through `tracing` to stderr.

use std::path::Path;

use console::Style;

/// `==> message`, printed when a pipeline step starts
pub fn step(message: &str) {
    println!(
        "{} {}",
        Style::new().bold().blue().apply_to("==>"),
        Style::new().bold().apply_to(message)
    );
}

/// Indented detail under the current step
pub fn detail(message: &str) {
    println!("    {message}");
}

pub fn success(message: &str, path: &Path) {
    println!(
        "{} {} {}",
        Style::new().bold().green().apply_to("✓"),
        message,
        Style::new().cyan().apply_to(path.display())
    );
}

/// Labelled value, used by the plan display
pub fn field(label: &str, value: &str) {
    println!("{} {}", Style::new().bold().apply_to(label), value);
}

pub fn dry_run_banner() {
    println!("{}", Style::new().bold().yellow().apply_to("[DRY RUN]"));
}
