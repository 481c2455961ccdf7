//! Terminal output for the oqs-template CLI, styled with [`console`].

use console::style;

/// Numbered progress lines (`[2/4] Comparing ...`) under a header.
pub struct Progress {
    step: u32,
    total: u32,
}

impl Progress {
    /// Print `title` as a bold cyan header and start counting at step 1.
    pub fn start(title: &str, total: u32) -> Self {
        println!("\n{}", style(title).bold().cyan());
        println!("{}", style("=".repeat(title.len())).dim());
        Self { step: 0, total }
    }

    pub fn step(&mut self, text: &str) {
        self.step += 1;
        println!(
            "{} {}",
            style(format!("[{}/{}]", self.step, self.total)).dim(),
            text
        );
    }
}

pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Errors go to stderr so generated output on stdout stays clean.
pub fn print_error(text: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Indented `key: value` detail line.
pub fn print_detail(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", style(key).dim(), value);
}
