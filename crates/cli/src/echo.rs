use std::fmt::Display;

use owo_colors::{OwoColorize, Style};

use crate::VERSION;

/// Banner shown at the top of verbose output
pub fn print_banner() {
    eprintln!("\n{} {} {}", "cipin".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Rank the most frequent words on a web page\n".dimmed());
}

/// `[step/total] message`
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Indented `label: value` line under a step
pub fn print_detail(label: &str, value: impl Display) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.to_string().bright_white());
}

pub fn print_success(message: &str) {
    print_marked('✓', Style::new().green(), Style::new().bright_green(), message);
}

pub fn print_info(message: &str) {
    print_marked('ℹ', Style::new().blue(), Style::new().bright_blue(), message);
}

pub fn print_warning(message: &str) {
    print_marked('⚠', Style::new().yellow(), Style::new().bright_yellow(), message);
}

/// Fetch and input failures; always shown, verbose or not
pub fn print_error(message: &str) {
    print_marked('✗', Style::new().red(), Style::new().bright_red(), message);
}

fn print_marked(mark: char, mark_style: Style, text_style: Style, message: &str) {
    eprintln!("{} {}", mark.style(mark_style), message.style(text_style));
}

/// Human-readable byte count for the input size detail
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
