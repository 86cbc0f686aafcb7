use crate::terminal::colors;
use colored::*;
use rdpctl_common::log::PRINT_TARGET;
use rdpctl_common::session::Stream;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! rprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

/// `title` centered on a rule of `fill`, `TOTAL_WIDTH` columns wide.
fn framed(title: ColoredString, fill: &str) -> String {
    let width = console::measure_text_width(&title.to_string());
    let free = TOTAL_WIDTH.saturating_sub(width);
    let left = fill.repeat(free / 2).color(colors::SEPARATOR);
    let right = fill.repeat(free - free / 2).color(colors::SEPARATOR);
    format!("{left}{title}{right}")
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title = format!("⟦ RDPCTL v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&framed(title.color(colors::PRIMARY).bold(), "═"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&framed(title.color(colors::PRIMARY), "─"));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

pub fn centerln(msg: &str) {
    let pad = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

/// `> key.....: value` rows with the colons lined up.
pub fn aligned_lines(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (key, value) in rows {
        let dots = ".".repeat(width + 1 - key.width());
        print(&format!(
            "{} {}{}{} {}",
            ">".color(colors::SEPARATOR),
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// One titled entry with its details as branches.
pub fn tree(idx: usize, name: &str, details: &[(String, ColoredString)]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let width = details.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        let dots = ".".repeat(width - key.width());
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// A line emitted by a capability call, tagged with the call it came from.
pub fn relay_line(source: &str, stream: Stream, line: &str) {
    let line: ColoredString = match stream {
        Stream::Stdout => line.normal(),
        Stream::Stderr => line.color(colors::STDERR),
    };
    print(&format!(
        "  {} {} {line}",
        source.color(colors::HOST),
        "│".color(colors::SEPARATOR)
    ));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
