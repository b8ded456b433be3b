//! Styled terminal lines.
//!
//! Every line is emitted as a `crprobe::print` event rather than written to
//! stdout directly, so it stays ordered with log output and lands above the
//! spinner.

use std::fmt::Display;

use colored::*;
use crprobe_common::PRINT_TARGET;
use crprobe_common::config::Config;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{banner, colors};

pub const WIDTH: usize = 64;
const KEY_WIDTH: usize = 12;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    tracing::info!(target: PRINT_TARGET, raw_msg = msg);
}

/// `title` centered in a `fill` rule spanning [`WIDTH`] columns.
fn titled_rule(title: &str, fill: &str) -> String {
    let pad = WIDTH.saturating_sub(title.width());
    let left = pad / 2;
    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        title.bright_blue().bold(),
        fill.repeat(pad - left).color(colors::SEPARATOR)
    )
}

pub fn banner(cfg: &Config) {
    if cfg.no_banner || !cfg.show_headers() {
        return;
    }
    print(&titled_rule(
        &format!("⟦ CRPROBE v{} ⟧", env!("CARGO_PKG_VERSION")),
        "═",
    ));
    banner::print();
}

pub fn header(title: &str, cfg: &Config) {
    if cfg.show_headers() {
        print(&titled_rule(&format!("⟦ {} ⟧", title.to_uppercase()), "─"));
    }
}

pub fn rule() {
    print(&"═".repeat(WIDTH).color(colors::SEPARATOR).to_string());
}

/// `key.......: value`, keys padded to a shared column.
pub fn aligned_line(key: &str, value: impl Display) {
    let dots = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.width()));
    bullet(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn bullet(msg: impl AsRef<str>) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg.as_ref()));
}

pub fn tree_title(name: &str) {
    print(&format!(
        "{} {}",
        "[*]".color(colors::ACCENT),
        name.color(colors::PRIMARY).bold()
    ));
}

pub fn tree(rows: &[(String, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0);

    for (i, (key, value)) in rows.iter().enumerate() {
        let branch = if i + 1 == rows.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(width + 1 - key.width()).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centered(msg: &str) {
    let pad = WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{}", " ".repeat(pad), msg));
}

pub fn end_of_program(cfg: &Config) {
    if cfg.show_headers() {
        rule();
    }
}
