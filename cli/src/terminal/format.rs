use std::collections::BTreeMap;

use colored::*;
use crprobe_core::StatusCode;

use crate::terminal::colors;

pub fn status(status: StatusCode) -> ColoredString {
    let code = status.as_u16().to_string();
    match status.as_u16() {
        200..=299 => code.color(colors::STATUS_OK),
        429 => code.color(colors::STATUS_THROTTLED).bold(),
        400..=499 => code.color(colors::STATUS_CLIENT_ERR),
        500..=599 => code.color(colors::STATUS_SERVER_ERR),
        _ => code.normal(),
    }
}

/// `[200, 200, 429]`, each code colored.
pub fn status_list(statuses: &[StatusCode]) -> String {
    let joined = statuses
        .iter()
        .map(|s| status(*s).to_string())
        .collect::<Vec<String>>()
        .join(", ");
    format!("[{joined}]")
}

pub fn histogram_to_detail(counts: &BTreeMap<u16, usize>) -> Vec<(String, ColoredString)> {
    counts
        .iter()
        .map(|(code, count)| {
            let key = format!("HTTP {code}");
            let value = match StatusCode::from_u16(*code) {
                Ok(sc) => format!("{count} x {}", status(sc)).normal(),
                Err(_) => format!("{count}").normal(),
            };
            (key, value)
        })
        .collect()
}
