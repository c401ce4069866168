//! Number formatting shared by the templates and the page runtime.

/// Format a count with en-US thousands separators (`1234567` -> `1,234,567`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a raw numeric string, returning the trimmed input unchanged when it
/// is not a non-negative integer.
pub fn format_count_str(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u64>() {
        Ok(n) => format_count(n),
        Err(_) => trimmed.to_string(),
    }
}

/// Short display form with `K`/`M` suffixes: one decimal, trailing `.0`
/// dropped (`1500` -> `1.5K`, `2_000_000` -> `2M`).
pub fn format_short(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{}M", one_decimal(n as f64 / 1_000_000.0))
    } else if n >= 1_000 {
        format!("{}K", one_decimal(n as f64 / 1_000.0))
    } else {
        n.to_string()
    }
}

fn one_decimal(value: f64) -> String {
    let s = format!("{value:.1}");
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}
