//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Amount with two decimals and the currency code, e.g. `225.00 EUR`.
pub fn money(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Odometer value with a thousands separator: `213519` → `213.519`.
pub fn odometer(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}
