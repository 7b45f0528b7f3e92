//! Display formatting shared by the window and the exporters.

/// Format a dollar amount with thousands separators and two decimals:
/// `1234.5` → `"$1,234.50"`, `-20.0` → `"-$20.00"`.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// The running-total line shown under the holdings table.
pub fn total_label(total: f64) -> String {
    format!("Total Portfolio Value: {}", format_money(total))
}
