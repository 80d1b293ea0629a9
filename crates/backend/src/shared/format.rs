/// Formats a count with comma thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Headline tile amount: `"$ "` followed by the value rounded to cents.
///
/// ```
/// use backend::shared::format::format_currency;
/// assert_eq!(format_currency(4217.076), "$ 4217.08");
/// assert_eq!(format_currency(-12.5), "$ -12.50");
/// ```
pub fn format_currency(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // avoid "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("$ {:.2}", rounded)
}
