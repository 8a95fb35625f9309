//! Display policy for numbers in reports.
//!
//! * missing, NaN or infinite → `N/A`
//! * exactly zero → `0`
//! * `|v| >= 1,000,000` or `|v| < 0.0001` → scientific, up to 4 mantissa decimals (`1.2346E6`)
//! * otherwise fixed, thousands-grouped, up to 6 decimals (`1,234.5`)

const SCIENTIFIC_UPPER: f64 = 1_000_000.0;
const SCIENTIFIC_LOWER: f64 = 0.0001;

pub fn format_value(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    if v == 0.0 {
        return "0".to_string();
    }
    let magnitude = v.abs();
    if !(SCIENTIFIC_LOWER..SCIENTIFIC_UPPER).contains(&magnitude) {
        format_scientific(v)
    } else {
        format_fixed(v)
    }
}

/// `#,##0.######`: grouped integer part, at most six decimals, no trailing zeros.
pub fn format_fixed(value: f64) -> String {
    let rendered = format!("{:.6}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `0.####E0`: one integer digit, at most four decimals, bare exponent.
pub fn format_scientific(value: f64) -> String {
    let rendered = format!("{value:.4e}");
    let (mantissa, exponent) = rendered.split_once('e').unwrap_or((rendered.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    format!("{mantissa}E{exponent}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_available() {
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(f64::NAN)), "N/A");
        assert_eq!(format_value(Some(f64::NEG_INFINITY)), "N/A");
    }

    #[test]
    fn zero() {
        assert_eq!(format_value(Some(0.0)), "0");
        assert_eq!(format_value(Some(-0.0)), "0");
    }

    #[test]
    fn fixed_notation() {
        assert_eq!(format_value(Some(1234.5)), "1,234.5");
        assert_eq!(format_value(Some(-987654.321)), "-987,654.321");
        assert_eq!(format_value(Some(42.0)), "42");
        assert_eq!(format_value(Some(0.1234567)), "0.123457");
        assert_eq!(format_value(Some(0.0001)), "0.0001");
        assert_eq!(format_value(Some(999_999.0)), "999,999");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(format_value(Some(1_000_000.0)), "1E6");
        assert_eq!(format_value(Some(1_234_567.0)), "1.2346E6");
        assert_eq!(format_value(Some(-2.5e9)), "-2.5E9");
        assert_eq!(format_value(Some(0.00001)), "1E-5");
        assert_eq!(format_value(Some(0.000012345)), "1.2345E-5");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
