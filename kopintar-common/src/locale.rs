//! Indonesian (id-ID) number formatting

/// Group an integer with `.` thousands separators: `72000` -> `72.000`
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format a decimal the way `toLocaleString('id-ID')` does: grouped integer
/// part, `,` as decimal separator, at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let scaled = (value.abs() * 1000.0).round() as i64;
    let (whole, frac) = (scaled / 1000, scaled % 1000);
    let sign = if value < 0.0 && scaled != 0 { "-" } else { "" };
    let mut out = format!("{}{}", sign, format_thousands(whole));
    if frac != 0 {
        let frac = format!("{:03}", frac);
        out.push(',');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// `Rp 72.000`
pub fn format_rupiah(value: f64) -> String {
    format!("Rp {}", format_number(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(72000), "72.000");
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-4500), "-4.500");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(format_number(12.5), "12,5");
        assert_eq!(format_number(1500.25), "1.500,25");
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(0.1234), "0,123");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(72000.0), "Rp 72.000");
    }
}
