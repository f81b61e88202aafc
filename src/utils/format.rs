//! Number formatting shared by reports and tables.

/// Format a float the way C's `%g` does: `significant` significant digits,
/// trailing zeros removed, scientific notation for very small or large
/// magnitudes.
///
/// # Examples
///
/// ```
/// use contam_bench::utils::format::format_g;
///
/// assert_eq!(format_g(0.8, 3), "0.8");
/// assert_eq!(format_g(8.0 / 13.0, 3), "0.615");
/// assert_eq!(format_g(1_000_000.0, 6), "1e+06");
/// assert_eq!(format_g(-5.0, 6), "-5");
/// ```
#[must_use]
pub fn format_g(value: f64, significant: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = significant.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let max_exponent = i32::try_from(precision).unwrap_or(i32::MAX);

    if exponent < -4 || exponent >= max_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_g_fixed() {
        assert_eq!(format_g(1.0, 3), "1");
        assert_eq!(format_g(0.123_456, 3), "0.123");
        assert_eq!(format_g(12_345.0, 6), "12345");
        assert_eq!(format_g(9.999, 3), "10");
        assert_eq!(format_g(0.000_1, 6), "0.0001");
    }

    #[test]
    fn test_format_g_scientific() {
        assert_eq!(format_g(0.000_012_5, 3), "1.25e-05");
        assert_eq!(format_g(1234.0, 3), "1.23e+03");
        assert_eq!(format_g(-2.5e10, 6), "-2.5e+10");
    }

    #[test]
    fn test_format_g_special() {
        assert_eq!(format_g(f64::NAN, 3), "nan");
        assert_eq!(format_g(f64::INFINITY, 3), "inf");
        assert_eq!(format_g(0.0, 3), "0");
    }
}
