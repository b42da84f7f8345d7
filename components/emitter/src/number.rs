//! Numeric literal formatting

/// Print a concise form of a numeric literal.
///
/// Integer-valued numbers print without a decimal point; everything else goes
/// through ryu's shortest round-trip formatting, which JavaScript accepts
/// verbatim (`0.5`, `1.5e-7`, `1e300`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e21 {
        return format!("{:.0}", value);
    }
    ryu::Buffer::new().format(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_point() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(4.25), "4.25");
    }

    #[test]
    fn test_round_trip() {
        for value in [3.141592653589793, 1e-7, 123456.789] {
            let printed = format_number(value);
            assert_eq!(printed.parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }
}
