#[cfg(test)]
mod tests {
    use market_scraper::normalize::{
        parse_magnitude_suffixed, parse_strict_numeric, to_float, to_int, try_float,
        try_magnitude_suffixed, try_strict_numeric, NormalizeError, Number,
    };

    #[test]
    fn test_digit_strings_agree_across_int_parsers() {
        for text in ["0", "5", "42", "007", "1234567", "9223372036854775807"] {
            let expected: i64 = text.parse().unwrap();
            assert_eq!(to_int(text), expected, "to_int({:?})", text);
            assert_eq!(parse_strict_numeric(text), Number::Int(expected), "strict({:?})", text);
        }
    }

    #[test]
    fn test_magnitude_suffixes_scale_to_base_units() {
        assert_eq!(parse_magnitude_suffixed("1.2M"), 1_200_000);
        assert_eq!(parse_magnitude_suffixed("1.23M"), 1_230_000);
        assert_eq!(parse_magnitude_suffixed("2M"), 2_000_000);
        assert_eq!(parse_magnitude_suffixed("1.5B"), 1_500_000_000);
        assert_eq!(parse_magnitude_suffixed("3B"), 3_000_000_000);
        assert_eq!(parse_magnitude_suffixed("2.95T"), 2_950_000_000_000);
        assert_eq!(parse_magnitude_suffixed("214.5K"), 214_500);
    }

    #[test]
    fn test_to_float_strips_currency_and_grouping() {
        assert_eq!(to_float("$1,234.56"), 1234.56);
        assert_eq!(to_float("not a number"), 0.0);
    }

    #[test]
    fn test_strict_numeric_shapes() {
        assert_eq!(parse_strict_numeric(""), Number::Int(0));
        assert_eq!(parse_strict_numeric("5"), Number::Int(5));
        assert_eq!(parse_strict_numeric("12.5"), Number::Float(12.5));
    }

    #[test]
    fn test_numeric_inputs_pass_through_unchanged() {
        assert_eq!(to_float(&1234.56_f64), 1234.56);
        assert_eq!(to_float(&7_i64), 7.0);
        assert_eq!(to_int(&-42_i64), -42);
        assert_eq!(to_int(&Number::Int(9)), 9);
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let inputs = ["$1,234.56", "-12.3", "1.2M", "N/A", "+4.56%", "1.2.3"];
        for text in inputs {
            assert_eq!(to_float(text).to_bits(), to_float(text).to_bits());
            assert_eq!(parse_strict_numeric(text), parse_strict_numeric(text));
            assert_eq!(parse_magnitude_suffixed(text), parse_magnitude_suffixed(text));
        }
    }

    #[test]
    fn test_failures_are_distinguishable_from_zero_readings() {
        assert_eq!(try_strict_numeric("0"), Ok(Number::Int(0)));
        assert!(matches!(try_strict_numeric("-"), Err(NormalizeError::Empty { .. })));
        assert!(matches!(try_float("1.2.3"), Err(NormalizeError::Malformed { .. })));
        assert!(matches!(
            try_magnitude_suffixed("99999999999T"),
            Err(NormalizeError::Overflow { .. })
        ));
    }

    #[test]
    fn test_out_of_range_floats_degrade_to_zero() {
        let huge = "99999999999999999999999.5";
        assert!(matches!(try_magnitude_suffixed(huge), Err(NormalizeError::Overflow { .. })));
        assert_eq!(parse_magnitude_suffixed(huge), 0);
        assert_eq!(to_int(&u64::MAX), 0);
        assert_eq!(to_int(&7_u64), 7);
    }
}
