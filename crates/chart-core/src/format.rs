// File: crates/chart-core/src/format.rs
// Summary: Number formatters for tick labels, value labels, and tooltip text.

/// Insert `,` thousands separators into the integer part of a plain decimal string.
fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", s),
    };
    let (int, frac) = match rest.find('.') {
        Some(i) => rest.split_at(i),
        None => (rest, ""),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{frac}")
}

/// Drop a "-" from values that round to zero ("-0.0" -> "0.0").
fn no_negative_zero(s: String) -> String {
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Rounded integer without grouping (`d`), e.g. years.
pub fn fmt_plain_int(v: f64) -> String {
    no_negative_zero(format!("{:.0}", v.round()))
}

/// Rounded integer with grouping (`,d`): 12345.6 -> "12,346".
pub fn fmt_int(v: f64) -> String {
    group_thousands(&fmt_plain_int(v))
}

/// Fixed decimals (`.Nf`).
pub fn fmt_fixed(v: f64, decimals: usize) -> String {
    no_negative_zero(format!("{v:.decimals$}"))
}

pub fn fmt1d(v: f64) -> String { fmt_fixed(v, 1) }
pub fn fmt2d(v: f64) -> String { fmt_fixed(v, 2) }

/// Fixed decimals with grouping (`,.Nf`).
pub fn fmt_grouped(v: f64, decimals: usize) -> String {
    group_thousands(&fmt_fixed(v, decimals))
}

/// Share of a whole as a percentage (`.N%`): 0.3 -> "30%" at 0 decimals.
pub fn fmt_percent(share: f64, decimals: usize) -> String {
    format!("{}%", fmt_fixed(share * 100.0, decimals))
}

/// Decimals needed to tell ticks `step` apart (0 for steps >= 1).
pub fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    // small epsilon so 0.1 (stored as 0.1000000000000000055) still counts as 1 decimal
    (-(step.log10() + 1e-9).floor()).max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_grouped() {
        assert_eq!(fmt_int(1234567.0), "1,234,567");
        assert_eq!(fmt_int(999.4), "999");
        assert_eq!(fmt_int(-12345.0), "-12,345");
        assert_eq!(fmt_plain_int(2020.0), "2020");
    }

    #[test]
    fn fixed_and_percent() {
        assert_eq!(fmt1d(45.0), "45.0");
        assert_eq!(fmt2d(3.5), "3.50");
        assert_eq!(fmt_percent(0.3, 0), "30%");
        assert_eq!(fmt_percent(0.7, 1), "70.0%");
        assert_eq!(fmt1d(-0.01), "0.0");
    }

    #[test]
    fn grouped_fixed() {
        assert_eq!(fmt_grouped(1500.0, 0), "1,500");
        assert_eq!(fmt_grouped(1500.26, 1), "1,500.3");
    }

    #[test]
    fn step_precision() {
        assert_eq!(precision_for_step(50.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.1), 1);
        assert_eq!(precision_for_step(0.2), 1);
        assert_eq!(precision_for_step(0.05), 2);
    }
}
