//! Tick label formatting.
//!
//! Output does not depend on the process locale: `.` is the decimal point
//! and `,` groups thousands.

/// Significant digits kept on linear labels.
const LINEAR_SIGNIFICANT_DIGITS: i32 = 6;
/// Significant digits kept in the mantissa of logarithmic labels.
const LOG_SIGNIFICANT_DIGITS: usize = 3;
/// Magnitudes outside this window fall back to exponent notation on linear
/// axes, grouped digits would be unreadable there.
const LINEAR_MAX_MAGNITUDE: f64 = 1e15;
const LINEAR_MIN_MAGNITUDE: f64 = 1e-5;
/// Decimals `f64` can meaningfully print.
const MAX_DECIMALS: usize = 17;

/// Formats a tick value as a label.
///
/// Linear labels use plain decimal notation with thousands separators,
/// at most six significant digits and no trailing zeros. Logarithmic
/// labels use exponent notation (`1e3`, `2.5e-2`).
///
/// # Examples
///
/// ```rust
/// use aksel_raster::format::format_label;
///
/// assert_eq!(format_label(12_500.0, false), "12,500");
/// assert_eq!(format_label(0.1 + 0.2, false), "0.3");
/// assert_eq!(format_label(1000.0, true), "1e3");
/// ```
pub fn format_label(value: f64, logarithmic: bool) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if logarithmic || !(LINEAR_MIN_MAGNITUDE..LINEAR_MAX_MAGNITUDE).contains(&magnitude) {
        format_exponent(value)
    } else {
        format_linear(value)
    }
}

/// Formats a whole tick sequence.
///
/// Linear labels get as many decimals as the spacing between neighbouring
/// ticks needs, so distinct ticks never share a label however large their
/// magnitude. Logarithmic labels and sequences without a spacing fall back
/// to [`format_label`].
///
/// ```rust
/// use aksel_raster::format::format_labels;
///
/// let labels = format_labels(&[1_000_000.0, 1_000_001.0, 1_000_002.0], false);
/// assert_eq!(labels, ["1,000,000", "1,000,001", "1,000,002"]);
/// ```
pub fn format_labels(values: &[f64], logarithmic: bool) -> Vec<String> {
    let step = values
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).abs())
        .filter(|step| *step > 0.0 && step.is_finite())
        .fold(f64::INFINITY, f64::min);
    if logarithmic || !step.is_finite() {
        return values
            .iter()
            .map(|&value| format_label(value, logarithmic))
            .collect();
    }

    let decimals = step_decimals(step);
    values
        .iter()
        .map(|&value| {
            let magnitude = value.abs();
            if value == 0.0 || (LINEAR_MIN_MAGNITUDE..LINEAR_MAX_MAGNITUDE).contains(&magnitude) {
                format_fixed(value, decimals)
            } else {
                format_label(value, false)
            }
        })
        .collect()
}

/// Fewest decimals that print `step` exactly, up to [`MAX_DECIMALS`].
fn step_decimals(step: f64) -> usize {
    (0..MAX_DECIMALS)
        .find(|&decimals| {
            let scaled = step * 10f64.powi(decimals as i32);
            (scaled - scaled.round()).abs() <= scaled * 1e-9
        })
        .unwrap_or(MAX_DECIMALS)
}

fn format_linear(value: f64) -> String {
    let exponent = value.abs().log10().floor() as i32;
    let excess = exponent - (LINEAR_SIGNIFICANT_DIGITS - 1);
    let value = if excess > 0 {
        let unit = 10f64.powi(excess);
        (value / unit).round() * unit
    } else {
        value
    };
    format_fixed(value, (-excess).clamp(0, MAX_DECIMALS as i32) as usize)
}

/// Plain decimal notation with grouped thousands and no trailing zeros.
fn format_fixed(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let trimmed = trim_fraction(&fixed);

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    // Rounding can turn a tiny negative into "-0".
    if integer.chars().all(|c| c == '0') && fraction.is_none() {
        return "0".to_string();
    }

    let mut out = String::with_capacity(trimmed.len() + integer.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn format_exponent(value: f64) -> String {
    // `{:e}` normalizes the mantissa into [1, 10) after rounding.
    let formatted = format!("{:.*e}", LOG_SIGNIFICANT_DIGITS - 1, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
        None => formatted,
    }
}

/// Drops trailing zeros of a fractional part, and the point if nothing is left.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
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
    fn linear_integers_get_grouped() {
        assert_eq!(format_label(0.0, false), "0");
        assert_eq!(format_label(7.0, false), "7");
        assert_eq!(format_label(999.0, false), "999");
        assert_eq!(format_label(1000.0, false), "1,000");
        assert_eq!(format_label(-1_234_567.0, false), "-1,234,570");
        assert_eq!(format_label(45_000.0, false), "45,000");
    }

    #[test]
    fn linear_fractions_are_trimmed() {
        assert_eq!(format_label(0.5, false), "0.5");
        assert_eq!(format_label(-2.25, false), "-2.25");
        assert_eq!(format_label(0.1 + 0.2, false), "0.3");
        assert_eq!(format_label(1500.5, false), "1,500.5");
        assert_eq!(format_label(0.000_25, false), "0.00025");
    }

    #[test]
    fn linear_extremes_use_exponent() {
        assert_eq!(format_label(2e20, false), "2e20");
        assert_eq!(format_label(3e-9, false), "3e-9");
    }

    #[test]
    fn logarithmic_labels() {
        assert_eq!(format_label(1.0, true), "1e0");
        assert_eq!(format_label(1000.0, true), "1e3");
        assert_eq!(format_label(0.01, true), "1e-2");
        assert_eq!(format_label(0.025, true), "2.5e-2");
        assert_eq!(format_label(-5000.0, true), "-5e3");
        assert_eq!(format_label(999.9, true), "1e3");
    }

    #[test]
    fn sequence_labels_follow_tick_spacing() {
        let ticks: Vec<f64> = (0..5).map(|i| 1_000_000.0 + f64::from(i)).collect();
        let labels = format_labels(&ticks, false);
        assert_eq!(labels[0], "1,000,000");
        assert_eq!(labels[4], "1,000,004");
        assert!(labels.windows(2).all(|pair| pair[0] != pair[1]));

        let fractions = format_labels(&[-0.25, 0.0, 0.25, 0.5], false);
        assert_eq!(fractions, ["-0.25", "0", "0.25", "0.5"]);

        let tenths: Vec<f64> = (0..4).map(|i| 0.1 * f64::from(i)).collect();
        assert_eq!(format_labels(&tenths, false), ["0", "0.1", "0.2", "0.3"]);
    }

    #[test]
    fn sequence_labels_without_spacing_fall_back() {
        assert_eq!(format_labels(&[5.0], false), ["5"]);
        assert_eq!(format_labels(&[10.0, 100.0], true), ["1e1", "1e2"]);
        assert!(format_labels(&[], false).is_empty());
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_label(f64::INFINITY, false), "inf");
        assert_eq!(format_label(f64::NAN, true), "NaN");
    }

    #[test]
    fn deterministic() {
        assert_eq!(format_label(12_345.678, false), format_label(12_345.678, false));
    }
}
