//! Tick label formatting: SI-prefixed significant digits with a locale decimal separator.

use num_format::Locale;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Enough fractional digits to print any finite f64 exactly in scientific notation.
const EXACT_DIGITS: usize = 767;

/// Resolve a locale tag (`de`, `de-CH`, `fr_FR`, …) to a `num_format::Locale`,
/// retrying with the bare language when the region is unknown.
/// Unknown languages fall back to English.
pub fn locale_for(tag: &str) -> Locale {
    Locale::from_name(tag)
        .or_else(|_| {
            let language = tag.split(['-', '_']).next().unwrap_or_default();
            Locale::from_name(language.to_lowercase())
        })
        .unwrap_or(Locale::en)
}

/// Format `value` with `precision` significant digits and an SI prefix,
/// e.g. `1500 → "1.5k"`, `0.5 → "500m"`, `25 → "25"`, `0 → "0.0"`.
///
/// Trailing zeros are kept so every label shows the same number of digits.
/// Ties round away from zero (`625 → "630"`).
pub fn format_si(value: f64, precision: usize) -> String {
    format_si_with(value, precision, ".")
}

/// [`format_si`] using the decimal separator of `locale_tag`.
pub fn format_si_locale(value: f64, precision: usize, locale_tag: &str) -> String {
    format_si_with(value, precision, locale_for(locale_tag).decimal())
}

fn format_si_with(value: f64, precision: usize, decimal: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let p = precision.clamp(1, EXACT_DIGITS);
    let (coefficient, exponent) = decimal_parts(value.abs(), p);
    let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8);
    let i = exponent - prefix_exponent * 3 + 1;
    let n = coefficient.len() as i32;

    let body = if i == n {
        coefficient
    } else if i > n {
        format!("{coefficient}{}", "0".repeat((i - n) as usize))
    } else if i > 0 {
        let (int, frac) = coefficient.split_at(i as usize);
        format!("{int}{decimal}{frac}")
    } else {
        // below 1 yocto
        let keep = (p as i32 + i - 1).max(0) as usize;
        let rest = if keep == 0 {
            shortest_digits(value.abs())
        } else {
            decimal_parts(value.abs(), keep).0
        };
        format!("0{decimal}{}{rest}", "0".repeat(i.unsigned_abs() as usize))
    };

    let sign = if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    let prefix = SI_PREFIXES[(prefix_exponent + 8) as usize];
    format!("{sign}{body}{prefix}")
}

/// Significant digits (no decimal point) and base-10 exponent of a non-negative
/// value, rounded half-up to `p` digits on its exact decimal expansion.
fn decimal_parts(x: f64, p: usize) -> (String, i32) {
    let s = format!("{:.*e}", EXACT_DIGITS, x);
    let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let mut exponent: i32 = exp.parse().unwrap_or(0);
    let exact: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut digits: Vec<u8> = exact.iter().copied().take(p).collect();
    digits.resize(p, 0);
    if exact.get(p).is_some_and(|d| *d >= 5) {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            // 99.5 → 100: one more digit in front, one less at the end
            digits.insert(0, 1);
            digits.pop();
            exponent += 1;
        }
    }
    (digits.iter().map(|d| char::from(b'0' + d)).collect(), exponent)
}

/// Shortest round-trip digits of `x`, without the decimal point.
fn shortest_digits(x: f64) -> String {
    let s = format!("{x:e}");
    s.split('e')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}
