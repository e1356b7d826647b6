//! Amount parsing and formatting for monetary values written with a decimal comma.
//!
//! User input follows the Finnish convention: digits, optionally followed by a comma and one or
//! two decimals, e.g. `15`, `15,5` or `15,50`. Formatted output uses the same convention, with
//! a non-breaking space between groups of thousands, e.g. `1 000,5`.

use rust_decimal::{Decimal, RoundingStrategy};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The decimal separator accepted in input and written in output.
pub const DECIMAL_SEPARATOR: char = ',';

/// The thousands separator written by [`format`]: U+00A0 NO-BREAK SPACE.
pub const THOUSANDS_SEPARATOR: char = '\u{a0}';

/// The minus sign used by the `fi-FI` convention: U+2212 MINUS SIGN.
const MINUS_SIGN: char = '\u{2212}';

/// Returns `true` if `s` is a valid decimal-comma number.
///
/// Surrounding whitespace is ignored. The accepted form is one or more digits, optionally
/// followed by a comma and exactly one or two digits. The integer part may be grouped in threes
/// with U+00A0, which is the form [`format`] produces, so formatted values can be read back.
///
/// ```
/// use expense_tracker::model::amount::is_valid;
/// assert!(is_valid("15"));
/// assert!(is_valid("15,50"));
/// assert!(is_valid("1\u{a0}000,5"));
/// assert!(!is_valid("15.50"));
/// assert!(!is_valid("15,"));
/// assert!(!is_valid("-15,50"));
/// ```
pub fn is_valid(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    match trimmed.split_once(DECIMAL_SEPARATOR) {
        Some((integer, fraction)) => {
            is_valid_integer(integer) && (1..=2).contains(&fraction.len()) && all_digits(fraction)
        }
        None => is_valid_integer(trimmed),
    }
}

/// Parses a decimal-comma number. Returns zero for empty input and for anything that
/// [`try_parse`] rejects, so it never fails.
pub fn parse(s: &str) -> Decimal {
    try_parse(s).unwrap_or(Decimal::ZERO)
}

/// Parses a decimal-comma number. Returns `None` if [`is_valid`] rejects `s`, or if the value
/// has too many digits to be represented.
///
/// ```
/// use expense_tracker::model::amount::try_parse;
/// assert!(try_parse("15,50").is_some());
/// assert!(try_parse("15.50").is_none());
/// assert!(try_parse("792281625142643375935439503350").is_none());
/// ```
pub fn try_parse(s: &str) -> Option<Decimal> {
    if !is_valid(s) {
        return None;
    }
    let normalized = s
        .trim()
        .replace(THOUSANDS_SEPARATOR, "")
        .replacen(DECIMAL_SEPARATOR, ".", 1);
    Decimal::from_str(&normalized).ok().map(|d| d.normalize())
}

/// The largest amount a single expense may have: 999 999 999,99.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_999, 2)
}

/// Formats `value` with a decimal comma, at most two decimals and no trailing zero decimals.
/// Values of a thousand or more get U+00A0 between groups of thousands.
///
/// ```
/// use expense_tracker::model::amount::format;
/// use rust_decimal::Decimal;
/// assert_eq!(format(Decimal::new(155, 1)), "15,5");
/// assert_eq!(format(Decimal::new(100, 0)), "100");
/// assert_eq!(format(Decimal::new(100999, 3)), "101");
/// assert_eq!(format(Decimal::new(1000, 0)), "1\u{a0}000");
/// ```
pub fn format(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let integer = abs.trunc();
    let fraction = abs - integer;

    let mut out = String::new();
    if negative {
        out.push(MINUS_SIGN);
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_zero() {
        let digits = fraction.normalize().to_string();
        out.push(DECIMAL_SEPARATOR);
        out.push_str(digits.trim_start_matches("0."));
    }
    out
}

fn group_thousands(integer: Decimal) -> String {
    let digits = integer.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(digit);
    }
    out
}

fn is_valid_integer(s: &str) -> bool {
    if !s.contains(THOUSANDS_SEPARATOR) {
        return all_digits(s);
    }
    let mut groups = s.split(THOUSANDS_SEPARATOR);
    let leading_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && all_digits(g));
    leading_ok && groups.all(|g| g.len() == 3 && all_digits(g))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Represents a monetary amount entered or displayed with a decimal comma.
///
/// Parsing is strict: unlike [`parse`], `Amount::from_str` returns an error for input that
/// [`is_valid`] rejects instead of silently producing zero.
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("25,50").unwrap();
/// assert_eq!(amount.to_string(), "25,5");
/// assert!(Amount::from_str("25.50").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }
}

/// An error that occurs when a string is not a valid decimal-comma amount.
#[derive(Clone, PartialEq, Eq)]
pub struct AmountError(String);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?})", self.0)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid amount, use a decimal comma with at most two decimals (e.g. 15,50)",
            self.0
        )
    }
}

impl Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s)
            .map(Amount)
            .ok_or_else(|| AmountError(s.to_string()))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self.0))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
