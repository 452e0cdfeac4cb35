//! Text-to-number normalization for scraped market data.
//!
//! Table cells arrive as display text: `"$1,234.56"`, `"+4.56%"`, `"12.3M"`.
//! Every entry point here comes in two flavours:
//!
//! - a strict `try_*` function returning `Result<_, NormalizeError>`, for
//!   callers that need to tell a real zero apart from a cell that could not be
//!   read;
//! - a lenient function (`to_float`, `to_int`, `parse_strict_numeric`, ...)
//!   that logs the failure, bumps a metrics counter and returns zero.
//!
//! Nothing in this module performs I/O or holds state, so it is safe to call
//! from any thread.

mod magnitude;

pub use magnitude::Magnitude;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a piece of text could not be turned into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no numeric content in {input:?}")]
    Empty { input: String },

    #[error("malformed numeric text {input:?}")]
    Malformed { input: String },

    #[error("numeric value out of range in {input:?}")]
    Overflow { input: String },

    #[error("value type is not accepted by this conversion")]
    Unsupported,
}

impl NormalizeError {
    pub(crate) fn empty(input: &str) -> Self {
        Self::Empty { input: input.to_string() }
    }

    pub(crate) fn malformed(input: &str) -> Self {
        Self::Malformed { input: input.to_string() }
    }

    pub(crate) fn overflow(input: &str) -> Self {
        Self::Overflow { input: input.to_string() }
    }
}

/// A canonical number in base units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncates floats toward zero. Floats that are not finite or do not
    /// fit in `i64` are an `Overflow` for `original`.
    pub fn try_as_i64(self, original: &str) -> Result<i64, NormalizeError> {
        match self {
            Number::Int(i) => Ok(i),
            Number::Float(f) => {
                let whole = f.trunc();
                // i64::MAX as f64 rounds up to 2^63, which is already out of range
                if whole.is_finite() && whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
                    Ok(whole as i64)
                } else {
                    Err(NormalizeError::overflow(original))
                }
            }
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

/// How `parse_strict_numeric` treats the minus sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    /// `-` is always kept, so `"-5"` and `"-12.3"` are both negative.
    #[default]
    Consistent,
    /// `-` is kept only when the trimmed text is longer than two characters.
    /// A two-character `"-5"` comes out as `5`. Matches the output of the
    /// older Python scrapers.
    LengthGated,
}

/// Values that can be handed to `to_float` / `to_int`.
///
/// Text goes through the cleaning rules; values that are already numeric
/// pass straight through (widened to `f64` where needed).
pub trait NumericInput {
    fn float_value(&self) -> Result<f64, NormalizeError>;
    fn int_value(&self) -> Result<i64, NormalizeError>;
}

impl NumericInput for str {
    fn float_value(&self) -> Result<f64, NormalizeError> {
        float_from_text(self)
    }

    fn int_value(&self) -> Result<i64, NormalizeError> {
        int_from_text(self)
    }
}

impl NumericInput for String {
    fn float_value(&self) -> Result<f64, NormalizeError> {
        float_from_text(self)
    }

    fn int_value(&self) -> Result<i64, NormalizeError> {
        int_from_text(self)
    }
}

impl NumericInput for f64 {
    fn float_value(&self) -> Result<f64, NormalizeError> {
        Ok(*self)
    }

    fn int_value(&self) -> Result<i64, NormalizeError> {
        Err(NormalizeError::Unsupported)
    }
}

macro_rules! integer_input {
    ($($ty:ty),*) => {
        $(
            impl NumericInput for $ty {
                fn float_value(&self) -> Result<f64, NormalizeError> {
                    Ok(*self as f64)
                }

                fn int_value(&self) -> Result<i64, NormalizeError> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

integer_input!(i64, i32, u32);

impl NumericInput for u64 {
    fn float_value(&self) -> Result<f64, NormalizeError> {
        Ok(*self as f64)
    }

    fn int_value(&self) -> Result<i64, NormalizeError> {
        i64::try_from(*self).map_err(|_| NormalizeError::overflow(&self.to_string()))
    }
}

impl NumericInput for Number {
    fn float_value(&self) -> Result<f64, NormalizeError> {
        Ok(self.as_f64())
    }

    fn int_value(&self) -> Result<i64, NormalizeError> {
        match self {
            Number::Int(i) => Ok(*i),
            Number::Float(_) => Err(NormalizeError::Unsupported),
        }
    }
}

/// Keeps only `0-9`, `.` and `-`, then parses what is left as `f64`.
fn float_from_text(text: &str) -> Result<f64, NormalizeError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(NormalizeError::empty(text));
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| NormalizeError::malformed(text))
}

/// Parses the whole string only when it ends in a digit. No partial parsing:
/// `"$12"` is rejected rather than read as `12`.
fn int_from_text(text: &str) -> Result<i64, NormalizeError> {
    match text.chars().last() {
        None => Err(NormalizeError::empty(text)),
        Some(last) if !last.is_ascii_digit() => {
            if text.trim().is_empty() {
                Err(NormalizeError::empty(text))
            } else {
                Err(NormalizeError::malformed(text))
            }
        }
        Some(_) => parse_i64(text.trim(), text),
    }
}

pub(crate) fn parse_i64(digits: &str, original: &str) -> Result<i64, NormalizeError> {
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NormalizeError::overflow(original),
        IntErrorKind::Empty => NormalizeError::empty(original),
        _ => NormalizeError::malformed(original),
    })
}

/// Converts a failed conversion into its zero value, leaving a trace behind.
fn lenient<T>(operation: &'static str, result: Result<T, NormalizeError>, zero: T) -> T {
    match result {
        Ok(value) => value,
        Err(err @ NormalizeError::Empty { .. }) => {
            debug!(operation, error = %err, "no numeric content, using zero");
            crate::metrics::record_normalize_failure(operation);
            zero
        }
        Err(err) => {
            warn!(operation, error = %err, "numeric conversion failed, using zero");
            crate::metrics::record_normalize_failure(operation);
            zero
        }
    }
}

pub fn try_float<T: NumericInput + ?Sized>(value: &T) -> Result<f64, NormalizeError> {
    value.float_value()
}

/// `"$1,234.56"` → `1234.56`. Anything unreadable becomes `0.0`.
pub fn to_float<T: NumericInput + ?Sized>(value: &T) -> f64 {
    lenient("to_float", value.float_value(), 0.0)
}

pub fn try_int<T: NumericInput + ?Sized>(value: &T) -> Result<i64, NormalizeError> {
    value.int_value()
}

/// Whole-string integer parse. Callers strip thousands separators first.
pub fn to_int<T: NumericInput + ?Sized>(value: &T) -> i64 {
    lenient("to_int", value.int_value(), 0)
}

pub fn try_strict_numeric(text: &str) -> Result<Number, NormalizeError> {
    NumericNormalizer::default().try_strict_numeric(text)
}

pub fn parse_strict_numeric(text: &str) -> Number {
    NumericNormalizer::default().parse_strict_numeric(text)
}

pub fn try_magnitude_suffixed(text: &str) -> Result<i64, NormalizeError> {
    NumericNormalizer::default().try_magnitude_suffixed(text)
}

pub fn parse_magnitude_suffixed(text: &str) -> i64 {
    NumericNormalizer::default().parse_magnitude_suffixed(text)
}

pub fn try_worded_magnitude(text: &str) -> Result<i64, NormalizeError> {
    NumericNormalizer::default().try_worded_magnitude(text)
}

pub fn parse_worded_magnitude(text: &str) -> i64 {
    NumericNormalizer::default().parse_worded_magnitude(text)
}

/// The table-cell cleaners, parameterised by sign handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumericNormalizer {
    pub sign_policy: SignPolicy,
}

impl NumericNormalizer {
    pub fn new(sign_policy: SignPolicy) -> Self {
        Self { sign_policy }
    }

    fn allows_minus(&self, trimmed: &str) -> bool {
        match self.sign_policy {
            SignPolicy::Consistent => true,
            SignPolicy::LengthGated => trimmed.chars().count() > 2 && trimmed.contains('-'),
        }
    }

    /// Keeps digits, `.`, `+` (and `-` per the sign policy). A remainder with
    /// a `.` is a float, otherwise an integer.
    pub fn try_strict_numeric(&self, text: &str) -> Result<Number, NormalizeError> {
        let trimmed = text.trim();
        let allow_minus = self.allows_minus(trimmed);
        let kept: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+') || (allow_minus && *c == '-'))
            .collect();

        if !kept.chars().any(|c| c.is_ascii_digit()) {
            return Err(NormalizeError::empty(text));
        }
        if kept.len() > 1 && kept.contains('.') {
            return kept
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| NormalizeError::malformed(text));
        }
        parse_i64(&kept, text).map(Number::Int)
    }

    /// Lenient form of [`try_strict_numeric`](Self::try_strict_numeric):
    /// unreadable text yields `Int(0)`.
    pub fn parse_strict_numeric(&self, text: &str) -> Number {
        lenient("parse_strict_numeric", self.try_strict_numeric(text), Number::Int(0))
    }

    /// `"1.23M"` → `1_230_000`, `"3B"` → `3_000_000_000`, `"2.5T"` →
    /// `2_500_000_000_000`. Text without a suffix goes through the strict
    /// cleaner and is truncated to an integer.
    pub fn try_magnitude_suffixed(&self, text: &str) -> Result<i64, NormalizeError> {
        let trimmed = text.trim();
        match Magnitude::find_suffix(trimmed) {
            Some((magnitude, at)) => magnitude.scale(&trimmed[..at], text),
            None => self.try_strict_numeric(trimmed)?.try_as_i64(text),
        }
    }

    pub fn parse_magnitude_suffixed(&self, text: &str) -> i64 {
        lenient("parse_magnitude_suffixed", self.try_magnitude_suffixed(text), 0)
    }

    /// `"12.3 million"` → `12_300_000`, `"1,234,567"` → `1_234_567`.
    pub fn try_worded_magnitude(&self, text: &str) -> Result<i64, NormalizeError> {
        let trimmed = text.trim();
        if let Some((number, word)) = trimmed.rsplit_once(char::is_whitespace) {
            if let Some(magnitude) = Magnitude::from_word(word) {
                return magnitude.scale(number, text);
            }
        }
        self.try_strict_numeric(trimmed)?.try_as_i64(text)
    }

    pub fn parse_worded_magnitude(&self, text: &str) -> i64 {
        lenient("parse_worded_magnitude", self.try_worded_magnitude(text), 0)
    }
}
