use super::{parse_i64, NormalizeError};

/// Compact-notation scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    Thousand,
    Million,
    Billion,
    Trillion,
}

/// Order in which suffix letters are looked for.
const SUFFIX_PRIORITY: [Magnitude; 4] = [
    Magnitude::Million,
    Magnitude::Billion,
    Magnitude::Trillion,
    Magnitude::Thousand,
];

impl Magnitude {
    pub const fn exponent(self) -> u32 {
        match self {
            Magnitude::Thousand => 3,
            Magnitude::Million => 6,
            Magnitude::Billion => 9,
            Magnitude::Trillion => 12,
        }
    }

    pub const fn suffix(self) -> char {
        match self {
            Magnitude::Thousand => 'K',
            Magnitude::Million => 'M',
            Magnitude::Billion => 'B',
            Magnitude::Trillion => 'T',
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "thousand" => Some(Magnitude::Thousand),
            "million" => Some(Magnitude::Million),
            "billion" => Some(Magnitude::Billion),
            "trillion" => Some(Magnitude::Trillion),
            _ => None,
        }
    }

    /// First suffix letter present in `text` (by priority, not position) and
    /// the byte offset where it occurs.
    pub fn find_suffix(text: &str) -> Option<(Self, usize)> {
        SUFFIX_PRIORITY
            .iter()
            .find_map(|m| text.find(m.suffix()).map(|at| (*m, at)))
    }

    /// Scales a decimal string like `"1.23"` by this magnitude using integer
    /// arithmetic only. Fraction digits finer than one base unit are dropped.
    pub(crate) fn scale(self, number: &str, original: &str) -> Result<i64, NormalizeError> {
        let cleaned: String = number
            .chars()
            .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
            .collect();

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(NormalizeError::empty(original));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(NormalizeError::malformed(original));
        }

        let exponent = self.exponent();
        let unit = 10_i64.pow(exponent);

        let whole_value = if whole.is_empty() { 0 } else { parse_i64(whole, original)? };
        let scaled_whole = whole_value
            .checked_mul(unit)
            .ok_or_else(|| NormalizeError::overflow(original))?;

        let kept_digits = &fraction[..fraction.len().min(exponent as usize)];
        let fraction_value = if kept_digits.is_empty() {
            0
        } else {
            let digits = parse_i64(kept_digits, original)?;
            digits * 10_i64.pow(exponent - kept_digits.len() as u32)
        };

        let total = scaled_whole
            .checked_add(fraction_value)
            .ok_or_else(|| NormalizeError::overflow(original))?;
        Ok(if negative { -total } else { total })
    }
}
