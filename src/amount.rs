use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Fixed-point decimal with 2 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

/// Errors returned when parsing an [`Amount`] from its decimal string form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount '{0}' is not a plain non-negative decimal")]
    Malformed(String),
    #[error("amount '{0}' has more than 2 decimal places")]
    TooPrecise(String),
    #[error("amount '{0}' is too large")]
    Overflow(String),
}

impl Amount {
    const SCALE: i64 = 100;
    const DECIMALS: usize = 2;

    pub const ZERO: Amount = Amount(0);

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Accepts `^\d+(\.\d{1,2})?$` and nothing else: no sign, no exponent,
    /// no bare leading or trailing point.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AmountError::Malformed(s.to_string());
        let overflow = || AmountError::Overflow(s.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (s, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let frac = match frac {
            None => "",
            Some(frac) if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(malformed());
            }
            Some(frac) if frac.len() > Self::DECIMALS => {
                return Err(AmountError::TooPrecise(s.to_string()));
            }
            Some(frac) => frac,
        };

        let mut scaled: i64 = 0;
        for digit in whole.bytes() {
            scaled = scaled
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        scaled = scaled.checked_mul(Self::SCALE).ok_or_else(overflow)?;

        // right-pad to two digits so "10.5" reads as 50 hundredths
        let mut cents: i64 = 0;
        for idx in 0..Self::DECIMALS {
            let digit = frac.as_bytes().get(idx).map_or(0, |b| i64::from(b - b'0'));
            cents = cents * 10 + digit;
        }

        scaled.checked_add(cents).map(Amount).ok_or_else(overflow)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let whole = abs / scale;
        let frac = abs % scale;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl std::ops::Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}
