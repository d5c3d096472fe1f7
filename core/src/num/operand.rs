use crate::error::QuantityError;
use crate::result::QResult;
use num_bigint::BigInt;
use num_traits::Zero;
use std::convert::TryFrom;
use std::str::FromStr;

/// A number as it was written down, before it becomes part of a
/// [`Rational`](super::Rational).
///
/// Decimals keep their decimal digits, so `3.1415` is `31415 * 10^-4`
/// exactly, regardless of how the binary float approximates it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    Integer(BigInt),
    /// `digits * 10^-scale`
    Decimal { digits: BigInt, scale: u32 },
}

impl Operand {
    /// Builds `digits * 10^-scale`, dropping trailing fractional zeroes.
    pub fn decimal(digits: impl Into<BigInt>, scale: u32) -> Self {
        let ten = BigInt::from(10);
        let mut digits = digits.into();
        let mut scale = scale;
        while scale > 0 && !digits.is_zero() && (&digits % &ten).is_zero() {
            digits /= &ten;
            scale -= 1;
        }
        if scale == 0 || digits.is_zero() {
            Self::Integer(digits)
        } else {
            Self::Decimal { digits, scale }
        }
    }

    /// Reads the shortest decimal representation that round-trips to `f`.
    pub fn from_f64(f: f64) -> QResult<Self> {
        if !f.is_finite() {
            return Err(QuantityError::NonFiniteDecimal);
        }
        // `Display` for f64 never uses exponent notation
        f.to_string().parse()
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => n.is_zero(),
            Self::Decimal { digits, .. } => digits.is_zero(),
        }
    }

    pub(crate) fn scale(&self) -> u32 {
        match self {
            Self::Integer(_) => 0,
            Self::Decimal { scale, .. } => *scale,
        }
    }

    /// Returns the digits of `self * 10^scale`; `scale` must not be smaller
    /// than `self.scale()`.
    pub(crate) fn into_scaled_digits(self, scale: u32) -> BigInt {
        let shift = scale.saturating_sub(self.scale());
        let digits = match self {
            Self::Integer(n) => n,
            Self::Decimal { digits, .. } => digits,
        };
        if shift == 0 {
            digits
        } else {
            digits * BigInt::from(10).pow(shift)
        }
    }
}

impl FromStr for Operand {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QuantityError::InvalidNumber(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|ch| ch.is_ascii_digit())
        {
            return Err(invalid());
        }
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        let mut digits: BigInt = [int_part, frac_part]
            .concat()
            .parse()
            .map_err(|_| invalid())?;
        if negative {
            digits = -digits;
        }
        Ok(Self::decimal(digits, scale))
    }
}

impl TryFrom<f64> for Operand {
    type Error = QuantityError;

    fn try_from(f: f64) -> Result<Self, Self::Error> {
        Self::from_f64(f)
    }
}

impl From<BigInt> for Operand {
    fn from(n: BigInt) -> Self {
        Self::Integer(n)
    }
}

impl From<&BigInt> for Operand {
    fn from(n: &BigInt) -> Self {
        Self::Integer(n.clone())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(n: $t) -> Self {
                    Self::Integer(BigInt::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
