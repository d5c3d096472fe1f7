use super::formatting_style::FormattingStyle;
use super::operand::Operand;
use crate::error::QuantityError;
use crate::result::QResult;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Recurring decimals whose repeating block doesn't close within this many
/// digits are printed as fractions instead.
const MAX_RECURRING_DIGITS: usize = 1000;

/// `FormattingStyle::DecimalPlaces` never prints more digits than this after
/// the point; longer requests are truncated and reported as inexact.
const MAX_DECIMAL_PLACES: usize = 10_000;

/// An exact fraction of two arbitrary-precision integers.
///
/// The denominator is always positive, the sign is carried by the numerator.
/// Fractions are *not* reduced automatically: `Rational::new(2, 4)` keeps its
/// numerator 2 and denominator 4 until [`simplified`](Self::simplified) is
/// called. Comparisons are exact regardless of representation.
#[derive(Clone)]
pub struct Rational {
    num: BigInt,
    den: BigInt,
}

impl Rational {
    /// Builds `numerator / denominator` from any mix of integers, big
    /// integers and decimal operands.
    pub fn new(numerator: impl Into<Operand>, denominator: impl Into<Operand>) -> QResult<Self> {
        let numerator = numerator.into();
        let denominator = denominator.into();
        // (nn / nd) / (dn / dd) == (nn * dd) / (nd * dn); nd and dd are powers
        // of ten, so only the larger one survives
        let scale = numerator.scale().max(denominator.scale());
        Self::from_parts(
            numerator.into_scaled_digits(scale),
            denominator.into_scaled_digits(scale),
        )
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            num: n.into(),
            den: BigInt::one(),
        }
    }

    /// Converts `f` through its shortest decimal representation, so
    /// `from_f64(0.1)` is exactly 1/10.
    pub fn from_f64(f: f64) -> QResult<Self> {
        Self::new(Operand::from_f64(f)?, 1)
    }

    fn from_parts(num: BigInt, den: BigInt) -> QResult<Self> {
        if den.is_zero() {
            return Err(QuantityError::DivideByZero);
        }
        Ok(if den.is_negative() {
            Self {
                num: -num,
                den: -den,
            }
        } else {
            Self { num, den }
        })
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.num
    }

    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.num.is_positive()
    }

    pub fn is_integer(&self) -> bool {
        (&self.num % &self.den).is_zero()
    }

    /// Reduces the fraction to lowest terms.
    pub fn simplified(&self) -> Self {
        if self.num.is_zero() {
            return Self::zero();
        }
        let gcd = self.num.gcd(&self.den);
        Self {
            num: &self.num / &gcd,
            den: &self.den / &gcd,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    pub fn recip(&self) -> QResult<Self> {
        Self::from_parts(self.den.clone(), self.num.clone())
    }

    pub fn div(&self, rhs: &Self) -> QResult<Self> {
        Ok(self * &rhs.recip()?)
    }

    /// Integer power. `x.pow(0)` is one for every `x`, including zero;
    /// negative exponents go through the reciprocal.
    pub fn pow(&self, exponent: i32) -> QResult<Self> {
        let base = if exponent < 0 {
            self.recip()?
        } else {
            self.clone()
        };
        let n = exponent.unsigned_abs();
        Ok(Self {
            num: base.num.pow(n),
            den: base.den.pow(n),
        })
    }

    /// Lossy conversion to a float.
    pub fn to_f64(&self) -> f64 {
        // keep 64 significant bits of each side and put the dropped bits
        // back as a power of two once the quotient is known
        let num_shift = self.num.bits().saturating_sub(64);
        let den_shift = self.den.bits().saturating_sub(64);
        let num = (&self.num >> num_shift).to_f64().unwrap_or(f64::NAN);
        let den = (&self.den >> den_shift).to_f64().unwrap_or(f64::NAN);
        let mut result = num / den;
        let mut exponent = i64::try_from(num_shift).unwrap_or(i64::MAX)
            - i64::try_from(den_shift).unwrap_or(i64::MAX);
        while exponent != 0 && result.is_finite() && result != 0.0 {
            // each step stays within the range of a normal f64
            let step = exponent.clamp(-1000, 1000);
            result *= 2f64.powi(step as i32);
            exponent -= step;
        }
        result
    }

    /// Formats the reduced fraction according to `style`.
    pub fn format(&self, style: FormattingStyle) -> FormattedRational {
        let x = self.simplified();
        let negative = x.num.is_negative();
        let num = x.num.abs();
        let den = x.den;

        if den.is_one() {
            return FormattedRational {
                negative,
                ty: FormattedRationalType::Integer(num.to_string()),
                exact: true,
            };
        }

        let ty = match style {
            FormattingStyle::ExactFraction => Self::format_as_fraction(num, &den, false),
            FormattingStyle::MixedFraction => Self::format_as_fraction(num, &den, true),
            FormattingStyle::ExactFloatWithFractionFallback => {
                if terminates(&den) {
                    Self::format_as_terminating_decimal(num, &den)
                } else {
                    Self::format_as_fraction(num, &den, false)
                }
            }
            FormattingStyle::ExactFloat => {
                if terminates(&den) {
                    Self::format_as_terminating_decimal(num, &den)
                } else {
                    Self::format_as_recurring_decimal(&num, &den)
                        .unwrap_or_else(|| Self::format_as_fraction(num, &den, false))
                }
            }
            FormattingStyle::DecimalPlaces(places) => {
                let (int, rem) = num.div_rem(&den);
                let (digits, rem) = long_division(rem, &den, places.min(MAX_DECIMAL_PLACES));
                let digits = digits.trim_end_matches('0').to_string();
                let negative = negative && !(int.is_zero() && digits.is_empty());
                return FormattedRational {
                    negative,
                    ty: FormattedRationalType::Decimal {
                        int: int.to_string(),
                        fixed: digits,
                        recurring: None,
                    },
                    exact: rem.is_zero(),
                };
            }
        };
        FormattedRational {
            negative,
            ty,
            exact: true,
        }
    }

    fn format_as_fraction(num: BigInt, den: &BigInt, mixed: bool) -> FormattedRationalType {
        if mixed {
            let (whole, rest) = num.div_rem(den);
            if !whole.is_zero() {
                return FormattedRationalType::Fraction {
                    whole: Some(whole.to_string()),
                    num: rest.to_string(),
                    den: den.to_string(),
                };
            }
        }
        FormattedRationalType::Fraction {
            whole: None,
            num: num.to_string(),
            den: den.to_string(),
        }
    }

    fn format_as_terminating_decimal(num: BigInt, den: &BigInt) -> FormattedRationalType {
        let (int, rem) = num.div_rem(den);
        let (digits, _) = long_division(rem, den, usize::MAX);
        FormattedRationalType::Decimal {
            int: int.to_string(),
            fixed: digits,
            recurring: None,
        }
    }

    fn format_as_recurring_decimal(num: &BigInt, den: &BigInt) -> Option<FormattedRationalType> {
        let (int, rem) = num.div_rem(den);
        let (cycle_length, location) = find_cycle(&rem, den, MAX_RECURRING_DIGITS)?;
        let (fixed, rem) = long_division(rem, den, location);
        let (recurring, _) = long_division(rem, den, cycle_length);
        Some(FormattedRationalType::Decimal {
            int: int.to_string(),
            fixed,
            recurring: Some(recurring),
        })
    }
}

/// Whether `1/den` has a terminating decimal expansion.
fn terminates(den: &BigInt) -> bool {
    let mut d = den.clone();
    while d.is_even() && !d.is_zero() {
        d /= 2u32;
    }
    while !d.is_zero() && (&d % 5u32).is_zero() {
        d /= 5u32;
    }
    d.is_one()
}

/// Long division of `rem / den` (with `0 <= rem < den`), producing at most
/// `limit` digits. Returns the digits and the final remainder.
fn long_division(mut rem: BigInt, den: &BigInt, limit: usize) -> (String, BigInt) {
    let mut digits = String::new();
    while !rem.is_zero() && digits.len() < limit {
        let (digit, next) = (rem * 10u32).div_rem(den);
        digits.push_str(&digit.to_string());
        rem = next;
    }
    (digits, rem)
}

// Brent's cycle detection algorithm over the remainders of a long division
// returns (length of cycle, index of first digit in the cycle), or None if
// the cycle doesn't close within `limit` steps
fn find_cycle(rem: &BigInt, den: &BigInt, limit: usize) -> Option<(usize, usize)> {
    let next = |r: &BigInt| (r * 10u32) % den;

    // main phase: search successive powers of two
    let mut power = 1;
    // lam is the length of the cycle
    let mut lam = 1;
    let mut steps = 1;
    let mut tortoise = rem.clone();
    let mut hare = next(rem);
    while tortoise != hare {
        if steps > limit {
            return None;
        }
        if power == lam {
            tortoise = hare.clone();
            power *= 2;
            lam = 0;
        }
        hare = next(&hare);
        lam += 1;
        steps += 1;
    }

    // find the position of the first repetition of length lam
    let mut tortoise = rem.clone();
    let mut hare = rem.clone();
    for _ in 0..lam {
        hare = next(&hare);
    }
    // the distance between the hare and tortoise is now lam, so they meet
    // at the start of the cycle
    let mut mu = 0;
    while tortoise != hare {
        tortoise = next(&tortoise);
        hare = next(&hare);
        mu += 1;
    }
    Some((lam, mu))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormattedRationalType {
    Integer(String),
    // optional whole part (for mixed fractions), numerator, denominator
    Fraction {
        whole: Option<String>,
        num: String,
        den: String,
    },
    // integer part, non-recurring digits, recurring digits
    Decimal {
        int: String,
        fixed: String,
        recurring: Option<String>,
    },
}

/// A [`Rational`] rendered in some [`FormattingStyle`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRational {
    // whether or not to print a minus sign
    negative: bool,
    ty: FormattedRationalType,
    exact: bool,
}

impl FormattedRational {
    /// False if digits were cut off, e.g. by `FormattingStyle::DecimalPlaces`.
    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

impl fmt::Display for FormattedRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        match &self.ty {
            FormattedRationalType::Integer(int) => write!(f, "{}", int)?,
            FormattedRationalType::Fraction { whole, num, den } => {
                if let Some(whole) = whole {
                    write!(f, "{} ", whole)?;
                }
                write!(f, "{}/{}", num, den)?;
            }
            FormattedRationalType::Decimal {
                int,
                fixed,
                recurring,
            } => {
                write!(f, "{}", int)?;
                if !fixed.is_empty() || recurring.is_some() {
                    write!(f, ".{}", fixed)?;
                }
                if let Some(recurring) = recurring {
                    write!(f, "({})", recurring)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(FormattingStyle::default()))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive, so cross-multiplying keeps the order
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rational {}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.simplified();
        reduced.num.hash(state);
        reduced.den.hash(state);
    }
}

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        if self.den == rhs.den {
            Rational {
                num: &self.num + &rhs.num,
                den: self.den.clone(),
            }
        } else {
            Rational {
                num: &self.num * &rhs.den + &rhs.num * &self.den,
                den: &self.den * &rhs.den,
            }
        }
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        if self.den == rhs.den {
            Rational {
                num: &self.num - &rhs.num,
                den: self.den.clone(),
            }
        } else {
            Rational {
                num: &self.num * &rhs.den - &rhs.num * &self.den,
                den: &self.den * &rhs.den,
            }
        }
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational {
            num: &self.num * &rhs.num,
            den: &self.den * &rhs.den,
        }
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                $imp::$method(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            num: -&self.num,
            den: self.den.clone(),
        }
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Rational {
                fn from(n: $t) -> Self {
                    Self::from_integer(n)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Rational {
    type Error = QuantityError;

    fn try_from(f: f64) -> Result<Self, Self::Error> {
        Self::from_f64(f)
    }
}

impl FromStr for Rational {
    type Err = QuantityError;

    /// Parses integer and decimal literals, optionally as a fraction:
    /// `"42"`, `"-3.1415"`, `"1/3"`, `"0.5/2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((num, den)) => Self::new(num.parse::<Operand>()?, den.parse::<Operand>()?),
            None => Self::new(s.parse::<Operand>()?, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn parts(x: &Rational) -> (BigInt, BigInt) {
        (x.numerator().clone(), x.denominator().clone())
    }

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn cannot_create_division_by_zero() {
        assert_eq!(Rational::new(1, 0), Err(QuantityError::DivideByZero));
        assert_eq!(Rational::new(-1, 0), Err(QuantityError::DivideByZero));
        assert_eq!(Rational::new(0, 0), Err(QuantityError::DivideByZero));
        let small = Operand::from_f64(0.123).unwrap();
        assert_eq!(
            Rational::new(small.clone(), 0),
            Err(QuantityError::DivideByZero)
        );
        assert_eq!(
            Rational::new(small, Operand::from_f64(0.0).unwrap()),
            Err(QuantityError::DivideByZero)
        );
    }

    #[test]
    fn create_from_integers() -> QResult<()> {
        assert_eq!(parts(&Rational::from(7)), (big(7), big(1)));
        assert_eq!(parts(&Rational::from(5i64)), (big(5), big(1)));
        assert_eq!(parts(&Rational::from(big(42))), (big(42), big(1)));
        assert_eq!(parts(&Rational::new(big(42), big(11))?), (big(42), big(11)));
        assert_eq!(parts(&Rational::new(17, 42)?), (big(17), big(42)));
        Ok(())
    }

    #[test]
    fn sign_moves_to_numerator() -> QResult<()> {
        assert_eq!(parts(&Rational::new(big(2), -2)?), (big(-2), big(2)));
        assert_eq!(parts(&Rational::new(-1, big(-3))?), (big(1), big(3)));
        let x = Rational::new(i64::MAX, i64::MIN)?;
        assert_eq!(x.numerator(), &-BigInt::from(i64::MAX));
        assert_eq!(x.denominator(), &-BigInt::from(i64::MIN));
        Ok(())
    }

    #[test]
    fn create_from_decimals() -> QResult<()> {
        let d = |f: f64| Operand::from_f64(f).unwrap();
        let x = Rational::from_f64(3.1415)?;
        assert_eq!(parts(&x), (big(31415), big(10000)));
        assert!((x.to_f64() - 3.1415).abs() < f64::EPSILON);
        assert_eq!(parts(&Rational::new(big(8), d(0.5))?), (big(80), big(5)));
        assert_eq!(parts(&Rational::new(d(0.123), big(456))?), (big(123), big(456000)));
        assert_eq!(parts(&Rational::new(d(0.123), d(45.6))?), (big(123), big(45600)));
        assert_eq!(parts(&Rational::new(d(0.0123), d(0.000456))?), (big(12300), big(456)));
        assert_eq!(parts(&Rational::new(d(12.34), 10)?), (big(1234), big(1000)));
        assert_eq!(parts(&Rational::new(d(0.0123), 456i64)?), (big(123), big(4560000)));
        assert_eq!(parts(&Rational::new(123, d(456.0))?), (big(123), big(456)));
        assert_eq!(
            parts(&Rational::new(123i64, d(45600.789))?),
            (big(123000), big(45600789))
        );
        Ok(())
    }

    #[test]
    fn not_simplified_on_creation() {
        assert_eq!(parts(&rat(2, 4)), (big(2), big(4)));
    }

    #[test]
    fn simplify() {
        assert_eq!(parts(&rat(2, 4).simplified()), (big(1), big(2)));
        assert_eq!(parts(&rat(-10, 5).simplified()), (big(-2), big(1)));
        assert_eq!(parts(&rat(3, -9).simplified()), (big(-1), big(3)));
        assert_eq!(parts(&rat(-4, -12).simplified()), (big(1), big(3)));
        assert_eq!(parts(&rat(0, -7).simplified()), (big(0), big(1)));
        let once = rat(84, -36).simplified();
        assert_eq!(parts(&once.simplified()), parts(&once));
    }

    #[test]
    fn equality() {
        assert_eq!(rat(2, 3), rat(2, 3));
        assert_eq!(rat(2, 3), rat(4, 6));
        assert_eq!(rat(-3, 4), rat(3, -4));
        assert_eq!(rat(-3, 4), rat(6, -8));
        assert_ne!(rat(-3, 4), rat(3, 4));
        assert_ne!(rat(3, -4), rat(3, 4));
    }

    #[test]
    fn ordering() {
        assert!(rat(2, 7) < rat(3, 7));
        assert!(!(rat(2, 7) < rat(2, 7)));
        assert!(rat(2, 7) <= rat(2, 7));
        assert!(!(rat(2, 7) <= rat(1, 7)));
        assert!(rat(2, 7) >= rat(1, 7));
        assert!(!(rat(2, 7) > rat(2, 7)));
        assert!(rat(16, 9) < rat(2, 1));
        assert!(rat(36, 49) < rat(3, 4));
        assert!(rat(-1, 2) < rat(1, -3));
    }

    #[test]
    fn ordering_of_huge_values_is_exact() -> QResult<()> {
        let a: Rational = "100000000000000000000000000000001/100000000000000000000000000000000"
            .parse()?;
        let b = Rational::one();
        assert!(a > b);
        assert!((a.to_f64() - 1.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn hash_agrees_with_equality() {
        use std::collections::HashSet;
        let set: HashSet<Rational> = [rat(1, 2), rat(2, 4), rat(-3, -6)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn multiply() {
        assert_eq!(rat(1, 2) * rat(1, 2), rat(1, 4));
        assert_eq!(rat(-2, 3) * rat(1, 1), rat(-2, 3));
        assert_eq!(rat(2, -3) * rat(1, 1), rat(-2, 3));
        assert_eq!(rat(2, 3) * rat(1, -1), rat(-2, 3));
        assert_eq!(rat(10, 1) * rat(1, 100), rat(1, 10));
    }

    #[test]
    fn divide() -> QResult<()> {
        let x = rat(123, 456);
        assert_eq!(x.div(&x)?, Rational::one());
        assert_eq!(rat(-123, 456).div(&x)?, -Rational::one());
        assert_eq!(rat(123, -456).div(&x)?, -Rational::one());
        assert_eq!(rat(-123, -456).div(&x)?, Rational::one());
        assert_eq!(x.div(&rat(-123, -456))?, Rational::one());
        assert_eq!(x.div(&Rational::zero()), Err(QuantityError::DivideByZero));
        assert!(x.div(&x)?.denominator().is_positive());
        Ok(())
    }

    #[test]
    fn add_and_subtract() {
        assert_eq!(rat(2, 7) + rat(3, 7), rat(5, 7));
        assert_eq!(rat(2, -7) + rat(3, 7), rat(1, 7));
        assert_eq!(rat(1, 2) + rat(1, 4), rat(3, 4));
        assert_eq!(rat(9, 10) + rat(1, 10), rat(10, 10));
        assert_eq!(rat(2, 7) - rat(3, 7), rat(-1, 7));
        assert_eq!(rat(2, -7) - rat(3, 7), rat(-5, 7));
        assert_eq!(rat(1, 4) - rat(1, 2), rat(-1, 4));
        assert_eq!(rat(11, 10) - rat(1, 10), rat(10, 10));
        // equal denominators are kept, others multiplied out
        assert_eq!(parts(&(rat(5, 10) + rat(2, 10))), (big(7), big(10)));
        assert_eq!(parts(&(rat(1, 2) + rat(1, 4))), (big(6), big(8)));
    }

    #[test]
    fn power() -> QResult<()> {
        assert_eq!(rat(0, 1).pow(0)?, rat(1, 1));
        assert_eq!(rat(3, 4).pow(0)?, rat(1, 1));
        assert_eq!(rat(-3, 4).pow(0)?, rat(1, 1));
        assert_eq!(rat(3, 4).pow(1)?, rat(3, 4));
        assert_eq!(rat(3, 4).pow(2)?, rat(9, 16));
        assert_eq!(rat(2, 4).pow(2)?, rat(4, 16));
        assert_eq!(rat(-1, 2).pow(3)?, rat(-1, 8));
        assert_eq!(rat(3, 4).pow(-1)?, rat(4, 3));
        assert_eq!(rat(3, 4).pow(-2)?, rat(16, 9));
        assert_eq!(rat(2, 4).pow(-2)?, rat(16, 4));
        assert_eq!(rat(-1, 2).pow(-2)?, rat(4, 1));
        assert_eq!(rat(-1, 2).pow(-3)?, rat(-8, 1));
        assert_eq!(rat(0, 1).pow(-1), Err(QuantityError::DivideByZero));
        Ok(())
    }

    #[test]
    fn negate() {
        assert_eq!(-rat(0, 1), rat(0, 1));
        assert_eq!(-rat(1, 2), rat(-1, 2));
        assert_eq!(-&rat(-2, 3), rat(2, 3));
        assert_eq!(rat(-2, 3).abs(), rat(2, 3));
    }

    #[test]
    fn parse() -> QResult<()> {
        assert_eq!("1/3".parse::<Rational>()?, rat(1, 3));
        assert_eq!("0.5/2".parse::<Rational>()?, rat(1, 4));
        assert_eq!("-2.5".parse::<Rational>()?, rat(-5, 2));
        assert_eq!("1/0".parse::<Rational>(), Err(QuantityError::DivideByZero));
        assert!("1/2/3".parse::<Rational>().is_err());
        Ok(())
    }

    #[test]
    fn format_default() {
        assert_eq!(rat(200, 2).to_string(), "100");
        assert_eq!(rat(3, 2).to_string(), "1.5");
        assert_eq!(rat(-1, 8).to_string(), "-0.125");
        assert_eq!(rat(1, 3).to_string(), "0.(3)");
        assert_eq!(rat(1, 6).to_string(), "0.1(6)");
        assert_eq!(rat(-22, 7).to_string(), "-3.(142857)");
        assert_eq!(rat(0, -5).to_string(), "0");
    }

    #[test]
    fn format_styles() {
        let f = |x: Rational, style| x.format(style).to_string();
        assert_eq!(f(rat(6, 4), FormattingStyle::ExactFraction), "3/2");
        assert_eq!(f(rat(-6, 4), FormattingStyle::MixedFraction), "-1 1/2");
        assert_eq!(f(rat(1, 4), FormattingStyle::MixedFraction), "1/4");
        assert_eq!(f(rat(1, 3), FormattingStyle::ExactFloatWithFractionFallback), "1/3");
        assert_eq!(f(rat(1, 4), FormattingStyle::ExactFloatWithFractionFallback), "0.25");
        assert_eq!(f(rat(2, 3), FormattingStyle::DecimalPlaces(3)), "0.666");
        assert_eq!(f(rat(1, 2), FormattingStyle::DecimalPlaces(3)), "0.5");
        assert_eq!(f(rat(-1, 1000), FormattingStyle::DecimalPlaces(2)), "0");
        assert!(!rat(2, 3).format(FormattingStyle::DecimalPlaces(3)).is_exact());
        assert!(rat(1, 2).format(FormattingStyle::DecimalPlaces(3)).is_exact());
    }

    #[test]
    fn decimal_places_are_capped() {
        let third = rat(1, 3).format(FormattingStyle::DecimalPlaces(usize::MAX));
        assert!(!third.is_exact());
        assert_eq!(third.to_string(), format!("0.{}", "3".repeat(MAX_DECIMAL_PLACES)));
        let half = rat(-1, 2).format(FormattingStyle::DecimalPlaces(usize::MAX));
        assert!(half.is_exact());
        assert_eq!(half.to_string(), "-0.5");
    }

    #[test]
    fn to_f64_of_huge_numerators_is_finite() -> QResult<()> {
        let one_shifted = |bits: usize| BigInt::one() << bits;
        let exact = Rational::new(one_shifted(1010) * 1_048_575, 1_048_575)?;
        assert_eq!(exact.to_f64(), 2f64.powi(1010));
        let third = Rational::new(one_shifted(1025), 3)?.to_f64();
        let expected = 2f64.powi(1023) / 3.0 * 4.0;
        assert!(third.is_finite());
        assert!(((third - expected) / expected).abs() < 1e-15);
        let tiny = Rational::new(1, one_shifted(1100))?.to_f64();
        assert!(tiny >= 0.0 && tiny < 1e-300);
        assert_eq!(Rational::new(one_shifted(1100), 1)?.to_f64(), f64::INFINITY);
        assert_eq!(Rational::new(-(one_shifted(1010)), 7)?.to_f64(), -(2f64.powi(1010) / 7.0));
        Ok(())
    }

    #[test]
    fn long_recurring_blocks_fall_back_to_fractions() {
        // 1/1019 repeats every 1018 digits
        assert_eq!(rat(1, 1019).to_string(), "1/1019");
        assert_eq!(rat(1, 7).to_string(), "0.(142857)");
    }
}
