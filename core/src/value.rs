use crate::num::{FormattedRational, FormattingStyle, Rational};
use crate::result::QResult;
use crate::unit::UnitOfMeasure;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// An exact physical quantity: a rational magnitude in some unit.
///
/// All arithmetic checks dimensions. Magnitudes are kept in lowest terms.
#[derive(Clone)]
pub struct Value {
    x: Rational,
    unit: UnitOfMeasure,
}

impl Value {
    pub fn new(x: impl Into<Rational>, unit: &UnitOfMeasure) -> Self {
        Self {
            x: x.into().simplified(),
            unit: unit.clone(),
        }
    }

    /// `Value::from_f64(3.6, &kmh)` is exactly 36/10 km/h.
    pub fn from_f64(x: f64, unit: &UnitOfMeasure) -> QResult<Self> {
        Ok(Self::new(Rational::from_f64(x)?, unit))
    }

    /// A pure number.
    pub fn dimensionless(x: impl Into<Rational>) -> Self {
        Self::new(x, &UnitOfMeasure::dimensionless())
    }

    /// The magnitude, expressed in [`unit`](Self::unit).
    pub fn x(&self) -> &Rational {
        &self.x
    }

    pub fn unit(&self) -> &UnitOfMeasure {
        &self.unit
    }

    /// Adds `other`, converting it into this value's unit first.
    pub fn add(&self, other: &Self) -> QResult<Self> {
        self.unit.check_compatible(&other.unit)?;
        let factor = other.unit.conversion_factor(&self.unit)?;
        Ok(Self::new(&self.x + &other.x * factor, &self.unit))
    }

    /// Subtracts `other`, converting it into this value's unit first.
    pub fn sub(&self, other: &Self) -> QResult<Self> {
        self.unit.check_compatible(&other.unit)?;
        let factor = other.unit.conversion_factor(&self.unit)?;
        Ok(Self::new(&self.x - &other.x * factor, &self.unit))
    }

    pub fn mul(&self, other: &Self) -> QResult<Self> {
        Ok(Self::new(&self.x * &other.x, &self.unit.mul(&other.unit)?))
    }

    pub fn div(&self, other: &Self) -> QResult<Self> {
        Ok(Self::new(self.x.div(&other.x)?, &self.unit.div(&other.unit)?))
    }

    /// `Value::new(1, &m).div_unit(&s)` is one metre per second.
    pub fn mul_unit(&self, unit: &UnitOfMeasure) -> QResult<Self> {
        Ok(Self::new(self.x.clone(), &self.unit.mul(unit)?))
    }

    pub fn div_unit(&self, unit: &UnitOfMeasure) -> QResult<Self> {
        Ok(Self::new(self.x.clone(), &self.unit.div(unit)?))
    }

    pub fn mul_scalar(&self, factor: &Rational) -> Self {
        Self::new(&self.x * factor, &self.unit)
    }

    pub fn div_scalar(&self, divisor: &Rational) -> QResult<Self> {
        Ok(Self::new(self.x.div(divisor)?, &self.unit))
    }

    pub fn pow(&self, n: i32) -> QResult<Self> {
        Ok(Self::new(self.x.pow(n)?, &self.unit.pow(n)?))
    }

    /// `1 / self`, e.g. 2 m becomes 0.5 m⁻¹.
    pub fn recip(&self) -> QResult<Self> {
        self.pow(-1)
    }

    /// The same quantity expressed in `target`.
    pub fn convert_to(&self, target: &UnitOfMeasure) -> QResult<Self> {
        let factor = self.unit.conversion_factor(target)?;
        Ok(Self::new(&self.x * factor, target))
    }

    /// The magnitude in terms of the atomic units of the dimension.
    pub fn to_base(&self) -> Rational {
        (&self.x * self.unit.scale()).simplified()
    }

    /// Lossy.
    pub fn to_f64(&self) -> f64 {
        self.x.to_f64()
    }

    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.unit.is_compatible_with(&other.unit)
    }

    /// Orders two quantities of the same dimension.
    pub fn compare(&self, other: &Self) -> QResult<Ordering> {
        self.unit.check_compatible(&other.unit)?;
        Ok(self.to_base().cmp(&other.to_base()))
    }

    pub fn format(&self, style: FormattingStyle) -> FormattedValue {
        if self.unit.has_own_symbol() {
            FormattedValue {
                magnitude: self.x.format(style),
                unit: self.unit.symbol().to_string(),
            }
        } else {
            FormattedValue {
                magnitude: self.to_base().format(style),
                unit: self.unit.base_units().to_string(),
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ok(Ordering::Equal)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl Neg for Value {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            unit: self.unit,
        }
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value {
            x: -&self.x,
            unit: self.unit.clone(),
        }
    }
}

impl From<Rational> for Value {
    fn from(x: Rational) -> Self {
        Self::dimensionless(x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(FormattingStyle::default()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.x, self.unit.name())
    }
}

/// A [`Value`] rendered as text, see [`Value::format`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedValue {
    magnitude: FormattedRational,
    unit: String,
}

impl FormattedValue {
    pub fn is_exact(&self) -> bool {
        self.magnitude.is_exact()
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}
