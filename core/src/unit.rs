use crate::error::QuantityError;
use crate::num::Rational;
use crate::result::QResult;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

mod symbol;
mod unit_exponent;
mod unit_power;
mod unit_powers;

pub use unit_exponent::UnitExponent;
pub use unit_power::UnitPower;
pub use unit_powers::UnitPowers;

static DIMENSIONLESS: LazyLock<UnitOfMeasure> = LazyLock::new(|| {
    UnitOfMeasure::from_data(UnitData {
        name: String::new(),
        symbol: String::new(),
        scale: Rational::one(),
        kind: UnitKind::Composite {
            base_units: UnitPowers::dimensionless(),
            exponents: vec![],
        },
        is_base_unit: true,
    })
});

/// A unit of measure: a name, a symbol, a scale factor and a dimension.
///
/// Units are cheap to clone shared handles. Two units are equal only if
/// they are the same handle; a second `metre` built with the same name is a
/// different, incompatible unit.
#[derive(Clone)]
pub struct UnitOfMeasure {
    inner: Arc<UnitData>,
}

struct UnitData {
    name: String,
    symbol: String,
    // converts one of this unit into base-dimension terms
    scale: Rational,
    kind: UnitKind,
    is_base_unit: bool,
}

enum UnitKind {
    // the dimension is the unit itself, to the first power
    Atomic,
    // named unit defined as a multiple of another one
    Scaled {
        base_units: UnitPowers,
    },
    // product of powers of other units, remembering how it was written
    Composite {
        base_units: UnitPowers,
        exponents: Vec<UnitExponent>,
    },
}

impl UnitOfMeasure {
    fn from_data(data: UnitData) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }

    /// Creates a new atomic unit with scale 1, such as the metre.
    pub fn base(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::from_data(UnitData {
            name: name.into(),
            symbol: symbol.into(),
            scale: Rational::one(),
            kind: UnitKind::Atomic,
            is_base_unit: true,
        })
    }

    /// Creates a unit worth `factor` times `reference`, with the same
    /// dimension, e.g. `foot = scaled("foot", "ft", &inch, 12)`.
    pub fn scaled(
        name: impl Into<String>,
        symbol: impl Into<String>,
        reference: &Self,
        factor: Rational,
    ) -> QResult<Self> {
        if factor.is_zero() {
            return Err(QuantityError::ZeroScaleFactor);
        }
        let is_base_unit = reference.is_dimensionless() && factor == Rational::one();
        Ok(Self::from_data(UnitData {
            name: name.into(),
            symbol: symbol.into(),
            scale: (&factor * reference.scale()).simplified(),
            kind: UnitKind::Scaled {
                base_units: reference.base_units().into_owned(),
            },
            is_base_unit,
        }))
    }

    /// The unit of pure numbers. Always the same handle.
    pub fn dimensionless() -> Self {
        DIMENSIONLESS.clone()
    }

    fn composite(scale: Rational, base_units: UnitPowers, exponents: Vec<UnitExponent>) -> Self {
        let (name, symbol) = symbol::render(&base_units, &exponents, &scale);
        let is_base_unit = base_units.is_empty() && scale == Rational::one();
        Self::from_data(UnitData {
            name,
            symbol,
            scale: scale.simplified(),
            kind: UnitKind::Composite {
                base_units,
                exponents,
            },
            is_base_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn symbol(&self) -> &str {
        &self.inner.symbol
    }

    pub fn scale(&self) -> &Rational {
        &self.inner.scale
    }

    /// The dimension of this unit in terms of atomic units.
    pub fn base_units(&self) -> Cow<'_, UnitPowers> {
        match &self.inner.kind {
            UnitKind::Atomic => Cow::Owned(UnitPowers::of_atomic(self.clone())),
            UnitKind::Scaled { base_units } | UnitKind::Composite { base_units, .. } => {
                Cow::Borrowed(base_units)
            }
        }
    }

    /// The operand units this unit was composed from. Named units are their
    /// own single operand; the dimensionless unit has none.
    pub fn exponents(&self) -> Vec<UnitExponent> {
        match &self.inner.kind {
            UnitKind::Composite { exponents, .. } => exponents.clone(),
            UnitKind::Atomic | UnitKind::Scaled { .. } => {
                vec![UnitExponent::new(self.clone(), 1)]
            }
        }
    }

    pub fn is_base_unit(&self) -> bool {
        self.inner.is_base_unit
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self.inner.kind, UnitKind::Atomic)
    }

    pub fn is_dimensionless(&self) -> bool {
        match &self.inner.kind {
            UnitKind::Atomic => false,
            UnitKind::Scaled { base_units } | UnitKind::Composite { base_units, .. } => {
                base_units.is_empty()
            }
        }
    }

    /// Whether quantities in `self` and `other` can be added or converted.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.base_units() == other.base_units()
    }

    /// The factor that turns a magnitude in `self` into one in `into`.
    pub fn conversion_factor(&self, into: &Self) -> QResult<Rational> {
        self.check_compatible(into)?;
        Ok(self.scale().div(into.scale())?.simplified())
    }

    pub(crate) fn check_compatible(&self, other: &Self) -> QResult<()> {
        if self.is_compatible_with(other) {
            Ok(())
        } else {
            Err(QuantityError::incompatible(
                self.base_units(),
                other.base_units(),
            ))
        }
    }

    /// True if the symbol names this unit itself, rather than being empty
    /// or the bracketed dimension.
    pub(crate) fn has_own_symbol(&self) -> bool {
        !self.symbol().is_empty()
            && !(matches!(self.inner.kind, UnitKind::Composite { .. })
                && self.symbol() == self.name())
    }

    fn powered_exponents(&self, n: i32) -> QResult<Vec<(UnitOfMeasure, i32)>> {
        let mut powered = vec![];
        for exponent in self.exponents() {
            let e = exponent
                .exponent()
                .checked_mul(n)
                .ok_or(QuantityError::ExponentTooLarge)?;
            powered.push((exponent.unit().clone(), e));
        }
        Ok(powered)
    }

    fn combine(&self, other: &Self, other_sign: i32) -> QResult<Self> {
        let (scale, base_units) = if other_sign < 0 {
            (
                self.scale().div(other.scale())?,
                self.base_units().div(&other.base_units())?,
            )
        } else {
            (
                self.scale() * other.scale(),
                self.base_units().mul(&other.base_units())?,
            )
        };
        let exponents = unit_powers::canonicalize(
            self.powered_exponents(1)?
                .into_iter()
                .chain(other.powered_exponents(other_sign)?),
        )?;
        Ok(Self::composite(
            scale,
            base_units,
            exponents
                .into_iter()
                .map(|(unit, e)| UnitExponent::new(unit, e))
                .collect(),
        ))
    }

    pub fn mul(&self, other: &Self) -> QResult<Self> {
        self.combine(other, 1)
    }

    pub fn div(&self, other: &Self) -> QResult<Self> {
        self.combine(other, -1)
    }

    pub fn pow(&self, n: i32) -> QResult<Self> {
        let exponents = unit_powers::canonicalize(self.powered_exponents(n)?)?;
        Ok(Self::composite(
            self.scale().pow(n)?,
            self.base_units().pow(n)?,
            exponents
                .into_iter()
                .map(|(unit, e)| UnitExponent::new(unit, e))
                .collect(),
        ))
    }

    pub fn recip(&self) -> QResult<Self> {
        self.pow(-1)
    }
}

impl PartialEq for UnitOfMeasure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for UnitOfMeasure {}

impl Hash for UnitOfMeasure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbol().is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{}", self.symbol())
        }
    }
}

impl fmt::Debug for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.inner.kind {
            UnitKind::Atomic => "atomic",
            UnitKind::Scaled { .. } => "scaled",
            UnitKind::Composite { .. } => "composite",
        };
        f.debug_struct("UnitOfMeasure")
            .field("name", &self.name())
            .field("symbol", &self.symbol())
            .field("kind", &kind)
            .field("scale", self.scale())
            .field("base_units", &self.base_units())
            .finish()
    }
}
