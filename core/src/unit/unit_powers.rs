use super::{UnitOfMeasure, UnitPower};
use crate::error::QuantityError;
use crate::result::QResult;
use std::fmt;

/// Merges `(unit, exponent)` pairs by unit identity.
///
/// Entries keep the order in which their unit first appeared, sums of zero
/// are dropped, and positive exponents are moved in front of negative ones.
pub(super) fn canonicalize(
    entries: impl IntoIterator<Item = (UnitOfMeasure, i32)>,
) -> QResult<Vec<(UnitOfMeasure, i32)>> {
    let mut merged: Vec<(UnitOfMeasure, i32)> = Vec::new();
    for (unit, exponent) in entries {
        match merged.iter_mut().find(|(u, _)| *u == unit) {
            Some((_, sum)) => {
                *sum = sum
                    .checked_add(exponent)
                    .ok_or(QuantityError::ExponentTooLarge)?;
            }
            None => merged.push((unit, exponent)),
        }
    }
    let (positive, negative): (Vec<_>, Vec<_>) = merged
        .into_iter()
        .filter(|(_, exponent)| *exponent != 0)
        .partition(|(_, exponent)| *exponent > 0);
    Ok(positive.into_iter().chain(negative).collect())
}

/// A dimension vector: atomic units with nonzero integer exponents.
///
/// No unit appears twice. Equality ignores order, but iteration always
/// yields positive powers first and otherwise keeps the order in which units
/// were first combined, so `[m^1][s^-1]` stays `[m^1][s^-1]`.
#[derive(Clone, Default)]
pub struct UnitPowers {
    powers: Vec<UnitPower>,
}

impl UnitPowers {
    /// Builds a dimension vector from `(atomic unit, power)` pairs, merging
    /// repeated units.
    pub fn new(pairs: impl IntoIterator<Item = (UnitOfMeasure, i32)>) -> QResult<Self> {
        let mut checked = Vec::new();
        for (unit, power) in pairs {
            let power = UnitPower::new(unit, power)?;
            checked.push((power.unit().clone(), power.power()));
        }
        Self::from_pairs(checked)
    }

    /// The empty vector.
    pub fn dimensionless() -> Self {
        Self::default()
    }

    pub(super) fn of_atomic(unit: UnitOfMeasure) -> Self {
        Self {
            powers: vec![UnitPower::new_unchecked(unit, 1)],
        }
    }

    fn from_pairs(pairs: impl IntoIterator<Item = (UnitOfMeasure, i32)>) -> QResult<Self> {
        let powers = canonicalize(pairs)?
            .into_iter()
            .map(|(unit, power)| UnitPower::new_unchecked(unit, power))
            .collect();
        Ok(Self { powers })
    }

    fn pairs(&self) -> impl Iterator<Item = (UnitOfMeasure, i32)> + '_ {
        self.powers.iter().map(|p| (p.unit().clone(), p.power()))
    }

    pub fn mul(&self, other: &Self) -> QResult<Self> {
        Self::from_pairs(self.pairs().chain(other.pairs()))
    }

    pub fn div(&self, other: &Self) -> QResult<Self> {
        let mut negated = Vec::with_capacity(other.len());
        for (unit, power) in other.pairs() {
            let power = power
                .checked_neg()
                .ok_or(QuantityError::ExponentTooLarge)?;
            negated.push((unit, power));
        }
        Self::from_pairs(self.pairs().chain(negated))
    }

    /// Multiplies every exponent by `n`. `pow(0)` is dimensionless.
    pub fn pow(&self, n: i32) -> QResult<Self> {
        if n == 0 {
            return Ok(Self::dimensionless());
        }
        let mut powers = Vec::with_capacity(self.len());
        for (unit, power) in self.pairs() {
            let power = power
                .checked_mul(n)
                .ok_or(QuantityError::ExponentTooLarge)?;
            powers.push((unit, power));
        }
        Self::from_pairs(powers)
    }

    pub fn recip(&self) -> QResult<Self> {
        self.pow(-1)
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnitPower> {
        self.powers.iter()
    }

    pub fn powers(&self) -> &[UnitPower] {
        &self.powers
    }

    /// The exponent of `unit` in this vector, zero if it doesn't appear.
    pub fn power_of(&self, unit: &UnitOfMeasure) -> i32 {
        self.powers
            .iter()
            .find(|p| p.unit() == unit)
            .map_or(0, UnitPower::power)
    }
}

impl PartialEq for UnitPowers {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .powers
                .iter()
                .all(|p| other.power_of(p.unit()) == p.power())
    }
}

impl Eq for UnitPowers {}

impl<'a> IntoIterator for &'a UnitPowers {
    type Item = &'a UnitPower;
    type IntoIter = std::slice::Iter<'a, UnitPower>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for UnitPowers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for power in &self.powers {
            write!(f, "{}", power)?;
        }
        Ok(())
    }
}

impl fmt::Debug for UnitPowers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(dimensionless)")
        } else {
            write!(f, "{}", self)
        }
    }
}
