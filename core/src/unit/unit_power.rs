use super::UnitOfMeasure;
use crate::error::QuantityError;
use crate::result::QResult;
use std::fmt;

/// One atomic unit raised to a nonzero integer power, e.g. `s^-2`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnitPower {
    unit: UnitOfMeasure,
    power: i32,
}

impl UnitPower {
    pub fn new(unit: UnitOfMeasure, power: i32) -> QResult<Self> {
        if !unit.is_atomic() {
            return Err(QuantityError::NotAtomic(unit.name().to_string()));
        }
        if power == 0 {
            return Err(QuantityError::ZeroExponent);
        }
        Ok(Self { unit, power })
    }

    // callers guarantee an atomic unit and a nonzero power
    pub(super) fn new_unchecked(unit: UnitOfMeasure, power: i32) -> Self {
        Self { unit, power }
    }

    pub fn unit(&self) -> &UnitOfMeasure {
        &self.unit
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub(super) fn label(&self) -> &str {
        if self.unit.symbol().is_empty() {
            self.unit.name()
        } else {
            self.unit.symbol()
        }
    }
}

impl fmt::Display for UnitPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}^{}]", self.label(), self.power)
    }
}

impl fmt::Debug for UnitPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.label(), self.power)
    }
}
