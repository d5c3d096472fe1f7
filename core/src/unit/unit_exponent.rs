use super::UnitOfMeasure;
use std::fmt;

/// A unit as it was written in a product, together with its exponent.
///
/// Unlike [`UnitPower`](super::UnitPower), the unit doesn't need to be atomic:
/// `km/h` is remembered as `km^1 h^-1` so that it can be shown as `km/h`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnitExponent {
    unit: UnitOfMeasure,
    exponent: i32,
}

impl UnitExponent {
    pub(super) fn new(unit: UnitOfMeasure, exponent: i32) -> Self {
        Self { unit, exponent }
    }

    pub fn unit(&self) -> &UnitOfMeasure {
        &self.unit
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    // true for units like `km` or `h`, but not `m^2` or `m/s`
    pub(super) fn spans_single_atomic(&self) -> bool {
        let base_units = self.unit.base_units();
        base_units.len() == 1 && base_units.powers()[0].power() == 1
    }
}

impl fmt::Debug for UnitExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit)?;
        if self.exponent != 1 {
            write!(f, "^{}", self.exponent)?;
        }
        Ok(())
    }
}
