use crate::error::QuantityError;
use crate::num::Rational;
use crate::result::QResult;
use crate::unit::UnitOfMeasure;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static STANDARD: LazyLock<QResult<UnitRegistry>> = LazyLock::new(UnitRegistry::build_standard);

const BASE_UNITS: &[(&str, &str)] = &[
    ("metre", "m"),
    ("second", "s"),
    ("kilogram", "kg"),
    ("ampere", "A"),
    ("kelvin", "K"),
    ("mole", "mol"),
    ("candela", "cd"),
    // plane and solid angles are kept apart from each other
    ("radian", "rad"),
    ("steradian", "sr"),
];

// name, symbol, reference, factor
const SCALED_UNITS: &[(&str, &str, &str, &str)] = &[
    ("kilometre", "km", "m", "1000"),
    ("decimetre", "dm", "m", "0.1"),
    ("centimetre", "cm", "m", "0.01"),
    ("millimetre", "mm", "m", "0.001"),
    ("gram", "g", "kg", "0.001"),
    ("minute", "min", "s", "60"),
    ("hour", "h", "min", "60"),
    ("inch", "in", "cm", "2.54"),
    ("foot", "ft", "in", "12"),
    ("yard", "yd", "ft", "3"),
    ("mile", "mi", "yd", "1760"),
];

/// A read-only table of named units, looked up by name or symbol.
///
/// ```
/// let units = exact_units::UnitRegistry::standard()?;
/// let foot = units.unit("ft")?;
/// assert_eq!(foot.name(), "foot");
/// # Ok::<(), exact_units::QuantityError>(())
/// ```
#[derive(Default)]
pub struct UnitRegistry {
    units: Vec<UnitOfMeasure>,
    by_key: HashMap<String, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry of common SI and imperial units. Built on first
    /// use.
    pub fn standard() -> QResult<&'static Self> {
        (*STANDARD).as_ref().map_err(Clone::clone)
    }

    fn build_standard() -> QResult<Self> {
        let mut registry = Self::new();
        for (name, symbol) in BASE_UNITS {
            registry.define_base(*name, *symbol)?;
        }
        for (name, symbol, reference, factor) in SCALED_UNITS {
            let reference = registry.unit(reference)?;
            registry.define_scaled(*name, *symbol, &reference, factor.parse()?)?;
        }

        let m = registry.unit("m")?;
        let dm = registry.unit("dm")?;
        let s = registry.unit("s")?;
        let h = registry.unit("h")?;
        let kg = registry.unit("kg")?;
        let one = Rational::one;
        registry.define_scaled("square metre", "m²", &m.pow(2)?, one())?;
        registry.define_scaled("square decimetre", "dm²", &dm.pow(2)?, one())?;
        registry.define_scaled("metre per second", "m/s", &m.div(&s)?, one())?;
        let kmh = registry.unit("km")?.div(&h)?;
        registry.define_scaled("kilometre per hour", "km/h", &kmh, one())?;
        let mph = registry.unit("mi")?.div(&h)?;
        registry.define_scaled("mile per hour", "mph", &mph, one())?;

        let newton = kg.mul(&m)?.div(&s.pow(2)?)?;
        let newton = registry.define_scaled("newton", "N", &newton, one())?;
        let joule = registry.define_scaled("joule", "J", &newton.mul(&m)?, one())?;
        let watt = registry.define_scaled("watt", "W", &joule.div(&s)?, one())?;
        registry.define_scaled("kilowatt", "kW", &watt, Rational::from(1000))?;
        registry.define_scaled("metric horsepower", "PS", &watt, "735.49875".parse()?)?;

        let percent = Rational::new(1, 100)?;
        registry.define_scaled("percent", "%", &UnitOfMeasure::dimensionless(), percent)?;
        Ok(registry)
    }

    /// Registers `unit` under its name and symbol.
    pub fn insert(&mut self, unit: UnitOfMeasure) -> QResult<UnitOfMeasure> {
        let mut keys = vec![unit.name().to_string()];
        if unit.symbol() != unit.name() {
            keys.push(unit.symbol().to_string());
        }
        keys.retain(|key| !key.is_empty());
        if let Some(key) = keys.iter().find(|key| self.by_key.contains_key(*key)) {
            return Err(QuantityError::DuplicateUnit(key.clone()));
        }
        let index = self.units.len();
        for key in keys {
            self.by_key.insert(key, index);
        }
        self.units.push(unit.clone());
        Ok(unit)
    }

    pub fn define_base(
        &mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> QResult<UnitOfMeasure> {
        self.insert(UnitOfMeasure::base(name, symbol))
    }

    pub fn define_scaled(
        &mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        reference: &UnitOfMeasure,
        factor: Rational,
    ) -> QResult<UnitOfMeasure> {
        self.insert(UnitOfMeasure::scaled(name, symbol, reference, factor)?)
    }

    /// Looks up a unit by its exact name or symbol.
    pub fn get(&self, key: &str) -> Option<&UnitOfMeasure> {
        self.by_key.get(key).map(|&index| &self.units[index])
    }

    pub fn unit(&self, key: &str) -> QResult<UnitOfMeasure> {
        self.get(key)
            .cloned()
            .ok_or_else(|| QuantityError::UnknownUnit(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, UnitOfMeasure> {
        self.units.iter()
    }
}

impl fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.units.iter().map(UnitOfMeasure::to_string))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn standard_units() -> QResult<()> {
        let units = UnitRegistry::standard()?;
        assert!(units.unit("m")?.is_atomic());
        assert_eq!(units.unit("metre")?, units.unit("m")?);
        assert_eq!(units.unit("h")?.scale(), &Rational::from(3600));
        assert_eq!(units.unit("ft")?.scale(), &"0.3048".parse::<Rational>()?);
        assert_eq!(units.unit("mi")?.scale(), &"1609.344".parse::<Rational>()?);
        assert_eq!(units.unit("km/h")?.scale(), &Rational::new(5, 18)?);
        assert_eq!(units.unit("N")?.base_units().to_string(), "[kg^1][m^1][s^-2]");
        assert_eq!(
            units.unit("W")?.base_units().to_string(),
            "[kg^1][m^2][s^-3]"
        );
        assert!(units.unit("%")?.is_dimensionless());
        Ok(())
    }

    #[test]
    fn standard_is_shared() -> QResult<()> {
        let a = UnitRegistry::standard()?;
        let b = UnitRegistry::standard()?;
        assert!(std::ptr::eq(a, b));
        Ok(())
    }

    #[test]
    fn unknown_units() -> QResult<()> {
        let units = UnitRegistry::standard()?;
        assert!(units.get("furlong").is_none());
        assert_eq!(
            units.unit("m/s^2"),
            Err(QuantityError::UnknownUnit("m/s^2".to_string()))
        );
        Ok(())
    }

    #[test]
    fn duplicate_keys() -> QResult<()> {
        let mut units = UnitRegistry::new();
        let m = units.define_base("metre", "m")?;
        assert_eq!(
            units.define_base("metre", "M").map(|u| u.to_string()),
            Err(QuantityError::DuplicateUnit("metre".to_string()))
        );
        assert_eq!(
            units
                .define_scaled("millimetre", "m", &m, Rational::new(1, 1000)?)
                .map(|u| u.to_string()),
            Err(QuantityError::DuplicateUnit("m".to_string()))
        );
        assert_eq!(units.len(), 1);
        Ok(())
    }

    #[test]
    fn angles_are_distinct() -> QResult<()> {
        let units = UnitRegistry::standard()?;
        let rad = Value::new(1, &units.unit("rad")?);
        let sr = Value::new(1, &units.unit("sr")?);
        assert!(rad.add(&rad)?.x() == &Rational::from(2));
        assert!(rad.add(&sr).is_err());
        Ok(())
    }
}
