//! Exact arithmetic on physical quantities.
//!
//! A [`Value`] pairs an exact [`Rational`] magnitude with a
//! [`UnitOfMeasure`]. Adding, converting and comparing values checks their
//! dimensions and never loses precision:
//!
//! ```
//! use exact_units::{UnitRegistry, Value};
//!
//! let units = UnitRegistry::standard()?;
//! let a = Value::new(80, &units.unit("cm")?);
//! let b = Value::new(2, &units.unit("dm")?);
//! assert_eq!(a.add(&b)?.to_string(), "100 cm");
//!
//! let speed = Value::new(1, &units.unit("m")?).div_unit(&units.unit("s")?)?;
//! let kmh = units.unit("km/h")?;
//! assert_eq!(speed.convert_to(&kmh)?.to_string(), "3.6 km/h");
//! # Ok::<(), exact_units::QuantityError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod num;
mod registry;
mod result;
mod unit;
mod value;

pub use error::{ErrorKind, QuantityError};
pub use num::{FormattedRational, FormattingStyle, Operand, Rational};
pub use registry::UnitRegistry;
pub use result::QResult;
pub use unit::{UnitExponent, UnitOfMeasure, UnitPower, UnitPowers};
pub use value::{FormattedValue, Value};

