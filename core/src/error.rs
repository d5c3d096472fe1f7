use std::{error, fmt};

/// Everything that can go wrong while building or combining numbers, units
/// and quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuantityError {
    DivideByZero,
    ZeroExponent,
    ExponentTooLarge,
    NotAtomic(String),
    ZeroScaleFactor,
    NonFiniteDecimal,
    InvalidNumber(String),
    DuplicateUnit(String),
    UnknownUnit(String),
    IncompatibleUnits { left: String, right: String },
}

/// Coarse classification of a [`QuantityError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DivisionByZero,
    InvalidArgument,
    IncompatibleUnits,
}

impl QuantityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DivideByZero => ErrorKind::DivisionByZero,
            Self::IncompatibleUnits { .. } => ErrorKind::IncompatibleUnits,
            Self::ZeroExponent
            | Self::ExponentTooLarge
            | Self::NotAtomic(_)
            | Self::ZeroScaleFactor
            | Self::NonFiniteDecimal
            | Self::InvalidNumber(_)
            | Self::DuplicateUnit(_)
            | Self::UnknownUnit(_) => ErrorKind::InvalidArgument,
        }
    }

    pub(crate) fn incompatible(left: impl fmt::Display, right: impl fmt::Display) -> Self {
        Self::IncompatibleUnits {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

impl fmt::Display for QuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivideByZero => write!(f, "division by zero"),
            Self::ZeroExponent => write!(f, "unit exponents must not be zero"),
            Self::ExponentTooLarge => write!(f, "exponent too large"),
            Self::NotAtomic(name) => write!(f, "'{}' is not an atomic unit", name),
            Self::ZeroScaleFactor => write!(f, "scale factor of a unit must not be zero"),
            Self::NonFiniteDecimal => {
                write!(f, "cannot convert infinity or NaN to an exact number")
            }
            Self::InvalidNumber(s) => write!(f, "'{}' is not a valid number", s),
            Self::DuplicateUnit(key) => write!(f, "unit '{}' is already defined", key),
            Self::UnknownUnit(key) => write!(f, "unknown unit '{}'", key),
            Self::IncompatibleUnits { left, right } => {
                let show = |s: &String| {
                    if s.is_empty() {
                        "unitless".to_string()
                    } else {
                        s.clone()
                    }
                };
                write!(
                    f,
                    "units are incompatible ({} and {})",
                    show(left),
                    show(right)
                )
            }
        }
    }
}

impl error::Error for QuantityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            QuantityError::DivideByZero.kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            QuantityError::NotAtomic("gram".to_string()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            QuantityError::incompatible("[m^1]", "[s^1]").kind(),
            ErrorKind::IncompatibleUnits
        );
    }

    #[test]
    fn messages() {
        assert_eq!(QuantityError::DivideByZero.to_string(), "division by zero");
        assert_eq!(
            QuantityError::incompatible("[m^1]", "").to_string(),
            "units are incompatible ([m^1] and unitless)"
        );
    }
}
