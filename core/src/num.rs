mod formatting_style;
mod operand;
mod rational;

pub use formatting_style::FormattingStyle;
pub use operand::Operand;
pub use rational::{FormattedRational, Rational};
