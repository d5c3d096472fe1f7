/// Controls how exact numbers are turned into text.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[must_use]
pub enum FormattingStyle {
    /// Print as an exact float, indicating recurring digits
    /// with parentheses, e.g. 7/9 => 0.(7)
    #[default]
    ExactFloat,
    /// If possible, print as an exact float with no recurring digits,
    /// or fall back to an exact fraction
    ExactFloatWithFractionFallback,
    /// Print value as an exact fraction
    ExactFraction,
    /// Print as an exact mixed fraction, e.g. 1 1/2
    MixedFraction,
    /// Print with at most this many decimal places, truncating the rest.
    /// Requests beyond 10 000 places are cut down to that.
    DecimalPlaces(usize),
}
