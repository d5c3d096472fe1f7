use super::{UnitExponent, UnitPowers};
use crate::num::Rational;

/// Picks the name and symbol of a product of units.
///
/// The name is always the bracketed dimension vector. The symbol is written
/// in terms of the operand units where that reads naturally (`km/h`, `dm²`,
/// `m⁴`), is empty when it wouldn't (`1/m`, `km*cm`), and falls back to the
/// bracketed form for everything bigger.
pub(super) fn render(
    base_units: &UnitPowers,
    factors: &[UnitExponent],
    scale: &Rational,
) -> (String, String) {
    if base_units.is_empty() {
        return (String::new(), String::new());
    }
    let name = base_units.to_string();
    let symbol = match compact_symbol(base_units, factors) {
        Some(symbol) if symbol.is_empty() => atomic_power_symbol(base_units, scale),
        Some(symbol) => symbol,
        None => name.clone(),
    };
    (name, symbol)
}

fn compact_symbol(base_units: &UnitPowers, factors: &[UnitExponent]) -> Option<String> {
    match (base_units.len(), factors) {
        (_, [single]) if single.exponent() == 1 && !single.unit().symbol().is_empty() => {
            Some(single.unit().symbol().to_string())
        }
        (1, [single]) => Some(power_symbol(single)),
        (1, _) => Some(String::new()),
        (2, [a, b]) => infix_symbol(a, b),
        _ => None,
    }
}

// `m²` squared is `m⁴`; only unscaled, so `km*cm` isn't mistaken for `m²`
fn atomic_power_symbol(base_units: &UnitPowers, scale: &Rational) -> String {
    match base_units.powers() {
        [power] if power.power().abs() >= 2 && *scale == Rational::one() => {
            let symbol = power.unit().symbol();
            if symbol.is_empty() {
                String::new()
            } else {
                format!("{}{}", symbol, superscript(power.power()))
            }
        }
        _ => String::new(),
    }
}

fn power_symbol(factor: &UnitExponent) -> String {
    let symbol = factor.unit().symbol();
    if factor.exponent().abs() >= 2 && factor.spans_single_atomic() && !symbol.is_empty() {
        format!("{}{}", symbol, superscript(factor.exponent()))
    } else {
        String::new()
    }
}

// factors are in canonical order, so a negative `a` means both are negative
fn infix_symbol(a: &UnitExponent, b: &UnitExponent) -> Option<String> {
    let simple = |f: &UnitExponent| {
        f.exponent().abs() == 1 && f.spans_single_atomic() && !f.unit().symbol().is_empty()
    };
    if !simple(a) || !simple(b) || a.exponent() < 0 {
        return None;
    }
    let op = if b.exponent() > 0 { '*' } else { '/' };
    Some(format!("{}{}{}", a.unit().symbol(), op, b.unit().symbol()))
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|ch| match ch {
            '-' => '\u{207b}',
            '1' => '\u{b9}',
            '2' => '\u{b2}',
            '3' => '\u{b3}',
            // ⁰ and ⁴ through ⁹ are contiguous
            d => char::from_u32(0x2070 + d.to_digit(10).unwrap_or(0)).unwrap_or(d),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superscripts() {
        assert_eq!(superscript(2), "²");
        assert_eq!(superscript(-3), "⁻³");
        assert_eq!(superscript(10), "¹⁰");
        assert_eq!(superscript(-456789), "⁻⁴⁵⁶⁷⁸⁹");
    }
}
