use proptest::prelude::*;
use crate::spec::{DiceSpec, ALLOWED_SIDES};


pub(crate) fn sides_strategy() -> impl Strategy<Value = u16> {
    prop::sample::select(ALLOWED_SIDES.to_vec())
}

pub(crate) fn spec_strategy() -> impl Strategy<Value = DiceSpec> {
    (sides_strategy(), 1u16..=40, -50i32..=50).prop_map(|(sides, count, modifier)| {
        DiceSpec::builder(sides)
            .count(count)
            .modifier(modifier)
            .build()
            .unwrap()
    })
}

/// Produces a valid notation string together with the specification it
/// should parse to. Counts are sometimes omitted and zero modifiers are
/// sometimes written out as an explicit `+0`.
pub(crate) fn notation_strategy() -> impl Strategy<Value = (String, DiceSpec)> {
    (
        sides_strategy(),
        prop::option::of(1u16..=40),
        -50i32..=50,
        any::<bool>(),
    ).prop_map(|(sides, count, modifier, explicit_zero)| {
        let mut notation = String::new();

        if let Some(count) = count {
            notation.push_str(&count.to_string());
        }

        notation.push('d');
        notation.push_str(&sides.to_string());

        if modifier > 0 || (modifier == 0 && explicit_zero) {
            notation.push_str(&format!("+{modifier}"));
        } else if modifier < 0 {
            notation.push_str(&modifier.to_string());
        }

        let spec = DiceSpec::builder(sides)
            .count(count.unwrap_or(1))
            .modifier(modifier)
            .build()
            .unwrap();

        (notation, spec)
    })
}
