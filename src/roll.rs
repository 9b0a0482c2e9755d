use std::{fmt::Display, ops::Deref};
use rand::Rng;
use crate::{DiceSpec, Error};


impl DiceSpec {
    /// Rolls the specified dice and returns the outcome.
    ///
    /// Each die draws a uniformly distributed integer in `[1, sides]` from
    /// `rand::rng()`, recorded in generation order. The modifier is added to
    /// the summed outcomes to produce the total.
    ///
    /// Every call is an independent roll producing a fresh [`RollResult`];
    /// results never accumulate across calls.
    ///
    /// # Examples
    /// ```
    /// use dicebag::DiceSpec;
    ///
    /// let spec = DiceSpec::parse("2d6+3").unwrap();
    /// let result = spec.roll();
    ///
    /// assert_eq!(result.outcomes().len(), 2);
    /// assert!(result.total() >= 5 && result.total() <= 15);
    /// ```
    pub fn roll(&self) -> RollResult {
        let mut rng = rand::rng();

        let outcomes = (0..self.count())
            .map(|_| rng.random_range(1..=self.sides()))
            .collect();

        RollResult::new(self.clone(), outcomes)
    }
}


/// Parses dice notation and immediately rolls it.
///
/// # Errors
/// Returns any [`Error`] produced by [`DiceSpec::parse`]; rolling itself
/// cannot fail.
///
/// # Examples
/// ```
/// use dicebag::roll_notation;
///
/// let result = roll_notation("2d6+3").unwrap();
/// assert!(result.total() >= 5 && result.total() <= 15);
///
/// assert!(roll_notation("2d20d5").is_err());
/// ```
pub fn roll_notation(notation: &str) -> Result<RollResult, Error> {
    Ok(DiceSpec::parse(notation)?.roll())
}


/// The immutable outcome of rolling a [`DiceSpec`] exactly once.
///
/// Outcomes are stored in generation order; roll indices are 1-based. The
/// total already includes the modifier. For d20 rolls the best and worst
/// individual outcomes are exposed as [`RollResult::advantage`] and
/// [`RollResult::disadvantage`]; for every other die they are `None`.
///
/// Dereferences to `[u16]` for direct slice operations on the outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    spec: DiceSpec,
    outcomes: Vec<u16>,
    total: i32,
    advantage: Option<u16>,
    disadvantage: Option<u16>,
}

impl RollResult {
    /// Creates a `RollResult` from a specification and its per-die outcomes.
    ///
    /// The total, advantage, and disadvantage are derived here, so a result
    /// can never disagree with its outcomes.
    ///
    /// # Examples
    /// ```
    /// use dicebag::{DiceSpec, RollResult};
    ///
    /// let spec = DiceSpec::parse("2d6+3").unwrap();
    /// let result = RollResult::new(spec, vec![4, 2]);
    ///
    /// assert_eq!(result.total(), 9);
    /// assert_eq!(result.advantage(), None);
    /// ```
    pub fn new(spec: DiceSpec, outcomes: Vec<u16>) -> Self {
        let total = outcomes.iter().map(|&outcome| outcome as i32).sum::<i32>() + spec.modifier();

        // Advantage and disadvantage are a d20 convention only.
        let (advantage, disadvantage) = if spec.sides() == 20 {
            (
                outcomes.iter().copied().max(),
                outcomes.iter().copied().min(),
            )
        } else {
            (None, None)
        };

        Self { spec, outcomes, total, advantage, disadvantage }
    }

    /// The specification this result was rolled from.
    pub const fn spec(&self) -> &DiceSpec {
        &self.spec
    }

    /// The individual die outcomes, in generation order.
    pub fn outcomes(&self) -> &[u16] {
        &self.outcomes
    }

    /// Iterates over `(roll_index, outcome)` pairs, indexed from 1.
    ///
    /// # Examples
    /// ```
    /// use dicebag::{DiceSpec, RollResult};
    ///
    /// let spec = DiceSpec::parse("2d6").unwrap();
    /// let result = RollResult::new(spec, vec![4, 2]);
    ///
    /// let rolls: Vec<(usize, u16)> = result.rolls().collect();
    /// assert_eq!(rolls, vec![(1, 4), (2, 2)]);
    /// ```
    pub fn rolls(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .map(|(index, &outcome)| (index + 1, outcome))
    }

    /// The sum of all outcomes plus the modifier.
    pub const fn total(&self) -> i32 {
        self.total
    }

    /// The highest individual outcome, for d20 rolls only.
    pub const fn advantage(&self) -> Option<u16> {
        self.advantage
    }

    /// The lowest individual outcome, for d20 rolls only.
    pub const fn disadvantage(&self) -> Option<u16> {
        self.disadvantage
    }
}

impl Deref for RollResult {
    type Target = [u16];

    fn deref(&self) -> &Self::Target {
        &self.outcomes
    }
}

impl Display for RollResult {
    /// Formats a human-readable summary of the roll.
    ///
    /// # Examples
    /// ```
    /// use dicebag::{DiceSpec, RollResult};
    ///
    /// let spec = DiceSpec::parse("2d6+3").unwrap();
    /// let result = RollResult::new(spec, vec![4, 2]);
    ///
    /// let expected = "\
    /// Selected dice: 2d6+3
    ///   Modifier: 3
    /// Rolls:
    ///   Roll #1: 4
    ///   Roll #2: 2
    /// Total: 9";
    /// assert_eq!(format!("{result}"), expected);
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Selected dice: {}", self.spec)?;
        writeln!(f, "  Modifier: {}", self.spec.modifier())?;

        writeln!(f, "Rolls:")?;
        for (index, outcome) in self.rolls() {
            writeln!(f, "  Roll #{index}: {outcome}")?;
        }

        if let (Some(advantage), Some(disadvantage)) = (self.advantage, self.disadvantage) {
            writeln!(f, "  Advantage: {advantage}")?;
            writeln!(f, "  Disadvantage: {disadvantage}")?;
        }

        write!(f, "Total: {}", self.total)
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;
    use crate::test_strategies::*;


    proptest! {
        #[test]
        fn test_roll_outcomes_in_range(spec in spec_strategy()) {
            let result = spec.roll();

            prop_assert_eq!(result.outcomes().len(), spec.count() as usize);
            for &outcome in result.outcomes() {
                prop_assert!(outcome >= 1 && outcome <= spec.sides());
            }
        }

        #[test]
        fn test_roll_total_includes_modifier(spec in spec_strategy()) {
            let result = spec.roll();

            let sum: i32 = result.outcomes().iter().map(|&outcome| outcome as i32).sum();
            prop_assert_eq!(result.total(), sum + spec.modifier());
            prop_assert!(result.total() >= spec.min());
            prop_assert!(result.total() <= spec.max());
        }

        #[test]
        fn test_advantage_only_for_d20(spec in spec_strategy()) {
            let result = spec.roll();

            if spec.sides() == 20 {
                let max = result.outcomes().iter().copied().max();
                let min = result.outcomes().iter().copied().min();

                prop_assert_eq!(result.advantage(), max);
                prop_assert_eq!(result.disadvantage(), min);
            } else {
                prop_assert_eq!(result.advantage(), None);
                prop_assert_eq!(result.disadvantage(), None);
            }
        }

        #[test]
        fn test_roll_indices_are_one_based(spec in spec_strategy()) {
            let result = spec.roll();

            let indices: Vec<usize> = result.rolls().map(|(index, _)| index).collect();
            let expected: Vec<usize> = (1..=spec.count() as usize).collect();
            prop_assert_eq!(indices, expected);
        }

        #[test]
        fn test_repeated_rolls_are_independent(spec in spec_strategy()) {
            let first = spec.roll();
            let second = spec.roll();

            // Each call is a fresh roll; nothing accumulates.
            prop_assert_eq!(first.outcomes().len(), spec.count() as usize);
            prop_assert_eq!(second.outcomes().len(), spec.count() as usize);
            prop_assert!(first.total() <= spec.max() && second.total() <= spec.max());
            prop_assert!(first.total() >= spec.min() && second.total() >= spec.min());
        }

        #[test]
        fn test_roll_notation_matches_parse((notation, expected) in notation_strategy()) {
            let result = roll_notation(&notation).unwrap();

            prop_assert_eq!(result.spec(), &expected);
            prop_assert_eq!(result.outcomes().len(), expected.count() as usize);
        }

        #[test]
        fn test_result_new_derives_total(
            outcomes in prop::collection::vec(1u16..=6, 1..20),
            modifier in -50i32..=50
        ) {
            let spec = DiceSpec::builder(6)
                .count(outcomes.len() as u16)
                .modifier(modifier)
                .build()
                .unwrap();

            let expected: i32 = outcomes.iter().map(|&outcome| outcome as i32).sum::<i32>() + modifier;
            let result = RollResult::new(spec, outcomes);

            prop_assert_eq!(result.total(), expected);
        }
    }

    #[test]
    fn test_single_d20_advantage_is_the_outcome() {
        let spec = DiceSpec::parse("d20").unwrap();
        let result = spec.roll();

        let outcome = result.outcomes()[0];
        assert_eq!(result.advantage(), Some(outcome));
        assert_eq!(result.disadvantage(), Some(outcome));
        assert_eq!(result.total(), outcome as i32);
    }

    #[test]
    fn test_d20_advantage_and_disadvantage() {
        let spec = DiceSpec::parse("3d20+1").unwrap();
        let result = RollResult::new(spec, vec![7, 19, 2]);

        assert_eq!(result.advantage(), Some(19));
        assert_eq!(result.disadvantage(), Some(2));
        assert_eq!(result.total(), 29);
    }

    #[test]
    fn test_negative_modifier_can_go_below_one() {
        let spec = DiceSpec::parse("1d8-2").unwrap();
        let result = RollResult::new(spec, vec![1]);

        assert_eq!(result.total(), -1);
    }

    #[test]
    fn test_roll_notation_propagates_parse_errors() {
        assert_eq!(
            roll_notation("d7"),
            Err(Error::UnsupportedDie("7".into()))
        );
        assert_eq!(
            roll_notation("xd20"),
            Err(Error::InvalidCount("x".into()))
        );
        assert_eq!(
            roll_notation("2d20d5"),
            Err(Error::MalformedExpression("2d20d5".into()))
        );
    }

    #[test]
    fn test_result_deref_to_slice() {
        let spec = DiceSpec::parse("3d6").unwrap();
        let result = RollResult::new(spec, vec![4, 2, 6]);

        assert_eq!(result.len(), 3);
        assert_eq!(result.iter().max(), Some(&6));
    }

    #[test]
    fn test_display_summary_with_advantage() {
        let spec = DiceSpec::parse("2d20-1").unwrap();
        let result = RollResult::new(spec, vec![19, 3]);

        let expected = "\
Selected dice: 2d20-1
  Modifier: -1
Rolls:
  Roll #1: 19
  Roll #2: 3
  Advantage: 19
  Disadvantage: 3
Total: 21";
        assert_eq!(format!("{result}"), expected);
    }
}
