#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]

//! Parse dice notation such as `"3d6+2"` and simulate the rolls.
//!
//! A [`DiceSpec`] describes a pull from the dice bag: how many dice, how many
//! sides, and a flat modifier. Rolling one produces an immutable
//! [`RollResult`] carrying every individual outcome, the modified total, and
//! advantage/disadvantage for d20 rolls.
//!
//! ```
//! use dicebag::DiceSpec;
//!
//! let spec: DiceSpec = "2d6+3".parse().unwrap();
//! let result = spec.roll();
//! assert!(result.total() >= 5 && result.total() <= 15);
//! ```

#[cfg(test)]
mod test_strategies;

mod error;
mod roll;
mod spec;

pub use error::Error;
pub use roll::{roll_notation, RollResult};
pub use spec::{DiceSpec, DiceSpecBuilder, ALLOWED_SIDES};
