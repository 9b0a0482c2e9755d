/// Everything that can go wrong while parsing or building a dice request.
///
/// All failures surface at construction time; rolling a valid
/// [`crate::DiceSpec`] cannot fail. Each variant carries the offending token
/// so callers can report exactly what was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The notation did not contain exactly one `d` separator.
    #[error("Failed to process this roll request: {0}")]
    MalformedExpression(String),

    /// The count token was not a positive number.
    #[error("The total number of rolls must be a positive numeric value: {0}")]
    InvalidCount(String),

    /// The sides token was not one of the supported dice.
    #[error("This die is not supported: {0}")]
    UnsupportedDie(String),

    /// The modifier token was not a numeric value.
    #[error("The modifier must be a numeric value: {0}")]
    InvalidModifier(String),
}
