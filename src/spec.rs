use std::fmt::Display;
use std::str::FromStr;

use crate::Error;


/// Every die size the bag stocks. All entries are plain digits, which is what
/// lets the parser locate the modifier by searching the post-`d` segment for a
/// `+` or `-` sign.
pub const ALLOWED_SIDES: [u16; 9] = [1, 2, 4, 6, 8, 10, 12, 20, 100];


/// A parsed dice request: how many dice, how many sides, and a flat modifier.
///
/// Built from notation like `"3d6+2"` via [`DiceSpec::parse`] (or `str::parse`),
/// or programmatically via [`DiceSpec::builder`]. The specification itself is
/// inert; call [`DiceSpec::roll`](crate::DiceSpec::roll) to produce a
/// [`crate::RollResult`].
///
/// # Examples
/// ```
/// use dicebag::DiceSpec;
///
/// let spec = DiceSpec::parse("3d6+2").unwrap();
/// assert_eq!(spec.count(), 3);
/// assert_eq!(spec.sides(), 6);
/// assert_eq!(spec.modifier(), 2);
/// assert_eq!(format!("{spec}"), "3d6+2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceSpec {
    count: u16,
    sides: u16,
    modifier: i32,
}

impl DiceSpec {
    /// Creates a new [`DiceSpecBuilder`] for dice with the given number of sides.
    ///
    /// The count defaults to 1 and the modifier to 0.
    ///
    /// # Examples
    /// ```
    /// use dicebag::DiceSpec;
    ///
    /// let spec = DiceSpec::builder(6)  // d6
    ///     .count(3)                    // roll three of them
    ///     .modifier(2)                 // and add 2
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(format!("{spec}"), "3d6+2");
    /// ```
    pub fn builder(sides: u16) -> DiceSpecBuilder {
        DiceSpecBuilder::new(sides)
    }

    /// Parses dice notation of the form `[N]d<S>[(+|-)M]`.
    ///
    /// `N` is an optional positive count (default 1), `S` must be one of
    /// [`ALLOWED_SIDES`], and `M` is an optional signed modifier (default 0).
    ///
    /// # Errors
    /// - [`Error::MalformedExpression`] unless the input contains exactly one `d`.
    /// - [`Error::InvalidCount`] if the count token is not a positive number.
    /// - [`Error::UnsupportedDie`] if the sides token is not in [`ALLOWED_SIDES`].
    /// - [`Error::InvalidModifier`] if the modifier token is not numeric.
    ///
    /// # Examples
    /// ```
    /// use dicebag::{DiceSpec, Error};
    ///
    /// let spec = DiceSpec::parse("d20").unwrap();
    /// assert_eq!((spec.count(), spec.sides(), spec.modifier()), (1, 20, 0));
    ///
    /// let err = DiceSpec::parse("d7").unwrap_err();
    /// assert_eq!(err, Error::UnsupportedDie("7".into()));
    /// ```
    pub fn parse(notation: &str) -> Result<Self, Error> {
        let mut segments = notation.split('d');
        let (head, tail) = match (segments.next(), segments.next(), segments.next()) {
            (Some(head), Some(tail), None) => (head, tail),
            _ => return Err(Error::MalformedExpression(notation.into())),
        };

        // An omitted count means a single die.
        let count = if head.is_empty() {
            1
        } else {
            head.parse::<u16>()
                .ok()
                .filter(|&count| count > 0)
                .ok_or_else(|| Error::InvalidCount(head.into()))?
        };

        // The first sign in the tail separates the sides token from the
        // modifier token; `-` negates the modifier.
        let (sides_token, modifier_token) = match tail.find(['+', '-']) {
            Some(at) => {
                let negated = tail.as_bytes()[at] == b'-';
                (&tail[..at], Some((negated, &tail[at + 1..])))
            }
            None => (tail, None),
        };

        let sides = ALLOWED_SIDES
            .iter()
            .copied()
            .find(|sides| sides.to_string() == sides_token)
            .ok_or_else(|| Error::UnsupportedDie(sides_token.into()))?;

        let modifier = match modifier_token {
            Some((negated, token)) => {
                let value = token
                    .parse::<i32>()
                    .map_err(|_| Error::InvalidModifier(token.into()))?;
                if negated { -value } else { value }
            }
            None => 0,
        };

        Ok(Self { count, sides, modifier })
    }

    /// The number of dice to roll.
    pub const fn count(&self) -> u16 {
        self.count
    }

    /// The number of sides on each die.
    pub const fn sides(&self) -> u16 {
        self.sides
    }

    /// The flat modifier added to the summed outcomes.
    pub const fn modifier(&self) -> i32 {
        self.modifier
    }

    /// The lowest total this specification can produce (all dice showing 1).
    ///
    /// # Examples
    /// ```
    /// use dicebag::DiceSpec;
    ///
    /// let spec = DiceSpec::parse("1d8-2").unwrap();
    /// assert_eq!(spec.min(), -1);
    /// ```
    pub const fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// The highest total this specification can produce.
    ///
    /// # Examples
    /// ```
    /// use dicebag::DiceSpec;
    ///
    /// let spec = DiceSpec::parse("2d6+3").unwrap();
    /// assert_eq!(spec.max(), 15);
    /// ```
    pub const fn max(&self) -> i32 {
        self.count as i32 * self.sides as i32 + self.modifier
    }

    /// The average total for this specification.
    pub const fn avg(&self) -> f32 {
        (self.min() as f32 + self.max() as f32) / 2.0
    }

    /// Returns `(self.min(), self.max())`.
    pub const fn possible_values(&self) -> (i32, i32) {
        (self.min(), self.max())
    }
}

impl Default for DiceSpec {
    /// The default pull from the bag is a single unmodified d20.
    fn default() -> Self {
        Self { count: 1, sides: 20, modifier: 0 }
    }
}

impl FromStr for DiceSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for DiceSpec {
    /// Formats the specification as canonical dice notation.
    ///
    /// # Examples
    /// ```
    /// use dicebag::DiceSpec;
    ///
    /// assert_eq!(format!("{}", DiceSpec::default()), "1d20");
    ///
    /// let spec = DiceSpec::parse("d8-2").unwrap();
    /// assert_eq!(format!("{spec}"), "1d8-2");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;

        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }

        Ok(())
    }
}


/// A builder for creating [`DiceSpec`] instances with a fluent API.
///
/// Start with [`DiceSpec::builder`], chain [`DiceSpecBuilder::count`] and
/// [`DiceSpecBuilder::modifier`], then call [`DiceSpecBuilder::build`] to get
/// a `Result<DiceSpec, Error>`.
#[derive(Debug, Clone)]
pub struct DiceSpecBuilder {
    sides: u16,
    count: u16,
    modifier: i32,
}

impl DiceSpecBuilder {
    fn new(sides: u16) -> Self {
        Self { sides, count: 1, modifier: 0 }
    }

    /// Sets the number of dice to roll.
    pub fn count(mut self, count: u16) -> Self {
        self.count = count;
        self
    }

    /// Sets the flat modifier added to the summed outcomes.
    pub fn modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Finalizes the configuration and attempts to build a [`DiceSpec`].
    ///
    /// # Errors
    /// - [`Error::UnsupportedDie`] if `sides` is not in [`ALLOWED_SIDES`].
    /// - [`Error::InvalidCount`] if `count` is 0.
    ///
    /// # Examples
    /// ```
    /// use dicebag::{DiceSpec, Error};
    ///
    /// assert!(DiceSpec::builder(6).count(3).build().is_ok());
    /// assert_eq!(
    ///     DiceSpec::builder(7).build(),
    ///     Err(Error::UnsupportedDie("7".into()))
    /// );
    /// ```
    pub fn build(self) -> Result<DiceSpec, Error> {
        if !ALLOWED_SIDES.contains(&self.sides) {
            return Err(Error::UnsupportedDie(self.sides.to_string()));
        }

        if self.count == 0 {
            return Err(Error::InvalidCount(self.count.to_string()));
        }

        Ok(DiceSpec {
            count: self.count,
            sides: self.sides,
            modifier: self.modifier,
        })
    }
}


/// A macro for conveniently creating [`DiceSpec`] instances.
///
/// # Syntax
/// - `dice!(SIDES)`: a single die (e.g. `dice!(20)` for 1d20).
/// - `dice!(SIDES, COUNT)`: `COUNT` dice (e.g. `dice!(6, 3)` for 3d6).
/// - `dice!(SIDES, COUNT, MODIFIER)`: with a signed modifier
///   (e.g. `dice!(6, 3, -2)` for 3d6-2).
///
/// # Returns
/// `Result<DiceSpec, Error>` - the result of [`DiceSpecBuilder::build`].
///
/// # Examples
/// ```
/// use dicebag::dice;
///
/// let d20 = dice!(20);
/// assert_eq!(format!("{}", d20.unwrap()), "1d20");
///
/// let attack = dice!(6, 3, 2);
/// assert_eq!(format!("{}", attack.unwrap()), "3d6+2");
///
/// let cursed = dice!(8, 1, -2);
/// assert_eq!(format!("{}", cursed.unwrap()), "1d8-2");
/// ```
#[macro_export]
macro_rules! dice {
    ($sides:literal) => {
        $crate::DiceSpec::builder($sides)
            .build()
    };

    ($sides:literal, $count:literal) => {
        $crate::DiceSpec::builder($sides)
            .count($count)
            .build()
    };

    ($sides:literal, $count:literal, $modifier:literal) => {
        $crate::DiceSpec::builder($sides)
            .count($count)
            .modifier($modifier)
            .build()
    };
}
