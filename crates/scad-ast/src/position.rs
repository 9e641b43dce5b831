// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source positions.

use std::fmt;

use crate::error::{Result, ValidationError};

/// A point in the source: 1-based line and column, 0-based character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    line: usize,
    column: usize,
    offset: usize,
}

impl Position {
    /// The first character of a source.
    pub const START: Position = Position { line: 1, column: 1, offset: 0 };

    /// Build a position, validating every coordinate.
    pub fn new<L, C, O>(line: L, column: C, offset: O) -> Result<Self>
    where
        L: Coordinate,
        C: Coordinate,
        O: Coordinate,
    {
        Ok(Position {
            line: coordinate("line", &line, 1)?,
            column: coordinate("column", &column, 1)?,
            offset: coordinate("offset", &offset, 0)?,
        })
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The position just past `text`, when `text` starts here.
    ///
    /// Lengths count chars. After a line break the column restarts at 1.
    pub fn advance(self, text: &str) -> Position {
        let length = text.chars().count();
        match text.rfind('\n') {
            Some(last) => Position {
                line: self.line + text.matches('\n').count(),
                column: 1 + text[last + 1..].chars().count(),
                offset: self.offset + length,
            },
            None => Position {
                line: self.line,
                column: self.column + length,
                offset: self.offset + length,
            },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

fn coordinate(name: &'static str, value: &impl Coordinate, min: i64) -> Result<usize> {
    let found = value
        .to_coordinate()
        .ok_or_else(|| ValidationError::NonNumericCoordinate {
            coordinate: name,
            found: value.to_string(),
        })?;
    if found < min {
        return Err(ValidationError::CoordinateOutOfRange {
            coordinate: name,
            min,
            found,
        });
    }
    usize::try_from(found).map_err(|_| ValidationError::NonNumericCoordinate {
        coordinate: name,
        found: value.to_string(),
    })
}

/// Anything that can be read as a single position coordinate.
pub trait Coordinate: fmt::Display {
    /// The integral value, or `None` when this isn't a whole number.
    fn to_coordinate(&self) -> Option<i64>;
}

macro_rules! integer_coordinate {
    ($($ty:ty),*) => {
        $(
            impl Coordinate for $ty {
                fn to_coordinate(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }
            }
        )*
    };
}

integer_coordinate!(i32, i64, isize, u32, u64, usize);

impl Coordinate for f64 {
    fn to_coordinate(&self) -> Option<i64> {
        if self.is_finite() && self.fract() == 0.0 && self.abs() < i64::MAX as f64 {
            Some(*self as i64)
        } else {
            None
        }
    }
}

impl Coordinate for str {
    fn to_coordinate(&self) -> Option<i64> {
        let text = self.trim();
        text.parse::<i64>()
            .ok()
            .or_else(|| text.parse::<f64>().ok().and_then(|n| n.to_coordinate()))
    }
}

impl Coordinate for String {
    fn to_coordinate(&self) -> Option<i64> {
        self.as_str().to_coordinate()
    }
}

impl<T: Coordinate + ?Sized> Coordinate for &T {
    fn to_coordinate(&self) -> Option<i64> {
        (**self).to_coordinate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn round_trips_coordinates() {
        let p = Position::new(3, 4, 10).unwrap();
        assert_eq!((p.line(), p.column(), p.offset()), (3, 4, 10));
    }

    #[test]
    fn start_is_smallest_valid_position() {
        assert_eq!(Position::new(1, 1, 0).unwrap(), Position::START);
    }

    #[test]
    fn reads_numeric_strings_and_whole_floats() {
        let p = Position::new("2", 7.0, " 12 ").unwrap();
        assert_eq!(p, Position::new(2, 7, 12).unwrap());
    }

    #[test]
    fn rejects_values_below_minimum() {
        assert_eq!(
            Position::new(0, 1, 0),
            Err(ValidationError::CoordinateOutOfRange { coordinate: "line", min: 1, found: 0 })
        );
        assert!(matches!(
            Position::new(1, 0, 0),
            Err(ValidationError::CoordinateOutOfRange { coordinate: "column", .. })
        ));
        assert!(matches!(
            Position::new(1, 1, -1),
            Err(ValidationError::CoordinateOutOfRange { coordinate: "offset", .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(matches!(
            Position::new("one", 1, 0),
            Err(ValidationError::NonNumericCoordinate { coordinate: "line", .. })
        ));
        assert!(matches!(
            Position::new(1, 1.5, 0),
            Err(ValidationError::NonNumericCoordinate { coordinate: "column", .. })
        ));
        assert!(matches!(
            Position::new(1, 1, f64::NAN),
            Err(ValidationError::NonNumericCoordinate { coordinate: "offset", .. })
        ));
    }

    #[test]
    fn advance_within_a_line() {
        let p = Position::new(2, 7, 12).unwrap().advance("foo");
        assert_eq!(p, Position::new(2, 10, 15).unwrap());
    }

    #[test]
    fn advance_across_line_breaks() {
        let p = Position::new(2, 7, 12).unwrap().advance("\nfoo\nbar");
        assert_eq!(p, Position::new(4, 4, 20).unwrap());
    }

    #[test]
    fn advance_past_trailing_break() {
        let p = Position::START.advance("ab\n");
        assert_eq!(p, Position::new(2, 1, 3).unwrap());
    }

    #[test]
    fn advance_counts_chars_not_bytes() {
        let p = Position::START.advance("é");
        assert_eq!((p.column(), p.offset()), (2, 1));
    }

    proptest! {
        #[test]
        fn valid_coordinates_round_trip(line in 1usize..100_000, column in 1usize..10_000, offset in 0usize..1_000_000) {
            let p = Position::new(line, column, offset).unwrap();
            prop_assert_eq!((p.line(), p.column(), p.offset()), (line, column, offset));
            prop_assert_eq!(Position::new(line.to_string(), column as f64, offset as i64).unwrap(), p);
        }

        #[test]
        fn non_positive_lines_are_rejected(line in -1000i64..1) {
            let rejected = matches!(
                Position::new(line, 1, 0),
                Err(ValidationError::CoordinateOutOfRange { coordinate: "line", .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn advance_tracks_lines_and_chars(text in "[a-z\\n]{0,40}") {
            let end = Position::START.advance(&text);
            prop_assert_eq!(end.offset(), text.chars().count());
            prop_assert_eq!(end.line(), 1 + text.matches('\n').count());
        }
    }
}
