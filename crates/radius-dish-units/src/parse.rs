//! Grammar for free-form length strings.
//!
//! ```text
//! distance := number unit?
//!           | number foot number inch?
//! number   := [+-]? digits ('.' digits?)? | [+-]? '.' digits
//! unit     := "mm" | "m" | "in" | '"' | "ft" | "'"
//! ```
//!
//! A bare number is millimetres. In the compound form the inch mark may be
//! omitted, so `14'6` reads as fourteen feet six inches.

use crate::error::{ParseDistanceError, Result};
use crate::lexer::{Lexer, Token};
use crate::{Distance, LengthUnit};

/// Parse a length string into a [`Distance`] in millimetres.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// ```
/// use radius_dish_units::parse_distance;
///
/// assert_eq!(parse_distance("14ft").unwrap().mm(), 4267.2);
/// assert!(parse_distance("-5mm").is_err());
/// ```
pub fn parse_distance(text: &str) -> Result<Distance> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ParseDistanceError::Empty);
    }

    let tokens = Lexer::new(&normalized).tokenize();
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
    };

    let first = cursor
        .number()
        .ok_or_else(|| ParseDistanceError::MissingNumber(normalized.clone()))?;
    let unit = cursor.unit()?.unwrap_or(LengthUnit::Millimetre);
    let mut total = component(first, unit)?;

    if unit == LengthUnit::Foot {
        if let Some(inches) = cursor.number() {
            match cursor.unit()? {
                None | Some(LengthUnit::Inch) => {}
                Some(other) => {
                    return Err(ParseDistanceError::UnknownUnit(
                        other.suffix().to_string(),
                    ))
                }
            }
            total += component(inches, LengthUnit::Inch)?;
        }
    }

    if let Some(rest) = cursor.remaining() {
        return Err(ParseDistanceError::TrailingInput(rest));
    }
    if !(total > 0.0 && total.is_finite()) {
        return Err(ParseDistanceError::NonPositive(total));
    }
    Ok(Distance(total))
}

fn component(value: f64, unit: LengthUnit) -> Result<f64> {
    if value < 0.0 || !value.is_finite() {
        return Err(ParseDistanceError::NonPositive(value));
    }
    Ok(value * unit.mm_per_unit())
}

struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl Cursor<'_> {
    fn number(&mut self) -> Option<f64> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(v)) => {
                self.pos += 1;
                Some(*v)
            }
            _ => None,
        }
    }

    /// Consume a unit if present. A word or stray symbol in unit position
    /// is an unknown unit; a following number is left for the caller.
    fn unit(&mut self) -> Result<Option<LengthUnit>> {
        match self.tokens.get(self.pos) {
            Some(Token::Unit(u)) => {
                self.pos += 1;
                Ok(Some(*u))
            }
            Some(Token::Word(w)) => Err(ParseDistanceError::UnknownUnit(w.clone())),
            Some(Token::Other(c)) => Err(ParseDistanceError::UnknownUnit(c.to_string())),
            Some(Token::Number(_)) | None => Ok(None),
        }
    }

    fn remaining(&self) -> Option<String> {
        let rest = &self.tokens[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let text = rest
            .iter()
            .map(|t| match t {
                Token::Number(v) => v.to_string(),
                Token::Unit(u) => u.suffix().to_string(),
                Token::Word(w) => w.clone(),
                Token::Other(c) => c.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mm(text: &str) -> f64 {
        parse_distance(text).unwrap().mm()
    }

    #[test]
    fn test_feet() {
        assert_eq!(mm("14ft"), 14.0 * 304.8);
        assert_eq!(mm("14'"), 14.0 * 304.8);
        assert_eq!(mm("14 FT"), 14.0 * 304.8);
    }

    #[test]
    fn test_metric_equivalents() {
        assert_relative_eq!(mm("4267.2mm"), mm("14ft"), max_relative = 1e-12);
        assert_relative_eq!(mm("4.2672m"), mm("14ft"), max_relative = 1e-12);
        assert_relative_eq!(mm("168in"), mm("14ft"), max_relative = 1e-12);
        assert_relative_eq!(mm("168\""), mm("14ft"), max_relative = 1e-12);
    }

    #[test]
    fn test_bare_number_is_millimetres() {
        assert_eq!(mm("1000"), 1000.0);
        assert_eq!(mm("  1000  "), 1000.0);
        assert_eq!(mm(".5"), 0.5);
    }

    #[test]
    fn test_compound_feet_inches() {
        assert_relative_eq!(mm("14ft6in"), 14.0 * 304.8 + 6.0 * 25.4);
        assert_relative_eq!(mm("14' 6\""), 14.0 * 304.8 + 6.0 * 25.4);
        assert_relative_eq!(mm("14'6in"), 14.0 * 304.8 + 6.0 * 25.4);
        assert_relative_eq!(mm("14'6"), 14.0 * 304.8 + 6.0 * 25.4);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(parse_distance("14ft"), parse_distance("14ft"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_distance(""), Err(ParseDistanceError::Empty));
        assert_eq!(parse_distance("   "), Err(ParseDistanceError::Empty));
    }

    #[test]
    fn test_no_number() {
        assert!(matches!(
            parse_distance("abc"),
            Err(ParseDistanceError::MissingNumber(_))
        ));
        assert!(matches!(
            parse_distance("ft"),
            Err(ParseDistanceError::MissingNumber(_))
        ));
    }

    #[test]
    fn test_non_positive() {
        assert_eq!(
            parse_distance("-5mm"),
            Err(ParseDistanceError::NonPositive(-5.0))
        );
        assert_eq!(parse_distance("0"), Err(ParseDistanceError::NonPositive(0.0)));
        assert!(matches!(
            parse_distance("14ft-6in"),
            Err(ParseDistanceError::NonPositive(_))
        ));
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            parse_distance("3yd"),
            Err(ParseDistanceError::UnknownUnit("yd".into()))
        );
        assert_eq!(
            parse_distance("3cm"),
            Err(ParseDistanceError::UnknownUnit("cm".into()))
        );
        assert_eq!(
            parse_distance("14ft6mm"),
            Err(ParseDistanceError::UnknownUnit("mm".into()))
        );
    }

    #[test]
    fn test_trailing_input() {
        assert!(matches!(
            parse_distance("14mm 3"),
            Err(ParseDistanceError::TrailingInput(_))
        ));
        assert!(matches!(
            parse_distance("14ft 6in 2"),
            Err(ParseDistanceError::TrailingInput(_))
        ));
    }
}
