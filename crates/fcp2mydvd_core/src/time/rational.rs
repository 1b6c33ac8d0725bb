//! Exact rational time values in the Final Cut Pro `NUM[/DEN]s` notation.
//!
//! A [`RationalTime`] keeps its numerator and denominator exactly as written
//! and never reduces them: `1/2s` and `15000/30000s` are different values
//! until the caller rescales both to a common time base with
//! [`RationalTime::normalize`]. Arithmetic goes through [`BigRational`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use regex::Regex;

use crate::error::{ConvertError, ConvertResult};

const ANCHORED_PATTERN: &str = r"^(\d*)(?:/(\d+))?s$";
const LENIENT_PATTERN: &str = r"^(\d*)(?:/(\d+))?s";

fn time_pattern(strict: bool) -> &'static Regex {
    static ANCHORED: OnceLock<Regex> = OnceLock::new();
    static LENIENT: OnceLock<Regex> = OnceLock::new();

    if strict {
        ANCHORED.get_or_init(|| Regex::new(ANCHORED_PATTERN).expect("valid time pattern"))
    } else {
        LENIENT.get_or_init(|| Regex::new(LENIENT_PATTERN).expect("valid time pattern"))
    }
}

/// A non-negative time in seconds, stored as an unreduced fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RationalTime {
    numerator: u64,
    denominator: u64,
}

impl RationalTime {
    /// Zero seconds (`0s`).
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Create a time value. The denominator must be positive.
    pub fn new(numerator: u64, denominator: u64) -> ConvertResult<Self> {
        if denominator == 0 {
            return Err(ConvertError::InvalidArgument(format!(
                "time denominator must be positive (got {}/{})",
                numerator, denominator
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Parse a time string with the anchored grammar.
    ///
    /// Accepts `NUM[/DEN]s`; a missing numerator is 0 and a missing
    /// denominator is 1. Anything before or after the match is rejected.
    pub fn parse(s: &str) -> ConvertResult<Self> {
        Self::parse_with(s, true)
    }

    /// Parse a time string, optionally tolerating trailing characters.
    ///
    /// With `strict == false` the value must still start the string, but
    /// anything after its `s` is ignored.
    pub fn parse_with(s: &str, strict: bool) -> ConvertResult<Self> {
        let caps = time_pattern(strict)
            .captures(s)
            .ok_or_else(|| ConvertError::format(s))?;

        let numerator = match caps.get(1).map(|m| m.as_str()) {
            Some(digits) if !digits.is_empty() => {
                digits.parse::<u64>().map_err(|_| ConvertError::format(s))?
            }
            _ => 0,
        };
        let denominator = match caps.get(2) {
            Some(m) => m.as_str().parse::<u64>().map_err(|_| ConvertError::format(s))?,
            None => 1,
        };

        if denominator == 0 {
            return Err(ConvertError::format(s));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator as written.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// The denominator as written.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Whether this time is zero seconds.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// The exact value in seconds, reduced.
    pub fn seconds(&self) -> BigRational {
        BigRational::new(BigInt::from(self.numerator), BigInt::from(self.denominator))
    }

    /// Absolute position of a marker: `offset - start + marker_start`.
    ///
    /// The result may be negative when a clip's start lies beyond its
    /// offset plus the marker position.
    pub fn combine(offset: &Self, start: &Self, marker_start: &Self) -> BigRational {
        offset.seconds() - start.seconds() + marker_start.seconds()
    }

    /// Rescale an exact value to `time_base` units, rounding down.
    ///
    /// `numerator = floor(value * time_base)`, `denominator = time_base`.
    /// This is the only lossy step between the editor and the consumer.
    pub fn normalize(value: &BigRational, time_base: u64) -> ConvertResult<Self> {
        if time_base == 0 {
            return Err(ConvertError::InvalidArgument(
                "time base must be positive".to_string(),
            ));
        }
        if value.is_negative() {
            return Err(ConvertError::InvalidArgument(format!(
                "cannot express negative time {} in time base {}",
                value, time_base
            )));
        }

        let scaled = (value * BigRational::from_integer(BigInt::from(time_base))).floor();
        let numerator = scaled.to_integer().to_u64().ok_or_else(|| {
            ConvertError::InvalidArgument(format!(
                "time {} overflows time base {}",
                value, time_base
            ))
        })?;

        Ok(Self {
            numerator,
            denominator: time_base,
        })
    }
}

impl Default for RationalTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RationalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}s", self.numerator)
        } else {
            write!(f, "{}/{}s", self.numerator, self.denominator)
        }
    }
}

impl FromStr for RationalTime {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Reduce an exact value to an integer count of `scale` units, rounding
/// half away from zero.
pub fn round_to_scale(value: &BigRational, scale: u64) -> ConvertResult<u64> {
    let scaled = (value * BigRational::from_integer(BigInt::from(scale))).round();
    if scaled.is_negative() {
        return Err(ConvertError::InvalidArgument(format!(
            "negative time {} cannot be expressed in scale {}",
            value, scale
        )));
    }
    if scaled.is_zero() {
        return Ok(0);
    }
    scaled.to_integer().to_u64().ok_or_else(|| {
        ConvertError::InvalidArgument(format!("time {} overflows scale {}", value, scale))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn parse_full_form() {
        let t = RationalTime::parse("1001/30000s").unwrap();
        assert_eq!(t.numerator(), 1001);
        assert_eq!(t.denominator(), 30000);
    }

    #[test]
    fn parse_whole_seconds_defaults_denominator() {
        let t = RationalTime::parse("3600s").unwrap();
        assert_eq!((t.numerator(), t.denominator()), (3600, 1));
    }

    #[test]
    fn parse_missing_numerator_is_zero() {
        let t = RationalTime::parse("/30000s").unwrap();
        assert_eq!((t.numerator(), t.denominator()), (0, 30000));
        assert_eq!(RationalTime::parse("s").unwrap(), RationalTime::ZERO);
    }

    #[test]
    fn parse_keeps_fraction_unreduced() {
        let a = RationalTime::parse("15000/30000s").unwrap();
        let b = RationalTime::parse("1/2s").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.seconds(), b.seconds());
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "12", "abc", "1/2", "-5s", "1.5s"] {
            let err = RationalTime::parse(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "input {:?}", bad);
        }
    }

    #[test]
    fn parse_rejects_zero_denominator() {
        assert!(RationalTime::parse("5/0s").is_err());
        assert!(RationalTime::parse_with("5/0s", false).is_err());
    }

    #[test]
    fn anchored_parse_rejects_trailing_characters() {
        assert!(RationalTime::parse("100/30000sx").is_err());
        assert!(RationalTime::parse(" 100/30000s").is_err());
    }

    #[test]
    fn lenient_parse_ignores_trailing_text() {
        let t = RationalTime::parse_with("100/30000s trailing", false).unwrap();
        assert_eq!((t.numerator(), t.denominator()), (100, 30000));
        let t = RationalTime::parse_with("7sx", false).unwrap();
        assert_eq!((t.numerator(), t.denominator()), (7, 1));
    }

    #[test]
    fn lenient_parse_still_requires_leading_value() {
        for bad in ["10/30000 s", "abs 300/30000s", "at 7s", " 5s"] {
            let err = RationalTime::parse_with(bad, false).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "input {:?}", bad);
        }
    }

    #[test]
    fn format_then_parse_is_identity() {
        let samples = [
            RationalTime::new(0, 1).unwrap(),
            RationalTime::new(0, 30000).unwrap(),
            RationalTime::new(3600, 1).unwrap(),
            RationalTime::new(1001, 30000).unwrap(),
            RationalTime::new(30000, 30000).unwrap(),
            RationalTime::new(u64::MAX, 7).unwrap(),
        ];
        for t in samples {
            let back: RationalTime = t.to_string().parse().unwrap();
            assert_eq!(back, t);
            assert_eq!(back.denominator(), t.denominator());
        }
    }

    #[test]
    fn display_notation() {
        assert_eq!(RationalTime::new(1001, 30000).unwrap().to_string(), "1001/30000s");
        assert_eq!(RationalTime::new(5, 1).unwrap().to_string(), "5s");
    }

    #[test]
    fn new_rejects_zero_denominator() {
        let err = RationalTime::new(1, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn normalize_uses_floor() {
        let t = RationalTime::normalize(&ratio(5, 3), 10).unwrap();
        assert_eq!((t.numerator(), t.denominator()), (16, 10));

        // 2/3 * 30000 is exact; 1/7 * 30000 = 4285.71 floors to 4285
        let t = RationalTime::normalize(&ratio(2, 3), 30000).unwrap();
        assert_eq!(t.numerator(), 20000);
        let t = RationalTime::normalize(&ratio(1, 7), 30000).unwrap();
        assert_eq!(t.numerator(), 4285);
    }

    #[test]
    fn normalize_never_rounds_up() {
        // 0.99999 of a unit stays at 0
        let t = RationalTime::normalize(&ratio(99_999, 100_000 * 30000), 30000).unwrap();
        assert_eq!(t.numerator(), 0);
    }

    #[test]
    fn normalize_rejects_negative() {
        assert!(RationalTime::normalize(&ratio(-1, 30000), 30000).is_err());
        assert!(RationalTime::normalize(&ratio(1, 2), 0).is_err());
    }

    #[test]
    fn combine_marker_offset() {
        let offset = RationalTime::parse("10/30000s").unwrap();
        let start = RationalTime::parse("2/30000s").unwrap();
        let marker = RationalTime::parse("1/30000s").unwrap();

        let exact = RationalTime::combine(&offset, &start, &marker);
        assert_eq!(exact, ratio(9, 30000));

        let t = RationalTime::normalize(&exact, 30000).unwrap();
        assert_eq!(t, RationalTime::new(9, 30000).unwrap());
    }

    #[test]
    fn combine_mixed_denominators() {
        // 10s offset, 1001/30000s start, 3s marker
        let offset = RationalTime::parse("10s").unwrap();
        let start = RationalTime::parse("1001/30000s").unwrap();
        let marker = RationalTime::parse("3s").unwrap();

        let exact = RationalTime::combine(&offset, &start, &marker);
        let t = RationalTime::normalize(&exact, 30000).unwrap();
        assert_eq!(t.numerator(), 13 * 30000 - 1001);
    }

    #[test]
    fn combine_can_go_negative() {
        let exact = RationalTime::combine(
            &RationalTime::ZERO,
            &RationalTime::parse("10s").unwrap(),
            &RationalTime::parse("1s").unwrap(),
        );
        assert!(exact.is_negative());
    }

    #[test]
    fn round_to_scale_half_away_from_zero() {
        assert_eq!(round_to_scale(&ratio(1, 2), 1).unwrap(), 1);
        assert_eq!(round_to_scale(&ratio(3, 2), 1).unwrap(), 2);
        assert_eq!(round_to_scale(&ratio(300, 30000), 29970).unwrap(), 300);
        assert_eq!(round_to_scale(&ratio(0, 1), 30000).unwrap(), 0);
        // 1500/30000s at 29970 is 1498.5 units
        assert_eq!(round_to_scale(&ratio(1500, 30000), 29970).unwrap(), 1499);
    }
}
