//! Display timecodes.
//!
//! [`to_smpte`] turns an exact time into `HH:MM:SS.FF` for labels and
//! diagnostics. Frames are rounded half away from zero and drop-frame
//! numbering is not modelled, so a 29.97 fps label can drift by one frame
//! from what an editor would show. Never feed the result back into
//! arithmetic.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use super::rational::RationalTime;
use crate::error::{ConvertError, ConvertResult};

/// A lossy `hours:minutes:seconds.frames` display value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmpteTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl fmt::Display for SmpteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hours, self.minutes, self.seconds, self.frames
        )
    }
}

/// Build an exact frame rate from a fraction, e.g. `frame_rate(30000, 1001)`.
pub fn frame_rate(numerator: u64, denominator: u64) -> BigRational {
    BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
}

/// Convert a time to a display timecode at `fps` frames per second.
pub fn to_smpte(time: &RationalTime, fps: &BigRational) -> ConvertResult<SmpteTime> {
    if !fps.is_positive() {
        return Err(ConvertError::InvalidArgument(format!(
            "frame rate must be positive (got {})",
            fps
        )));
    }

    let value = time.seconds();
    let whole = value.floor();
    let frames = ((&value - &whole) * fps).round();

    let total_seconds = whole
        .to_integer()
        .to_u64()
        .ok_or_else(|| ConvertError::InvalidArgument(format!("time {} is out of range", time)))?;
    let frames = frames
        .to_integer()
        .to_u32()
        .filter(|f| *f < 100)
        .ok_or_else(|| {
            ConvertError::InvalidArgument(format!("frame rate {} is too high for a timecode", fps))
        })?;

    let hours = total_seconds / 3600;
    if hours >= 99 {
        return Err(ConvertError::InvalidArgument(format!(
            "time {} reaches 99 hours",
            time
        )));
    }

    Ok(SmpteTime {
        hours: hours as u32,
        minutes: ((total_seconds % 3600) / 60) as u32,
        seconds: (total_seconds % 60) as u32,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn t(s: &str) -> RationalTime {
        RationalTime::parse(s).unwrap()
    }

    #[test]
    fn zero_is_all_zeros() {
        let tc = to_smpte(&RationalTime::ZERO, &frame_rate(30, 1)).unwrap();
        assert_eq!(tc, SmpteTime::default());
        assert_eq!(tc.to_string(), "00:00:00.00");
    }

    #[test]
    fn sexagesimal_decomposition() {
        let tc = to_smpte(&t("3723s"), &frame_rate(30, 1)).unwrap();
        assert_eq!((tc.hours, tc.minutes, tc.seconds, tc.frames), (1, 2, 3, 0));
    }

    #[test]
    fn fractional_seconds_become_frames() {
        // 10.5s at 30fps -> 15 frames
        let tc = to_smpte(&t("315000/30000s"), &frame_rate(30000, 1000)).unwrap();
        assert_eq!(tc.to_string(), "00:00:10.15");
    }

    #[test]
    fn frames_round_half_away_from_zero() {
        // 1/60s at 30fps is exactly half a frame
        let tc = to_smpte(&t("1/60s"), &frame_rate(30, 1)).unwrap();
        assert_eq!(tc.frames, 1);
    }

    #[test]
    fn drop_frame_rate_is_approximate() {
        // 300/30000s = 0.01s; at 29.97fps that is 0.2997 frames
        let tc = to_smpte(&t("300/30000s"), &frame_rate(29970, 1000)).unwrap();
        assert_eq!(tc.frames, 0);
        // 0.5s at 29.97 = 14.985 frames, rounds to 15
        let tc = to_smpte(&t("15000/30000s"), &frame_rate(30000, 1001)).unwrap();
        assert_eq!(tc.frames, 15);
    }

    #[test]
    fn rejects_non_positive_fps() {
        let err = to_smpte(&t("1s"), &frame_rate(0, 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn hours_stay_below_99() {
        // 99:00:00 is out of range, 98:59:59 is the last valid second
        assert!(to_smpte(&t("356400s"), &frame_rate(30, 1)).is_err());
        let tc = to_smpte(&t("356399s"), &frame_rate(30, 1)).unwrap();
        assert_eq!(tc.to_string(), "98:59:59.00");
    }
}
