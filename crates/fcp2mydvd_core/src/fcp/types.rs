//! Final Cut Pro project types.

use std::fmt;

use num_rational::BigRational;

use crate::time::{frame_rate, RationalTime};

/// The only sequence time base we convert.
pub const SUPPORTED_TIME_BASE: u64 = 30000;

/// Timecode convention of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TcFormat {
    /// Drop-frame (29.97 fps).
    Df,
    /// Non-drop-frame (30 fps).
    #[default]
    Ndf,
}

impl TcFormat {
    /// Parse a `tcFormat` attribute. Anything but `DF` is non-drop-frame.
    pub fn from_attr(value: &str) -> Self {
        if value == "DF" {
            TcFormat::Df
        } else {
            TcFormat::Ndf
        }
    }

    pub fn is_drop_frame(&self) -> bool {
        matches!(self, TcFormat::Df)
    }
}

impl fmt::Display for TcFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcFormat::Df => write!(f, "DF"),
            TcFormat::Ndf => write!(f, "NDF"),
        }
    }
}

/// A chapter marker with its absolute offset from the sequence start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcpChapter {
    /// Offset in the sequence time base.
    pub offset: RationalTime,
    pub name: String,
}

/// Chapters extracted from one project of a library event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcpProject {
    pub event: String,
    pub name: String,
    /// Denominator of every time value in the sequence.
    pub time_base: u64,
    pub tc_format: TcFormat,
    /// Chapters in document order (clip order, then marker order).
    pub chapters: Vec<FcpChapter>,
}

impl FcpProject {
    /// Exact frame rate: 30000/1001 for drop-frame, 30000/1000 otherwise.
    pub fn frame_rate(&self) -> BigRational {
        if self.tc_format.is_drop_frame() {
            frame_rate(self.time_base, 1001)
        } else {
            frame_rate(self.time_base, 1000)
        }
    }
}

/// An event/project pair found in a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub event: String,
    pub project: String,
}

impl fmt::Display for LibraryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event, self.project)
    }
}
