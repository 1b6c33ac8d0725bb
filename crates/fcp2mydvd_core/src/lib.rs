//! fcp2mydvd core - Final Cut Pro chapter markers to Toast MyDVD chapters.
//!
//! Reads the chapter markers of one project from a Final Cut Pro XML
//! export, converts their offsets to MyDVD time values, and rewrites the
//! chapter list of a MyDVD project. The crate has no I/O beyond reading the
//! two inputs and writing the result; the CLI lives in the `fcp2mydvd`
//! crate.
//!
//! ```no_run
//! use fcp2mydvd_core::{convert, ConvertOptions, ConvertRequest};
//!
//! let request = ConvertRequest {
//!     fcp_path: "Wedding.fcpxml".into(),
//!     mydvd_path: "Wedding.MDProject".into(),
//!     event: "Wedding".into(),
//!     project: "Final Cut".into(),
//!     destination: "Wedding-chapters.MDProject".into(),
//! };
//! let conversion = convert(&request, &ConvertOptions::default()).unwrap();
//! println!("{} chapters", conversion.chapters.len());
//! ```

/// Per-node diagnostics: `info` when the run is verbose, `debug` otherwise.
macro_rules! diag {
    ($options:expr, $($arg:tt)*) => {
        if $options.verbose {
            tracing::info!($($arg)*);
        } else {
            tracing::debug!($($arg)*);
        }
    };
}

mod atomic;
pub mod config;
pub mod convert;
pub mod error;
pub mod fcp;
pub mod logging;
pub mod mydvd;
pub mod options;
pub mod time;
pub mod xml;

pub use convert::{convert, convert_documents, prepare, Conversion, ConvertRequest};
pub use error::{ConvertError, ConvertResult, ErrorKind};
pub use options::ConvertOptions;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
