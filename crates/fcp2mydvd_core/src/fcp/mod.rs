//! Final Cut Pro XML (fcpxml) reading.
//!
//! Only the subset needed to locate chapter markers is understood:
//! `library/event/project/sequence/spine/(clip|asset-clip)/chapter-marker`.

mod extractor;
mod types;

pub use extractor::{extract_project, list_projects, FCPXML_ROOT};
pub use types::{FcpChapter, FcpProject, LibraryEntry, TcFormat, SUPPORTED_TIME_BASE};
