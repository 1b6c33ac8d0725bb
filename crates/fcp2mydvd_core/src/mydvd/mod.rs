//! Toast MyDVD project (MDProject) chapter editing.

mod injector;
pub mod schema;

pub use injector::{inject_chapters, plan_chapters, time_scale_for, InjectedChapter};
