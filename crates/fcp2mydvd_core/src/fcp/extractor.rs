//! Chapter marker extraction from Final Cut Pro XML.
//!
//! Walks `fcpxml/library/event/project/sequence/spine` and turns every
//! `chapter-marker` under a `clip` or `asset-clip` into an [`FcpChapter`]
//! whose offset is relative to the start of the sequence:
//!
//! ```text
//! absolute = clip.offset - clip.start + marker.start
//! ```
//!
//! computed exactly, then floored to the sequence time base.

use num_rational::BigRational;
use num_traits::Signed;

use super::types::{FcpChapter, FcpProject, LibraryEntry, TcFormat, SUPPORTED_TIME_BASE};
use crate::error::{ConvertError, ConvertResult};
use crate::options::ConvertOptions;
use crate::time::{to_smpte, RationalTime};
use crate::xml::query::{
    children_with_tags, find_child_by_attribute, get_attribute, require_child,
};
use crate::xml::Element;

/// Root tag of a Final Cut Pro XML document.
pub const FCPXML_ROOT: &str = "fcpxml";

const CLIP_TAGS: [&str; 2] = ["clip", "asset-clip"];

fn check_root(root: &Element) -> ConvertResult<()> {
    if root.name != FCPXML_ROOT {
        return Err(ConvertError::parse(format!(
            "not a Final Cut Pro XML document (root is <{}>)",
            root.name
        )));
    }
    Ok(())
}

/// Timecode label for diagnostics; never fails the run.
fn label(time: &RationalTime, fps: &BigRational) -> String {
    to_smpte(time, fps)
        .map(|tc| tc.to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn parse_time(elem: &Element, attr: &str, options: &ConvertOptions) -> ConvertResult<RationalTime> {
    RationalTime::parse_with(get_attribute(elem, attr, "0s"), options.strict_time_strings)
}

/// List every `event/project` pair in the document's libraries.
pub fn list_projects(root: &Element) -> ConvertResult<Vec<LibraryEntry>> {
    check_root(root)?;

    let mut entries = Vec::new();
    for library in children_with_tags(root, &["library"]) {
        for event in children_with_tags(library, &["event"]) {
            let event_name = get_attribute(event, "name", "");
            for project in children_with_tags(event, &["project"]) {
                entries.push(LibraryEntry {
                    event: event_name.to_string(),
                    project: get_attribute(project, "name", "").to_string(),
                });
            }
        }
    }
    Ok(entries)
}

/// Extract the chapter markers of `event`/`project`.
pub fn extract_project(
    root: &Element,
    event: &str,
    project: &str,
    options: &ConvertOptions,
) -> ConvertResult<FcpProject> {
    check_root(root)?;
    diag!(options, "Looking for {}/{}...", event, project);

    let library = require_child(root, "library")?;
    let elem_event = find_child_by_attribute(library, "event", "name", event)
        .ok_or_else(|| ConvertError::not_found("event", event))?;
    let elem_project = find_child_by_attribute(elem_event, "project", "name", project)
        .ok_or_else(|| ConvertError::not_found("project", project))?;

    let sequences = children_with_tags(elem_project, &["sequence"]);
    let sequence = match sequences.as_slice() {
        [] => return Err(ConvertError::missing("sequence")),
        [single] => *single,
        _ => return Err(ConvertError::unsupported("multiple sequences")),
    };

    let tc_format = TcFormat::from_attr(get_attribute(sequence, "tcFormat", "NDF"));
    let duration = parse_time(sequence, "duration", options)?;
    let time_base = duration.denominator();
    if time_base != SUPPORTED_TIME_BASE {
        return Err(ConvertError::UnsupportedTimeBase(time_base));
    }

    let mut result = FcpProject {
        event: event.to_string(),
        name: project.to_string(),
        time_base,
        tc_format,
        chapters: Vec::new(),
    };
    let fps = result.frame_rate();
    diag!(
        options,
        "Sequence: duration {} ({}), time base {}, {}",
        duration,
        label(&duration, &fps),
        time_base,
        tc_format
    );

    let spine = require_child(sequence, "spine")?;
    for clip in children_with_tags(spine, &CLIP_TAGS) {
        let offset = parse_time(clip, "offset", options)?;
        let start = parse_time(clip, "start", options)?;
        let clip_duration = parse_time(clip, "duration", options)?;
        diag!(
            options,
            "{} '{}': offset {}, start {}, duration {}",
            clip.name,
            get_attribute(clip, "name", ""),
            offset,
            start,
            clip_duration
        );

        for marker in children_with_tags(clip, &["chapter-marker"]) {
            let marker_start = parse_time(marker, "start", options)?;
            let name = get_attribute(marker, "value", "").to_string();

            let exact = RationalTime::combine(&offset, &start, &marker_start);
            if exact.is_negative() {
                return Err(ConvertError::unsupported(format!(
                    "chapter marker '{}' lies before the start of the sequence",
                    name
                )));
            }
            let chapter_offset = RationalTime::normalize(&exact, time_base)?;
            diag!(
                options,
                "Chapter '{}' at {} ({})",
                name,
                chapter_offset,
                label(&chapter_offset, &fps)
            );

            result.chapters.push(FcpChapter {
                offset: chapter_offset,
                name,
            });
        }
    }

    tracing::debug!(
        "Extracted {} chapters from {}/{}",
        result.chapters.len(),
        event,
        project
    );
    Ok(result)
}
