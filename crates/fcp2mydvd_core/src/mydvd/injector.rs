//! Chapter injection into a MyDVD project.

use super::schema::{
    chapter_entry, CHILDREN, DROP_FRAME_TIME_SCALE, MDPROJECT_ROOT, MENU, PREVIEW_THUMBNAIL,
    START_OF_MOVIE, TITLE, URL,
};
use crate::error::{ConvertError, ConvertResult};
use crate::fcp::{FcpProject, SUPPORTED_TIME_BASE};
use crate::options::ConvertOptions;
use crate::time::{frame_rate, round_to_scale, to_smpte};
use crate::xml::query::{clear_children, get_text, require_child, require_child_mut};
use crate::xml::Element;

/// A chapter as written to the MyDVD project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedChapter {
    /// Sequential label, starting at "1" for the start of the movie.
    pub label: String,
    /// Display timecode (or "Start of Movie").
    pub edit_name: String,
    pub time_value: u64,
    pub time_scale: u64,
    /// Marker name from the editor; empty for the synthetic first chapter.
    pub marker_name: String,
}

/// MyDVD time scale for a project: 30000, or 29970 for drop-frame.
pub fn time_scale_for(project: &FcpProject) -> ConvertResult<u64> {
    if project.time_base != SUPPORTED_TIME_BASE {
        return Err(ConvertError::UnsupportedTimeBase(project.time_base));
    }
    Ok(if project.tc_format.is_drop_frame() {
        DROP_FRAME_TIME_SCALE
    } else {
        project.time_base
    })
}

/// Compute the chapter list MyDVD will receive, without touching a document.
///
/// The first entry is always "Start of Movie" at zero with its scale
/// multiplied by 1000, which is how MyDVD itself writes the first chapter.
/// Chapters that land on zero are dropped and do not consume a label.
pub fn plan_chapters(
    project: &FcpProject,
    options: &ConvertOptions,
) -> ConvertResult<Vec<InjectedChapter>> {
    let time_scale = time_scale_for(project)?;
    let fps = frame_rate(time_scale, 1000);

    let mut planned = vec![InjectedChapter {
        label: "1".to_string(),
        edit_name: START_OF_MOVIE.to_string(),
        time_value: 0,
        time_scale: time_scale * 1000,
        marker_name: String::new(),
    }];

    let mut counter = 1u32;
    for chapter in &project.chapters {
        let time_value = round_to_scale(&chapter.offset.seconds(), time_scale)?;
        if time_value == 0 {
            diag!(
                options,
                "Skipping chapter '{}' at zero (covered by {})",
                chapter.name,
                START_OF_MOVIE
            );
            continue;
        }

        counter += 1;
        let edit_name = to_smpte(&chapter.offset, &fps)?.to_string();
        diag!(
            options,
            "Chapter {}: '{}' at {} ({}/{})",
            counter,
            chapter.name,
            edit_name,
            time_value,
            time_scale
        );

        planned.push(InjectedChapter {
            label: counter.to_string(),
            edit_name,
            time_value,
            time_scale,
            marker_name: chapter.name.clone(),
        });
    }

    Ok(planned)
}

/// Replace the chapter list of a MyDVD project with the project's chapters.
///
/// Returns the chapters written, in order.
pub fn inject_chapters(
    root: &mut Element,
    project: &FcpProject,
    options: &ConvertOptions,
) -> ConvertResult<Vec<InjectedChapter>> {
    if root.name != MDPROJECT_ROOT {
        return Err(ConvertError::parse(format!(
            "not a Toast MyDVD project (root is <{}>)",
            root.name
        )));
    }

    let url = {
        let title = require_child(require_child(require_child(root, MENU)?, CHILDREN)?, TITLE)?;
        let thumbnail = require_child(title, PREVIEW_THUMBNAIL)?;
        get_text(require_child(thumbnail, URL)?).to_string()
    };
    diag!(options, "Thumbnail: {}", url);

    let container = {
        let titles = require_child_mut(require_child_mut(root, MENU)?, CHILDREN)?;
        let title = require_child_mut(titles, TITLE)?;
        let menu = require_child_mut(require_child_mut(title, CHILDREN)?, MENU)?;
        require_child_mut(menu, CHILDREN)?
    };

    let planned = plan_chapters(project, options)?;

    let removed = clear_children(container);
    tracing::debug!("Removed {} existing chapter nodes", removed.len());

    for chapter in &planned {
        container.push_element(chapter_entry(
            &chapter.label,
            &chapter.edit_name,
            &url,
            chapter.time_value,
            chapter.time_scale,
        ));
    }

    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fcp::{FcpChapter, TcFormat};
    use crate::mydvd::schema::{CHAPTER, EDIT_NAME, NAME, TIME, TIMESCALE, VALUE};
    use crate::time::RationalTime;
    use crate::xml::Document;

    const TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MDProject version="2">
  <menu>
    <children>
      <title>
        <previewThumbnail><url>file:///Users/me/thumb.jpg</url></previewThumbnail>
        <children>
          <menu>
            <children>
              <chapter><name>old</name></chapter>
              <chapter><name>older</name></chapter>
            </children>
          </menu>
        </children>
      </title>
    </children>
  </menu>
</MDProject>"#;

    fn project(tc_format: TcFormat, offsets: &[(u64, &str)]) -> FcpProject {
        FcpProject {
            event: "E".into(),
            name: "P".into(),
            time_base: 30000,
            tc_format,
            chapters: offsets
                .iter()
                .map(|(n, name)| FcpChapter {
                    offset: RationalTime::new(*n, 30000).unwrap(),
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    fn container(root: &Element) -> &Element {
        let menu = require_child(root, MENU).unwrap();
        let title = require_child(require_child(menu, CHILDREN).unwrap(), TITLE).unwrap();
        let menu = require_child(require_child(title, CHILDREN).unwrap(), MENU).unwrap();
        require_child(menu, CHILDREN).unwrap()
    }

    fn field<'a>(entry: &'a Element, path: &[&str]) -> &'a str {
        let mut node = entry;
        for tag in path {
            node = require_child(node, tag).unwrap();
        }
        get_text(node)
    }

    #[test]
    fn replaces_existing_chapters() {
        let mut root = Document::parse(TEMPLATE).unwrap().root;
        let written = inject_chapters(
            &mut root,
            &project(TcFormat::Ndf, &[(300, "Intro"), (900, "Scene2")]),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(written.len(), 3);

        let entries: Vec<&Element> = container(&root).elements().collect();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.name == CHAPTER));

        let labels: Vec<&str> = entries.iter().map(|e| field(e, &[NAME])).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        let values: Vec<&str> = entries.iter().map(|e| field(e, &[TIME, VALUE])).collect();
        assert_eq!(values, vec!["0", "300", "900"]);
        let scales: Vec<&str> = entries.iter().map(|e| field(e, &[TIME, TIMESCALE])).collect();
        assert_eq!(scales, vec!["30000000", "30000", "30000"]);

        assert_eq!(field(entries[0], &[EDIT_NAME]), START_OF_MOVIE);
        assert_eq!(field(entries[1], &[EDIT_NAME]), "00:00:00.00");
        assert!(entries.iter().all(|e| field(e, &[URL]) == "file:///Users/me/thumb.jpg"));
    }

    #[test]
    fn zero_offset_chapters_are_dropped_without_consuming_labels() {
        let planned = plan_chapters(
            &project(TcFormat::Ndf, &[(0, "At zero"), (30000, "One"), (0, "Zero again"), (60000, "Two")]),
            &ConvertOptions::default(),
        )
        .unwrap();
        let summary: Vec<(&str, u64)> = planned
            .iter()
            .map(|c| (c.label.as_str(), c.time_value))
            .collect();
        assert_eq!(summary, vec![("1", 0), ("2", 30000), ("3", 60000)]);
        assert_eq!(planned[1].edit_name, "00:00:01.00");
        assert_eq!(planned[2].marker_name, "Two");
    }

    #[test]
    fn drop_frame_uses_29970_scale() {
        let planned = plan_chapters(
            &project(TcFormat::Df, &[(300, "a"), (15000, "b")]),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(planned[0].time_scale, 29_970_000);
        // 300/30000s * 29970 = 299.7 -> 300
        assert_eq!((planned[1].time_value, planned[1].time_scale), (300, 29970));
        // 0.5s * 29970 = 14985
        assert_eq!(planned[2].time_value, 14985);
        // 0.5s at 29.97fps = 14.985 frames -> 15
        assert_eq!(planned[2].edit_name, "00:00:00.15");
    }

    #[test]
    fn sub_unit_offsets_round_to_nearest() {
        // 1/30000s at 29970 is 0.999 units
        let planned = plan_chapters(&project(TcFormat::Df, &[(1, "tiny")]), &ConvertOptions::default())
            .unwrap();
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[1].time_value, 1);
    }

    #[test]
    fn missing_preview_thumbnail() {
        let xml = TEMPLATE.replace(
            "<previewThumbnail><url>file:///Users/me/thumb.jpg</url></previewThumbnail>",
            "",
        );
        let mut root = Document::parse(&xml).unwrap().root;
        let err = inject_chapters(&mut root, &project(TcFormat::Ndf, &[]), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingElement(ref n) if n == PREVIEW_THUMBNAIL));
    }

    #[test]
    fn missing_inner_menu() {
        let xml = TEMPLATE
            .replace("<menu>\n            <children>", "<submenu>\n            <children>")
            .replace("</children>\n          </menu>", "</children>\n          </submenu>");
        let mut root = Document::parse(&xml).unwrap().root;
        let err = inject_chapters(&mut root, &project(TcFormat::Ndf, &[]), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingElement(ref n) if n == MENU));
    }

    #[test]
    fn wrong_root_is_parse_error() {
        let mut root = Document::parse("<fcpxml/>").unwrap().root;
        let err = inject_chapters(&mut root, &project(TcFormat::Ndf, &[]), &ConvertOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn unsupported_time_base() {
        let mut p = project(TcFormat::Ndf, &[]);
        p.time_base = 25;
        assert!(matches!(time_scale_for(&p), Err(ConvertError::UnsupportedTimeBase(25))));
    }

    #[test]
    fn empty_project_writes_only_start_of_movie() {
        let mut root = Document::parse(TEMPLATE).unwrap().root;
        let written =
            inject_chapters(&mut root, &project(TcFormat::Ndf, &[]), &ConvertOptions::default())
                .unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(container(&root).elements().count(), 1);
    }
}
