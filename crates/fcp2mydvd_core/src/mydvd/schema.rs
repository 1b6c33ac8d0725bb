//! Toast MyDVD project vocabulary.
//!
//! The chapter list lives at
//! `MDProject/menu/children/title/children/menu/children`; the title's
//! `previewThumbnail/url` is reused as every chapter's thumbnail.

use crate::xml::Element;

pub const MDPROJECT_ROOT: &str = "MDProject";
pub const MENU: &str = "menu";
pub const CHILDREN: &str = "children";
pub const TITLE: &str = "title";
pub const PREVIEW_THUMBNAIL: &str = "previewThumbnail";
pub const URL: &str = "url";

pub const CHAPTER: &str = "chapter";
pub const NAME: &str = "name";
pub const THUMBNAIL: &str = "thumbnail";
pub const NATIVE: &str = "native";
pub const EDIT_NAME: &str = "editName";
pub const TIME: &str = "time";
pub const VALUE: &str = "value";
pub const TIMESCALE: &str = "timescale";

/// Edit name of the chapter MyDVD expects at time zero.
pub const START_OF_MOVIE: &str = "Start of Movie";

/// Time scale MyDVD uses for drop-frame titles.
pub const DROP_FRAME_TIME_SCALE: u64 = 29970;

/// Build one chapter entry:
///
/// ```xml
/// <chapter>
///   <name>2</name>
///   <thumbnail><native>false</native></thumbnail>
///   <children/>
///   <url>file:///...</url>
///   <editName>00:00:10.00</editName>
///   <time><value>300000</value><timescale>30000</timescale></time>
/// </chapter>
/// ```
pub fn chapter_entry(
    label: &str,
    edit_name: &str,
    url: &str,
    time_value: u64,
    time_scale: u64,
) -> Element {
    Element::new(CHAPTER)
        .with_child(Element::new(NAME).with_text(label))
        .with_child(Element::new(THUMBNAIL).with_child(Element::new(NATIVE).with_text("false")))
        .with_child(Element::new(CHILDREN))
        .with_child(Element::new(URL).with_text(url))
        .with_child(Element::new(EDIT_NAME).with_text(edit_name))
        .with_child(
            Element::new(TIME)
                .with_child(Element::new(VALUE).with_text(time_value.to_string()))
                .with_child(Element::new(TIMESCALE).with_text(time_scale.to_string())),
        )
}
