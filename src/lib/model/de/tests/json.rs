//! Tests for deserializing render requests from JSON.

use serde_json;
use speculoos::prelude::*;

use crate::model::{BoxPosition, BoxSpec, Color, RenderRequest};


#[test]
fn boxes_with_text_only() {
    let input = r##"{
        "template_id": "61579",
        "font": "impact",
        "max_font_size": 50,
        "color": "#ffffff",
        "outline_color": "#000000",
        "boxes": [
            {"text": "KETIKA KODE PROGRAM LANGSUNG JALAN"},
            {"text": "PADAHAL BARU SEKALI RUNNING"}
        ]
    }"##;
    assert_that!(parse(input)).is_ok().is_equal_to(&*TWO_BOXES);
}

#[test]
fn numeric_template_id() {
    let input = r#"{"template_id": 61579, "caption": "a || b"}"#;
    let request = parse(input).unwrap();
    assert_eq!("61579", request.template_id);
    assert_eq!(Some("a || b".to_owned()), request.caption);
    assert!(request.boxes.is_empty());
}

#[test]
fn boxes_with_positions_and_colors() {
    let input = r##"{
        "template_id": "61579",
        "boxes": [
            {"text": "Saya sedang belajar API", "x": 10, "y": 10, "width": 548, "height": 100},
            {"text": "JSON-nya sangat rapi", "x": 10, "y": 225, "width": 548, "height": 100,
             "color": "#00ff00", "outline_color": [0, 0, 0], "stroke_width": 3}
        ],
        "filename": "61579_zero_id.png"
    }"##;
    let request = parse(input).unwrap();
    assert_eq!(2, request.boxes.len());
    assert_eq!(BoxPosition::new(10, 225, 548, 100),
               request.boxes[1].place(BoxPosition::default()));
    assert_eq!(Some(Color(0, 0xff, 0)), request.boxes[1].color);
    assert_eq!(Some(Color::black()), request.boxes[1].outline_color);
    assert_eq!(Some(3), request.boxes[1].stroke_width);
    assert_eq!(Some("61579_zero_id.png".to_owned()), request.filename);
}

#[test]
fn missing_template_id() {
    assert_that!(parse(r#"{"caption": "a || b"}"#)).is_err();
    assert_that!(parse(r#"{"template_id": "", "caption": "a"}"#)).is_err();
}

#[test]
fn invalid_color() {
    assert_that!(parse(r##"{"template_id": "1", "color": "#ff00ff80"}"##)).is_err();
    assert_that!(parse(r#"{"template_id": "1", "color": "nope"}"#)).is_err();
}

#[test]
fn unknown_fields_are_ignored() {
    let request = parse(r#"{"template_id": "1", "caption": "x", "language": "id"}"#);
    assert_that!(request).is_ok();
}


// Common test data

lazy_static! {
    static ref TWO_BOXES: RenderRequest = RenderRequest{
        template_id: "61579".into(),
        boxes: vec![
            BoxSpec::text("KETIKA KODE PROGRAM LANGSUNG JALAN"),
            BoxSpec::text("PADAHAL BARU SEKALI RUNNING"),
        ],
        font: Some("impact".into()),
        max_font_size: Some(50),
        color: Some(Color::white()),
        outline_color: Some(Color::black()),
        ..Default::default()
    };
}


// Utility functions

fn parse(json: &str) -> Result<RenderRequest, serde_json::Error> {
    serde_json::from_str(json)
}
