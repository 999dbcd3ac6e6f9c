//! Distribution of a single caption string between the boxes of a template.

use itertools::Itertools;

use crate::model::{BoxPosition, CAPTION_DELIMITER, CAPTION_JOINER};
use super::error::CaptionError;


/// Split the caption into trimmed segments at every delimiter.
///
/// A caption without delimiters is a single segment.
pub fn split_caption(caption: &str) -> Vec<String> {
    caption.split(CAPTION_DELIMITER).map(|s| s.trim().to_owned()).collect()
}

/// Join caption segments back into a single caption string.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().map(|s| s.as_ref()).join(CAPTION_JOINER)
}


/// Split the caption into texts for the individual boxes of a template.
///
/// * With explicit box positions, segments are assigned to positions in order.
///   Boxes left without a segment repeat the last one, while surplus segments
///   are appended to the text of the last box.
/// * With at most one box, all non-empty segments are joined into one text.
/// * With two boxes, the caption must contain a delimiter,
///   and it is split at the first one into the top and bottom text.
///
/// Other combinations cannot be distributed.
pub fn distribute(caption: &str,
                  box_count: usize,
                  positions: Option<&[BoxPosition]>) -> Result<Vec<String>, CaptionError> {
    if let Some(positions) = positions {
        let segments = split_caption(caption);
        let count = positions.len();
        let last = segments.last().cloned().unwrap_or_default();

        let mut result: Vec<String> = (0..count)
            .map(|i| segments.get(i).cloned().unwrap_or_else(|| last.clone()))
            .collect();
        if segments.len() > count && count > 0 {
            let surplus = segments[count..].iter().filter(|s| !s.is_empty()).join(" ");
            let last_box = &mut result[count - 1];
            *last_box = format!("{} {}", last_box, surplus).trim().to_owned();
        }
        trace!("Caption distributed between {} explicit position(s): {:?}", count, result);
        return Ok(result);
    }

    match box_count {
        0 | 1 => {
            let text = split_caption(caption).into_iter().filter(|s| !s.is_empty()).join(" ");
            Ok(vec![text])
        }
        2 => match caption.find(CAPTION_DELIMITER) {
            Some(i) => {
                let (top, bottom) = (&caption[..i], &caption[i + CAPTION_DELIMITER.len()..]);
                Ok(vec![top.trim().to_owned(), bottom.trim().to_owned()])
            }
            None => Err(CaptionError::Format(format!(
                "caption for a two-box template must separate the texts with `{}`",
                CAPTION_DELIMITER))),
        },
        n => Err(CaptionError::Validation(format!(
            "template with {} boxes has no box positions to distribute the caption to", n))),
    }
}
