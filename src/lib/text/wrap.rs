//! Breaking text into lines.

use std::mem;


/// Source of horizontal text measurements.
pub trait TextMetrics {
    /// Compute the pixel width of given single line of text.
    fn text_width(&self, s: &str) -> f32;
}

impl<F: Fn(&str) -> f32> TextMetrics for F {
    #[inline]
    fn text_width(&self, s: &str) -> f32 {
        self(s)
    }
}


/// Break the text into lines fitting given pixel width.
///
/// Words are packed greedily: a word goes to the current line
/// if the line still fits with it, and starts a new line otherwise.
/// A word wider than the whole line occupies a line of its own
/// and is never split. Empty (or all-whitespace) text yields no lines.
pub fn wrap<M: TextMetrics + ?Sized>(text: &str, metrics: &M, max_width: f32) -> Vec<String> {
    let mut result = vec![];

    let mut current_line = String::new();
    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current_line, word);
        if metrics.text_width(&candidate) <= max_width {
            current_line = candidate;
        } else {
            result.push(mem::replace(&mut current_line, word.to_owned()));
        }
    }
    if !current_line.is_empty() {
        result.push(current_line);
    }

    trace!("Text of length {} wrapped into {} line(s) for width {}",
        text.len(), result.len(), max_width);
    result
}
