//! Geometry of caption boxes.

use crate::model::{BoxPosition, Template, BOX_MARGIN};


/// Box layout synthesized for a template without explicit box positions.
///
/// A single box covers the whole image minus the margin, while two boxes
/// are stacked at the top and the bottom. Other box counts have no layout.
pub fn default_layout(box_count: usize, width: u32, height: u32) -> Vec<BoxPosition> {
    let margin = BOX_MARGIN;
    let inner_width = width.saturating_sub(2 * margin);
    match box_count {
        0 | 1 => vec![
            BoxPosition::new(
                margin as i32, margin as i32, inner_width, height.saturating_sub(2 * margin)),
        ],
        2 => vec![
            BoxPosition::new(margin as i32, margin as i32, inner_width, height / 2),
            BoxPosition::new(
                margin as i32, (height - height / 3) as i32, inner_width, height / 3),
        ],
        _ => vec![],
    }
}

/// Layout of boxes for given template rendered on an image of given size.
pub fn template_layout(template: &Template, width: u32, height: u32) -> Vec<BoxPosition> {
    match template.positions() {
        Some(positions) => positions.to_vec(),
        None => default_layout(template.box_count, width, height),
    }
}

/// Position of a request box that neither the template nor the request place.
///
/// The first box goes to the top of the image, every other one
/// to the bottom, one font size (plus margin) above the lower edge.
pub fn fallback_box(index: usize, width: u32, height: u32, font_size: u32) -> BoxPosition {
    let margin = BOX_MARGIN as i64;
    let x = margin;
    let y = if index == 0 {
        margin
    } else {
        (height as i64 - font_size as i64 - margin).max(0)
    };
    let box_width = (width as i64 - x - margin).max(0);
    let box_height = (height as i64 - y - margin).max(0);
    BoxPosition::new(x as i32, y as i32, box_width as u32, box_height as u32)
}


#[cfg(test)]
mod tests {
    use crate::model::{BoxPosition, Template};
    use super::{default_layout, fallback_box, template_layout};

    #[test]
    fn single_box() {
        assert_eq!(vec![BoxPosition::new(10, 10, 580, 380)], default_layout(1, 600, 400));
        assert_eq!(default_layout(1, 600, 400), default_layout(0, 600, 400));
    }

    #[test]
    fn two_boxes() {
        let layout = default_layout(2, 600, 400);
        assert_eq!(vec![
            BoxPosition::new(10, 10, 580, 200),
            BoxPosition::new(10, 267, 580, 133),
        ], layout);
    }

    #[test]
    fn more_boxes() {
        assert!(default_layout(3, 600, 400).is_empty());
    }

    #[test]
    fn tiny_image() {
        assert_eq!(vec![BoxPosition::new(10, 10, 0, 0)], default_layout(1, 12, 5));
    }

    #[test]
    fn explicit_positions() {
        let mut template = Template::new("t", "t.png", 600, 400);
        template.box_count = 3;
        template.box_positions = Some(vec![BoxPosition::new(1, 2, 3, 4)]);
        assert_eq!(vec![BoxPosition::new(1, 2, 3, 4)], template_layout(&template, 600, 400));

        template.box_positions = Some(vec![]);
        assert!(template_layout(&template, 600, 400).is_empty());
    }

    #[test]
    fn fallback_boxes() {
        assert_eq!(BoxPosition::new(10, 10, 580, 380), fallback_box(0, 600, 400, 40));
        assert_eq!(BoxPosition::new(10, 350, 580, 40), fallback_box(1, 600, 400, 40));
        assert_eq!(BoxPosition::new(10, 350, 580, 40), fallback_box(5, 600, 400, 40));
        assert_eq!(BoxPosition::new(10, 0, 0, 20), fallback_box(1, 15, 30, 40));
    }
}
