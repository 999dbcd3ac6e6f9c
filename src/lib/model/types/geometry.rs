//! Module defining box geometry.

use std::fmt;
use std::str::FromStr;


/// Rectangular region of the image where a caption text is rendered.
///
/// `(x, y)` is the top-left corner of the box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct BoxPosition {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoxPosition {
    #[inline]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        BoxPosition{x, y, width, height}
    }

    /// Y coordinate of the box's bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// X coordinate of the box's horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x as f32 + self.width as f32 / 2.0
    }
}

impl fmt::Display for BoxPosition {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}


/// Which point of a box the rendered lines are horizontally centered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAnchor {
    /// Lines are centered on the horizontal midpoint of the box.
    #[serde(alias = "boxcenter")]
    Center,
    /// Lines are centered on the box's `x` coordinate,
    /// treating it as a midpoint rather than the left edge.
    Origin,
}

impl HorizontalAnchor {
    /// X coordinate that lines rendered in `rect` are centered on.
    #[inline]
    pub fn anchor_x(&self, rect: &BoxPosition) -> f32 {
        match *self {
            HorizontalAnchor::Center => rect.center_x(),
            HorizontalAnchor::Origin => rect.x as f32,
        }
    }
}

impl Default for HorizontalAnchor {
    fn default() -> Self {
        HorizontalAnchor::Center
    }
}

impl FromStr for HorizontalAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "center" | "centre" | "boxcenter" => Ok(HorizontalAnchor::Center),
            "origin" | "x" => Ok(HorizontalAnchor::Origin),
            other => Err(format!("unknown horizontal anchor `{}`", other)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{BoxPosition, HorizontalAnchor};

    #[test]
    fn anchors() {
        let rect = BoxPosition::new(10, 10, 580, 200);
        assert_eq!(300.0, HorizontalAnchor::Center.anchor_x(&rect));
        assert_eq!(10.0, HorizontalAnchor::Origin.anchor_x(&rect));
        assert_eq!(210, rect.bottom());
    }

    #[test]
    fn anchor_from_str() {
        assert_eq!(Ok(HorizontalAnchor::Center), " Center ".parse());
        assert_eq!(Ok(HorizontalAnchor::Origin), "origin".parse());
        assert!("left".parse::<HorizontalAnchor>().is_err());
    }
}
