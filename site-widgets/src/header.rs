use serde::{Deserialize, Serialize};

/// Scroll offset past which the header turns solid
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderStyle {
    /// Over the hero banner, before the page has scrolled
    Transparent,
    Solid,
}

impl HeaderStyle {
    pub fn from_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            HeaderStyle::Solid
        } else {
            HeaderStyle::Transparent
        }
    }
}
