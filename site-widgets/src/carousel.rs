use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::WidgetError;

/// Smallest viewport width at which a carousel shows `per_page` items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    pub per_page: usize,
}

/// Breakpoints ordered from the widest viewport down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Breakpoint>")]
pub struct Breakpoints(Vec<Breakpoint>);

impl Breakpoints {
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Result<Self, WidgetError> {
        if let Some(bad) = breakpoints.iter().find(|bp| bp.per_page == 0) {
            return Err(WidgetError::InvalidBreakpoint(bad.min_width));
        }
        breakpoints.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        Ok(Self(breakpoints))
    }

    /// Items per page for a viewport width; one when no breakpoint applies
    pub fn per_page(&self, width: u32) -> usize {
        self.0
            .iter()
            .find(|bp| width >= bp.min_width)
            .map(|bp| bp.per_page)
            .unwrap_or(1)
    }
}

impl TryFrom<Vec<Breakpoint>> for Breakpoints {
    type Error = WidgetError;

    fn try_from(breakpoints: Vec<Breakpoint>) -> Result<Self, Self::Error> {
        Self::new(breakpoints)
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self(vec![
            Breakpoint {
                min_width: 1024,
                per_page: 3,
            },
            Breakpoint {
                min_width: 768,
                per_page: 2,
            },
        ])
    }
}

/// Manually paginated carousel that re-derives its page size on resize
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    breakpoints: Breakpoints,
    per_page: usize,
    page: usize,
}

impl Carousel {
    pub fn new(len: usize, breakpoints: Breakpoints, width: u32) -> Self {
        let per_page = breakpoints.per_page(width);
        Self {
            len,
            breakpoints,
            per_page,
            page: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.len.div_ceil(self.per_page).max(1)
    }

    /// Indices of the items on the current page
    pub fn visible(&self) -> Range<usize> {
        let start = (self.page * self.per_page).min(self.len);
        let end = (start + self.per_page).min(self.len);
        start..end
    }

    pub fn can_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    pub fn can_prev(&self) -> bool {
        self.page > 0
    }

    /// Stops on the last page
    pub fn next(&mut self) {
        if self.can_next() {
            self.page += 1;
        }
    }

    /// Stops on the first page
    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn go_to(&mut self, page: usize) -> Result<(), WidgetError> {
        let count = self.page_count();
        if page >= count {
            return Err(WidgetError::PageOutOfRange { page, count });
        }
        self.page = page;
        Ok(())
    }

    /// Recomputes the page size for a new viewport width, keeping the first
    /// visible item on screen. Returns whether the page size changed.
    pub fn resize(&mut self, width: u32) -> bool {
        let per_page = self.breakpoints.per_page(width);
        if per_page == self.per_page {
            return false;
        }

        let first_visible = self.page * self.per_page;
        self.per_page = per_page;
        self.page = (first_visible / per_page).min(self.page_count() - 1);
        tracing::debug!(
            "Carousel resized to {} per page, now on page {}",
            per_page,
            self.page
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_page_follows_breakpoints() {
        let breakpoints = Breakpoints::default();
        assert_eq!(breakpoints.per_page(1440), 3);
        assert_eq!(breakpoints.per_page(1024), 3);
        assert_eq!(breakpoints.per_page(900), 2);
        assert_eq!(breakpoints.per_page(768), 2);
        assert_eq!(breakpoints.per_page(375), 1);
    }

    #[test]
    fn test_breakpoints_are_sorted_and_checked() {
        let breakpoints = Breakpoints::new(vec![
            Breakpoint {
                min_width: 600,
                per_page: 2,
            },
            Breakpoint {
                min_width: 1200,
                per_page: 4,
            },
        ])
        .unwrap();
        assert_eq!(breakpoints.per_page(1300), 4);
        assert_eq!(breakpoints.per_page(700), 2);

        let invalid = Breakpoints::new(vec![Breakpoint {
            min_width: 500,
            per_page: 0,
        }]);
        assert_eq!(invalid, Err(WidgetError::InvalidBreakpoint(500)));
    }

    #[test]
    fn test_deserialized_breakpoints_are_checked() {
        let breakpoints: Breakpoints = serde_json::from_str(
            r#"[{"min_width":600,"per_page":2},{"min_width":1200,"per_page":4}]"#,
        )
        .unwrap();
        assert_eq!(breakpoints.per_page(1300), 4);
        assert_eq!(breakpoints.per_page(700), 2);
        assert_eq!(breakpoints.per_page(300), 1);

        let invalid = serde_json::from_str::<Breakpoints>(r#"[{"min_width":0,"per_page":0}]"#);
        let err = invalid.unwrap_err().to_string();
        assert!(err.contains("at least one item per page"), "{err}");
    }

    #[test]
    fn test_pages_stop_at_the_ends() {
        let mut carousel = Carousel::new(7, Breakpoints::default(), 1280);
        assert_eq!(carousel.per_page(), 3);
        assert_eq!(carousel.page_count(), 3);
        assert_eq!(carousel.visible(), 0..3);
        assert!(!carousel.can_prev());
        assert!(carousel.can_next());

        carousel.prev();
        assert_eq!(carousel.page(), 0);

        carousel.next();
        carousel.next();
        assert_eq!(carousel.visible(), 6..7);
        assert!(!carousel.can_next());
        assert!(carousel.can_prev());

        carousel.next();
        assert_eq!(carousel.page(), 2);

        carousel.prev();
        assert_eq!(carousel.page(), 1);
    }

    #[test]
    fn test_go_to_rejects_missing_page() {
        let mut carousel = Carousel::new(4, Breakpoints::default(), 800);
        assert!(carousel.go_to(1).is_ok());
        assert_eq!(carousel.visible(), 2..4);
        assert_eq!(
            carousel.go_to(2),
            Err(WidgetError::PageOutOfRange { page: 2, count: 2 })
        );
        assert_eq!(carousel.page(), 1);
    }

    #[test]
    fn test_resize_keeps_first_visible_item() {
        let mut carousel = Carousel::new(9, Breakpoints::default(), 1280);
        carousel.go_to(2).unwrap();
        assert_eq!(carousel.visible(), 6..9);

        assert!(carousel.resize(375));
        assert_eq!(carousel.per_page(), 1);
        assert_eq!(carousel.page_count(), 9);
        assert_eq!(carousel.visible(), 6..7);

        assert!(!carousel.resize(400));

        assert!(carousel.resize(800));
        assert_eq!(carousel.page(), 3);
        assert_eq!(carousel.visible(), 6..8);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(0, Breakpoints::default(), 1280);
        assert!(carousel.is_empty());
        assert_eq!(carousel.page_count(), 1);
        assert_eq!(carousel.visible(), 0..0);
        assert!(!carousel.can_next());
        assert!(!carousel.can_prev());
        carousel.next();
        carousel.prev();
        assert_eq!(carousel.page(), 0);
    }
}
