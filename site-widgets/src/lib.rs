//! Display-state logic behind the studio page's interactive sections: the
//! gallery carousel, the lightbox viewer, the scroll-aware header and the
//! window signals that drive them.

pub mod carousel;
pub mod header;
pub mod lightbox;
pub mod signal;

pub use carousel::{Breakpoint, Breakpoints, Carousel};
pub use header::{HeaderStyle, DEFAULT_SCROLL_THRESHOLD};
pub use lightbox::Lightbox;
pub use signal::{Subscription, Viewport, WindowSignals};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("Page {page} does not exist (carousel has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("Image {index} does not exist (gallery has {len} images)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Breakpoint at {0}px must show at least one item per page")]
    InvalidBreakpoint(u32),
}
