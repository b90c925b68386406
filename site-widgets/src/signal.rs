use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Window-level state the page widgets derive their display state from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            scroll_y: 0.0,
        }
    }
}

/// Source of resize and scroll signals
#[derive(Debug)]
pub struct WindowSignals {
    tx: watch::Sender<Viewport>,
}

impl WindowSignals {
    pub fn new(initial: Viewport) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Viewport {
        *self.tx.borrow()
    }

    pub fn emit_resize(&self, width: u32) {
        self.tx.send_if_modified(|viewport| {
            if viewport.width == width {
                return false;
            }
            viewport.width = width;
            true
        });
    }

    pub fn emit_scroll(&self, scroll_y: f64) {
        self.tx.send_if_modified(|viewport| {
            if viewport.scroll_y == scroll_y {
                return false;
            }
            viewport.scroll_y = scroll_y;
            true
        });
    }

    /// Calls `handler` with the current viewport and again on every change
    /// until the returned subscription is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<F>(&self, mut handler: F) -> Subscription
    where
        F: FnMut(Viewport) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let handle = tokio::spawn(async move {
            let initial = *rx.borrow_and_update();
            handler(initial);
            while rx.changed().await.is_ok() {
                let viewport = *rx.borrow_and_update();
                handler(viewport);
            }
        });
        Subscription { handle }
    }
}

impl Default for WindowSignals {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

/// Live listener registered with [`WindowSignals::subscribe`]; dropping it
/// tears the listener down
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
