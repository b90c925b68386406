use crate::WidgetError;

/// Full-screen image viewer over the gallery; navigation wraps around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    current: Option<usize>,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self { len, current: None }
    }

    pub fn open(&mut self, index: usize) -> Result<(), WidgetError> {
        if index >= self.len {
            return Err(WidgetError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn next(&mut self) -> Option<usize> {
        let len = self.len;
        if let Some(index) = self.current.as_mut() {
            *index = (*index + 1) % len;
        }
        self.current
    }

    pub fn prev(&mut self) -> Option<usize> {
        let len = self.len;
        if let Some(index) = self.current.as_mut() {
            *index = (*index + len - 1) % len;
        }
        self.current
    }
}
