//! Single-slot holder for the user-visible error banner

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorSurface {
    current: Option<String>,
}

impl ErrorSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever banner is showing
    pub fn set(&mut self, message: impl Into<String>) {
        self.current = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
