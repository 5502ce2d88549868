//! Port to the navigation layer that owns the address bar.

/// Navigation side effects requested by the client core.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Replaces the current view without adding a history entry.
    fn replace(&self, path: &str);

    /// Discards all in-memory state and loads `path` from scratch.
    fn reload(&self, path: &str);

    /// Leaves the application for an external URL (e.g. a payment page).
    fn open_external(&self, url: &str);
}
