//! Page state for one paginated list.

use vaultdash_shared::types::{PageRequest, PageWindow};

use super::window;

/// Command to fetch one page. Issued by the pager, executed by whoever owns
/// the transport, and acknowledged with [`Pager::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPage {
    /// Page to fetch.
    pub page: u32,
}

impl FetchPage {
    /// Request parameters for this command.
    #[must_use]
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page)
    }
}

/// Client-side state of a paginated list.
///
/// The page number is client-owned; the window is whatever the server last
/// reported and is never recomputed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    window: Option<PageWindow>,
    in_flight: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Starts on page 1 with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            window: None,
            in_flight: false,
        }
    }

    /// Current client page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Last window reported by the server.
    #[must_use]
    pub fn window(&self) -> Option<&PageWindow> {
        self.window.as_ref()
    }

    /// Returns true while a fetch issued by this pager is unsettled.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Fetches the current page again (initial load or external refresh).
    pub fn refresh(&mut self) -> FetchPage {
        self.in_flight = true;
        FetchPage { page: self.page }
    }

    /// Moves to `page`. Returns `None` when the page is unchanged or below 1.
    pub fn go_to(&mut self, page: u32) -> Option<FetchPage> {
        if page < 1 || page == self.page {
            return None;
        }
        self.page = page;
        Some(self.refresh())
    }

    /// Moves forward one page if "Next" is enabled.
    pub fn next(&mut self) -> Option<FetchPage> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to(self.page.saturating_add(1))
    }

    /// Moves back one page if "Previous" is enabled.
    pub fn previous(&mut self) -> Option<FetchPage> {
        if !self.can_go_previous() {
            return None;
        }
        self.go_to(self.page - 1)
    }

    /// Acknowledges a settled fetch. A failed fetch passes `None` and keeps
    /// the previous window.
    pub fn settle(&mut self, window: Option<PageWindow>) {
        self.in_flight = false;
        if let Some(window) = window {
            self.window = Some(window);
        }
    }

    /// Whether "Previous" is enabled.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        window::can_go_previous(self.page, self.in_flight)
    }

    /// Whether "Next" is enabled. Disabled until a window is known.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.window.is_some_and(|w| {
            window::can_go_next(
                self.page,
                w.number_of_records_per_page,
                w.total_records,
                self.in_flight,
            )
        })
    }

    /// "Showing X to Y of Z" text, once a window is known.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.window.map(|w| window::summary(self.page, &w))
    }
}
