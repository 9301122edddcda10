//! Display-slot bookkeeping for rendering components.
//!
//! A slot can request a new picture before the previous one settles. Each
//! request gets a ticket and only the latest ticket may apply its result.

use std::sync::Arc;

use crate::domain::entities::{PictureSourceSet, aspect_ratio_of};
use crate::domain::errors::ResolveError;

/// Ticket identifying one request issued by a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// What a slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotStatus {
    /// Nothing requested.
    #[default]
    Empty,
    /// A request is outstanding.
    Loading,
    /// Resolution succeeded.
    Ready(Arc<PictureSourceSet>),
    /// The catalog had nothing usable; render the plain fallback.
    Missing,
    /// Resolution raised an error.
    Failed(String),
}

impl SlotStatus {
    /// Returns true if a picture is available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns true while a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// One place on the page that shows a resolved picture.
#[derive(Debug, Default)]
pub struct PictureSlot {
    name: Option<String>,
    latest: u64,
    status: SlotStatus,
}

impl PictureSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request for `name`, superseding any outstanding one.
    pub fn request(&mut self, name: impl Into<String>) -> RequestTicket {
        self.latest += 1;
        self.name = Some(name.into());
        self.status = SlotStatus::Loading;
        RequestTicket(self.latest)
    }

    /// Applies a cache outcome. Returns false and changes nothing if the
    /// ticket has been superseded.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Option<Arc<PictureSourceSet>>, ResolveError>,
    ) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.status = match outcome {
            Ok(Some(picture)) => SlotStatus::Ready(picture),
            Ok(None) => SlotStatus::Missing,
            Err(err) => SlotStatus::Failed(err.to_string()),
        };
        true
    }

    /// Returns the requested name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &SlotStatus {
        &self.status
    }

    /// Aspect ratio for the loading placeholder.
    #[must_use]
    pub fn placeholder_ratio(&self) -> String {
        match &self.status {
            SlotStatus::Ready(picture) => aspect_ratio_of(picture),
            _ => "1/1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(width: u32, height: u32) -> Arc<PictureSourceSet> {
        Arc::new(PictureSourceSet::Raster {
            src: "/a.jpg".to_string(),
            width: Some(width),
            height: Some(height),
            srcset: None,
            sources: None,
        })
    }

    #[test]
    fn test_request_marks_loading() {
        let mut slot = PictureSlot::new();
        assert_eq!(slot.status(), &SlotStatus::Empty);

        slot.request("hero.jpg");

        assert!(slot.status().is_loading());
        assert_eq!(slot.name(), Some("hero.jpg"));
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut slot = PictureSlot::new();
        let stale = slot.request("old.jpg");
        let current = slot.request("new.jpg");

        assert!(!slot.apply(stale, Ok(Some(picture(1, 1)))));
        assert!(slot.status().is_loading());

        assert!(slot.apply(current, Ok(Some(picture(16, 9)))));
        assert!(slot.status().is_ready());
        assert_eq!(slot.placeholder_ratio(), "16/9");
    }

    #[test]
    fn test_missing_and_failed() {
        let mut slot = PictureSlot::new();
        let ticket = slot.request("missing.png");
        slot.apply(ticket, Ok(None));
        assert_eq!(slot.status(), &SlotStatus::Missing);
        assert_eq!(slot.placeholder_ratio(), "1/1");

        let ticket = slot.request("broken.png");
        slot.apply(ticket, Err(ResolveError::loader_panicked("images/broken.png")));
        assert!(matches!(slot.status(), SlotStatus::Failed(msg) if msg.contains("broken.png")));
    }
}
