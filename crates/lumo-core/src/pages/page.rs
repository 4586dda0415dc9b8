// src/pages/page.rs
//! Core page abstraction and type-erased wrapper for the UI page system.
//!
//! [`Page`] defines the lifecycle, rendering, and interaction contract for every
//! screen in the application. [`PageWrapper`] is a concrete enum that
//! delegates every [`Page`] method to the inner page type, so the
//! [`PageManager`](super::page_manager::PageManager) can hold a
//! `heapless::Vec<PageWrapper, N>` without trait objects.

use crate::ui::core::{Action, PageEvent, PageId, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use alloc::boxed::Box;

use super::{BusinessCardPage, DicePage, SensorsPage};

// ---------------------------------------------------------------------------
// Page trait
// ---------------------------------------------------------------------------

/// Trait that all navigable UI pages must implement.
///
/// The [`PageManager`](super::page_manager::PageManager) calls these methods
/// in a well-defined order:
///
/// 1. **`on_activate`**: once, when the page becomes the active page.
/// 2. **`on_event`**: zero or more times per frame for incoming events.
/// 3. **`handle_touch`**: when a touch event targets this page.
/// 4. **`draw_page`**: when `is_dirty()` is true.
/// 5. **`on_deactivate`**: once, when navigating away from the page.
pub trait Page {
    /// Unique identifier used for navigation and lookup.
    fn id(&self) -> PageId;

    /// Human-readable title (may appear in headers or debug logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {
        self.mark_dirty();
    }

    /// Called once when this page is no longer the active page.
    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return a navigation [`Action`].
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event was consumed and the page needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}

// ---------------------------------------------------------------------------
// PageWrapper
// ---------------------------------------------------------------------------

/// Enum-based wrapper that stores one of the concrete page types.
///
/// Each variant boxes its page to keep the enum size uniform. When adding a
/// new page, add a variant here and extend the delegation below.
pub enum PageWrapper {
    Dice(Box<DicePage>),
    BusinessCard(Box<BusinessCardPage>),
    Sensors(Box<SensorsPage>),
}

macro_rules! delegate {
    ($self:ident, $page:ident => $body:expr) => {
        match $self {
            PageWrapper::Dice($page) => $body,
            PageWrapper::BusinessCard($page) => $body,
            PageWrapper::Sensors($page) => $body,
        }
    };
}

impl Page for PageWrapper {
    fn id(&self) -> PageId {
        delegate!(self, page => page.id())
    }

    fn title(&self) -> &str {
        delegate!(self, page => page.title())
    }

    fn on_activate(&mut self) {
        delegate!(self, page => page.on_activate())
    }

    fn on_deactivate(&mut self) {
        delegate!(self, page => page.on_deactivate())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        delegate!(self, page => page.handle_touch(event))
    }

    fn on_event(&mut self, event: &PageEvent) -> bool {
        delegate!(self, page => page.on_event(event))
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        delegate!(self, page => page.draw_page(display))
    }

    fn bounds(&self) -> Rectangle {
        delegate!(self, page => Page::bounds(&**page))
    }

    fn is_dirty(&self) -> bool {
        delegate!(self, page => Page::is_dirty(&**page))
    }

    fn mark_clean(&mut self) {
        delegate!(self, page => Page::mark_clean(&mut **page))
    }

    fn mark_dirty(&mut self) {
        delegate!(self, page => Page::mark_dirty(&mut **page))
    }
}

impl From<DicePage> for PageWrapper {
    fn from(page: DicePage) -> Self {
        PageWrapper::Dice(Box::new(page))
    }
}

impl From<BusinessCardPage> for PageWrapper {
    fn from(page: BusinessCardPage) -> Self {
        PageWrapper::BusinessCard(Box::new(page))
    }
}

impl From<SensorsPage> for PageWrapper {
    fn from(page: SensorsPage) -> Self {
        PageWrapper::Sensors(Box::new(page))
    }
}
