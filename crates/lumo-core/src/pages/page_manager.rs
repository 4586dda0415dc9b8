// src/pages/page_manager.rs
//! Page manager with navigation and event dispatching.

use crate::pages::page::{Page, PageWrapper};
use crate::ui::core::{Action, PageEvent, PageId, TouchEvent};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

/// Maximum number of registered pages.
pub const MAX_PAGES: usize = 4;

/// Maximum depth of the back-navigation stack.
pub const MAX_NAVIGATION_DEPTH: usize = 4;

/// Manages page navigation, rendering, and event dispatching.
pub struct PageManager {
    pages: Vec<PageWrapper, MAX_PAGES>,
    current_page: PageId,
    navigation_stack: Vec<PageId, MAX_NAVIGATION_DEPTH>,
}

impl PageManager {
    pub fn new(initial_page: PageId) -> Self {
        Self {
            pages: Vec::new(),
            current_page: initial_page,
            navigation_stack: Vec::new(),
        }
    }

    /// Register a new page
    pub fn register_page(&mut self, page: impl Into<PageWrapper>) {
        let page = page.into();
        let id = page.id();
        if self.pages.push(page).is_err() {
            warn!("Page table full, dropping {:?}", id);
        }
    }

    /// Navigate to a specific page
    ///
    /// Returns `false` if `page_id` is already current or the stack is full.
    pub fn navigate_to(&mut self, page_id: PageId) -> bool {
        if page_id == self.current_page {
            debug!("Already on {:?}", page_id);
            return false;
        }

        // Push current page to stack for back navigation
        if self.navigation_stack.push(self.current_page).is_err() {
            warn!("Navigation stack full, staying on {:?}", self.current_page);
            return false;
        }

        if let Some(current) = self.get_current_page_mut() {
            current.on_deactivate();
        }

        info!("Navigating {:?} -> {:?}", self.current_page, page_id);
        self.current_page = page_id;

        if let Some(new_page) = self.get_current_page_mut() {
            new_page.on_activate();
        }
        true
    }

    /// Go back to previous page
    ///
    /// Does nothing and returns `false` at the root page.
    pub fn go_back(&mut self) -> bool {
        if let Some(prev_page) = self.navigation_stack.pop() {
            if let Some(current) = self.get_current_page_mut() {
                current.on_deactivate();
            }
            info!("Back {:?} -> {:?}", self.current_page, prev_page);
            self.current_page = prev_page;
            if let Some(page) = self.get_current_page_mut() {
                page.on_activate();
            }
            true
        } else {
            debug!("Back at root page {:?} ignored", self.current_page);
            false
        }
    }

    /// Apply a navigation [`Action`]. Returns `true` if the page changed.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::NavigateToPage(page_id) => self.navigate_to(page_id),
            Action::GoBack => self.go_back(),
        }
    }

    /// Get mutable reference to current page
    fn get_current_page_mut(&mut self) -> Option<&mut PageWrapper> {
        self.pages.iter_mut().find(|p| p.id() == self.current_page)
    }

    /// Get reference to current page
    fn get_current_page(&self) -> Option<&PageWrapper> {
        self.pages.iter().find(|p| p.id() == self.current_page)
    }

    /// Handle touch events, returns action if any
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        debug!("Processing touch event: {:?}", event);
        if let Some(page) = self.get_current_page_mut() {
            let result = page.handle_touch(event);
            debug!("Touch result: {:?}", result);
            result
        } else {
            debug!("No current page to handle touch");
            None
        }
    }

    /// Dispatch event to every registered page so hidden pages are current
    /// when they are shown again.
    ///
    /// Returns true if the current page needs redraw
    pub fn broadcast_event(&mut self, event: &PageEvent) -> bool {
        let current = self.current_page;
        let mut needs_redraw = false;
        for page in self.pages.iter_mut() {
            let changed = page.on_event(event);
            if page.id() == current {
                needs_redraw |= changed;
            }
        }
        needs_redraw
    }

    /// Draw the current page (full redraw)
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if let Some(page) = self.get_current_page_mut() {
            page.draw_page(display)?;
            page.mark_clean();
        }
        Ok(())
    }

    /// Check if current page is dirty
    pub fn is_dirty(&self) -> bool {
        self.get_current_page().is_some_and(|page| page.is_dirty())
    }

    /// Force the current page to redraw on the next frame
    pub fn mark_dirty(&mut self) {
        if let Some(page) = self.get_current_page_mut() {
            page.mark_dirty();
        }
    }

    /// Get current page ID
    pub fn current_page_id(&self) -> PageId {
        self.current_page
    }

    /// Number of pages that `go_back` can return through
    pub fn depth(&self) -> usize {
        self.navigation_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardDetails;
    use crate::pages::{BusinessCardPage, SensorsPage};
    use crate::ui::screen_bounds;

    fn card_manager() -> PageManager {
        let mut manager = PageManager::new(PageId::BusinessCard);
        manager.register_page(BusinessCardPage::new(screen_bounds(), &CardDetails::default()));
        manager.register_page(SensorsPage::new(screen_bounds()));
        manager
    }

    #[test]
    fn starts_on_initial_page() {
        let manager = card_manager();
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn navigate_and_back() {
        let mut manager = card_manager();

        assert!(manager.navigate_to(PageId::Sensors));
        assert_eq!(manager.current_page_id(), PageId::Sensors);
        assert_eq!(manager.depth(), 1);

        assert!(manager.go_back());
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn back_at_root_is_noop() {
        let mut manager = card_manager();
        assert!(!manager.go_back());
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
    }

    #[test]
    fn navigating_to_current_page_is_noop() {
        let mut manager = card_manager();
        assert!(!manager.navigate_to(PageId::BusinessCard));
        assert_eq!(manager.depth(), 0);
    }

    #[test]
    fn actions_drive_navigation() {
        let mut manager = card_manager();
        assert!(manager.apply_action(Action::NavigateToPage(PageId::Sensors)));
        assert!(manager.apply_action(Action::GoBack));
        assert!(!manager.apply_action(Action::GoBack));
        assert_eq!(manager.current_page_id(), PageId::BusinessCard);
    }
}
