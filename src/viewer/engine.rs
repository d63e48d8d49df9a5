// src/viewer/engine.rs
use super::cache::ImageCache;
use super::config::ViewerConfig;
use super::gesture::SwipeTracker;
use super::timer::{IdleTicket, IdleTimer};
use super::view::PageView;
use super::Direction;
use crate::error::ViewerError;
use crate::story::Page;
use std::collections::HashSet;

/// Side effects an embedding must carry out, in order, after an engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AttachListeners,
    // Best-effort; failure is logged and ignored.
    EnterFullscreen,
    /// Replace any pending idle timer with one that reports `ticket` to
    /// [`ViewerEngine::idle_elapsed`] after `delay_ms`.
    ArmIdleTimer { ticket: IdleTicket, delay_ms: u32 },
    CancelIdleTimer,
    FetchImage(String),
    Render,
    /// Leave full-screen if active, wait for that to settle either way, then
    /// detach the session listeners and hide the overlay.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Navigate(Direction),
    Close,
}

impl KeyCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(KeyCommand::Navigate(Direction::Previous)),
            "ArrowRight" => Some(KeyCommand::Navigate(Direction::Next)),
            "Escape" => Some(KeyCommand::Close),
            _ => None,
        }
    }
}

/// Viewer state machine, generic over the handle type of pre-fetched images.
/// The image cache survives across open/close sessions.
pub struct ViewerEngine<H> {
    pages: Vec<Page>,
    config: ViewerConfig,
    current_index: usize,
    is_open: bool,
    ui_visible: bool,
    image_cache: ImageCache<H>,
    in_flight: HashSet<String>,
    idle_timer: IdleTimer,
    swipe: SwipeTracker,
}

impl<H> ViewerEngine<H> {
    pub fn new(pages: Vec<Page>, config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        Ok(Self::with_validated_config(pages, config))
    }

    pub fn with_default_config(pages: Vec<Page>) -> Self {
        Self::with_validated_config(pages, ViewerConfig::default())
    }

    fn with_validated_config(pages: Vec<Page>, config: ViewerConfig) -> Self {
        Self {
            pages,
            current_index: 0,
            is_open: false,
            ui_visible: true,
            image_cache: ImageCache::new(config.image_cache_capacity),
            in_flight: HashSet::new(),
            idle_timer: IdleTimer::new(),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            config,
        }
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_index)
    }

    // Symmetric clamp into [0, len - 1].
    pub fn clamp_index(&self, index: i64) -> Option<usize> {
        let last = self.pages.len().checked_sub(1)?;
        Some(index.clamp(0, last as i64) as usize)
    }

    pub fn show(&mut self, index: i64) -> Vec<Effect> {
        let Some(index) = self.clamp_index(index) else {
            log::debug!("viewer: show({}) ignored, no pages", index);
            self.is_open = false;
            return Vec::new();
        };

        let was_open = self.is_open;
        self.current_index = index;
        self.is_open = true;
        self.swipe.cancel();
        log::debug!("viewer: open at page {}", index);

        let mut effects = Vec::new();
        if !was_open {
            effects.push(Effect::AttachListeners);
            effects.push(Effect::EnterFullscreen);
        }
        effects.push(self.arm_idle_timer());
        effects.push(Effect::Render);
        self.push_preloads(&mut effects);
        effects
    }

    pub fn hide(&mut self) -> Vec<Effect> {
        if !self.is_open {
            return Vec::new();
        }
        self.is_open = false;
        self.ui_visible = true;
        self.idle_timer.cancel();
        self.swipe.cancel();
        log::debug!("viewer: closed at page {}", self.current_index);

        vec![Effect::CancelIdleTimer, Effect::Close]
    }

    /// Moves one page. Steps past either end are dropped, never wrapped or
    /// queued. While closed only the index moves.
    pub fn navigate(&mut self, direction: Direction) -> Vec<Effect> {
        let Some(target) = direction.apply(self.current_index, self.pages.len()) else {
            return Vec::new();
        };
        self.current_index = target;
        if !self.is_open {
            return Vec::new();
        }

        let arm = self.arm_idle_timer();
        let mut effects = vec![Effect::Render, arm];
        self.push_preloads(&mut effects);
        effects
    }

    /// `None` when the key is not the viewer's; `Some` means the caller
    /// should suppress the key's default action.
    pub fn handle_key(&mut self, key: &str) -> Option<Vec<Effect>> {
        if !self.is_open {
            return None;
        }
        let effects = match KeyCommand::from_key(key)? {
            KeyCommand::Navigate(direction) => self.navigate(direction),
            KeyCommand::Close => self.hide(),
        };
        Some(effects)
    }

    pub fn touch_start(&mut self, x: f64, y: f64) {
        if self.is_open {
            self.swipe.start(x, y);
        }
    }

    pub fn touch_end(&mut self, x: f64, y: f64) -> Vec<Effect> {
        if !self.is_open {
            self.swipe.cancel();
            return Vec::new();
        }
        match self.swipe.end(x, y) {
            Some(direction) => self.navigate(direction),
            None => Vec::new(),
        }
    }

    pub fn pointer_moved(&mut self) -> Vec<Effect> {
        self.reset_hide_ui_timer()
    }

    pub fn reset_hide_ui_timer(&mut self) -> Vec<Effect> {
        if !self.is_open {
            return Vec::new();
        }
        let was_hidden = !self.ui_visible;
        let arm = self.arm_idle_timer();
        if was_hidden {
            vec![Effect::Render, arm]
        } else {
            vec![arm]
        }
    }

    /// Called when an armed idle timer fires. Stale tickets are ignored.
    pub fn idle_elapsed(&mut self, ticket: IdleTicket) -> Vec<Effect> {
        if !self.idle_timer.expire(ticket) || !self.is_open {
            return Vec::new();
        }
        self.ui_visible = false;
        vec![Effect::Render]
    }

    /// References for the current page and its neighbours that are neither
    /// cached nor in flight. Returned references stay in flight until
    /// [`Self::image_loaded`] or [`Self::image_failed`].
    pub fn preload_adjacent_images(&mut self) -> Vec<String> {
        if self.pages.is_empty() {
            return Vec::new();
        }
        let first = self.current_index.saturating_sub(1);
        let last = (self.current_index + 1).min(self.pages.len() - 1);

        let mut targets = Vec::new();
        for page in &self.pages[first..=last] {
            let Some(src) = page.image_src() else {
                continue;
            };
            if self.image_cache.contains(src) || self.in_flight.contains(src) {
                continue;
            }
            self.in_flight.insert(src.to_string());
            targets.push(src.to_string());
        }
        targets
    }

    pub fn image_loaded(&mut self, src: String, handle: H) -> Vec<Effect> {
        self.in_flight.remove(&src);
        let shows_now =
            self.is_open && self.current_page().and_then(Page::image_src) == Some(src.as_str());

        if let Some(evicted) = self.image_cache.insert(src, handle) {
            log::debug!("viewer: evicted {} from image cache", evicted);
        }
        if shows_now {
            vec![Effect::Render]
        } else {
            Vec::new()
        }
    }

    pub fn image_failed(&mut self, src: &str, reason: &str) {
        self.in_flight.remove(src);
        log::warn!("viewer: failed to pre-fetch {}: {}", src, reason);
    }

    // An open session over an emptied list closes.
    pub fn replace_pages(&mut self, pages: Vec<Page>) -> Vec<Effect> {
        self.pages = pages;
        if self.pages.is_empty() {
            self.current_index = 0;
            return self.hide();
        }
        self.current_index = self.current_index.min(self.pages.len() - 1);
        if !self.is_open {
            return Vec::new();
        }
        let mut effects = vec![Effect::Render];
        self.push_preloads(&mut effects);
        effects
    }

    pub fn view(&self) -> Option<PageView> {
        if !self.is_open {
            return None;
        }
        self.describe_current()
    }

    /// The current page whether or not the viewer is open. Embeddings keep
    /// drawing it while a close is still settling.
    pub fn describe_current(&self) -> Option<PageView> {
        PageView::describe(
            &self.pages,
            self.current_index,
            self.config.default_aspect_ratio,
            self.ui_visible,
            |src| self.image_cache.contains(src),
        )
    }

    fn arm_idle_timer(&mut self) -> Effect {
        self.ui_visible = true;
        Effect::ArmIdleTimer {
            ticket: self.idle_timer.reset(),
            delay_ms: self.config.idle_hide_delay_ms,
        }
    }

    fn push_preloads(&mut self, effects: &mut Vec<Effect>) {
        effects.extend(self.preload_adjacent_images().into_iter().map(Effect::FetchImage));
    }
}

#[cfg(test)]
impl<H> ViewerEngine<H> {
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub fn image_cache(&self) -> &ImageCache<H> {
        &self.image_cache
    }

    pub fn cached_image(&self, src: &str) -> Option<&H> {
        self.image_cache.get(src)
    }
}
