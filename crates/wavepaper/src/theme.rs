use renderer::{FrameTheme, ThemeDirector};
use tracing::{debug, info, warn};

use crate::page::{PageModel, INK, PAPER};
use crate::store::{PreferenceStore, MODE_KEY};

/// Toggle-button markup shown while dark mode is active.
pub const ICON_SUN: &str = r#"<i class="bi bi-sun-fill"></i>"#;

/// Toggle-button markup shown while light mode is active.
pub const ICON_MOON: &str = r#"<i class="bi bi-moon-stars-fill"></i>"#;

/// Colour scheme the backdrop renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// Value persisted under [`MODE_KEY`], doubling as the body class.
    pub fn storage_value(self) -> &'static str {
        match self {
            Mode::Light => "light-mode",
            Mode::Dark => "dark-mode",
        }
    }

    /// Maps a stored value back onto a mode.
    ///
    /// Absent and unrecognised values both fall back to light so a damaged
    /// preference can never block start-up.
    pub fn from_storage_value(value: Option<&str>) -> Self {
        match value {
            Some("dark-mode") => Mode::Dark,
            Some("light-mode") | None => Mode::Light,
            Some(other) => {
                warn!(value = other, "unrecognised stored mode, defaulting to light");
                Mode::Light
            }
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

/// Owns the current mode and keeps page, store, and renderer in agreement.
///
/// Construction restores the stored preference (or an explicit override) and
/// styles the page for it, so the first presented frame already matches.
pub struct ModeController<S: PreferenceStore> {
    mode: Mode,
    page: PageModel,
    store: S,
}

impl<S: PreferenceStore> ModeController<S> {
    pub fn new(store: S, override_mode: Option<Mode>) -> Self {
        let stored = store.get(MODE_KEY);
        let mode = override_mode.unwrap_or_else(|| Mode::from_storage_value(stored.as_deref()));
        let mut controller = Self {
            mode,
            page: PageModel::new(),
            store,
        };
        controller.apply(mode);
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    /// Styles every collaborator for `mode`.
    ///
    /// Idempotent; reapplying the current mode changes nothing.
    pub fn apply(&mut self, mode: Mode) {
        self.mode = mode;
        self.page
            .body
            .replace_class(mode.opposite().storage_value(), mode.storage_value());

        let (text, banner, icon) = match mode {
            Mode::Light => (INK, PAPER, ICON_MOON),
            Mode::Dark => (PAPER, INK, ICON_SUN),
        };
        self.page.toggle_button.color = Some(text);
        self.page.toggle_button.icon = Some(icon.to_string());
        self.page.portfolio_link.color = Some(text);
        self.page.responsive_warning.background_color = Some(banner);
        debug!(
            mode = mode.storage_value(),
            text = %text.css(),
            banner = %banner.css(),
            "applied mode"
        );
    }

    /// Flips the mode, restyles, and persists the new preference.
    ///
    /// A failed store write keeps the new in-memory mode; the preference is
    /// simply not durable until the next successful toggle.
    pub fn toggle(&mut self) {
        let next = self.mode.opposite();
        self.apply(next);
        if let Err(err) = self.store.set(MODE_KEY, next.storage_value()) {
            warn!(%err, "failed to persist mode preference");
        }
        info!(mode = next.storage_value(), "mode toggled");
    }
}

impl<S: PreferenceStore> ThemeDirector for ModeController<S> {
    fn on_surface_ready(&mut self, width: u32, _height: u32) {
        self.page.check_responsive_warning(width);
        self.apply(self.mode);
    }

    fn frame_theme(&self) -> FrameTheme {
        match self.mode {
            Mode::Light => FrameTheme::light(),
            Mode::Dark => FrameTheme::dark(),
        }
    }

    fn handle_click(&mut self) {
        self.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use anyhow::{anyhow, Result};

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("disk full"))
        }
    }

    #[test]
    fn defaults_to_light_without_a_stored_preference() {
        let controller = ModeController::new(MemoryStore::new(), None);
        assert_eq!(controller.mode(), Mode::Light);
        assert!(controller.page().body.has_class("light-mode"));
        assert_eq!(
            controller.page().toggle_button.icon.as_deref(),
            Some(ICON_MOON)
        );
    }

    #[test]
    fn restores_the_stored_dark_preference() {
        let store = MemoryStore::with_value(MODE_KEY, "dark-mode");
        let controller = ModeController::new(store, None);
        assert_eq!(controller.mode(), Mode::Dark);
        assert!(controller.page().body.has_class("dark-mode"));
        assert!(!controller.page().body.has_class("light-mode"));
    }

    #[test]
    fn unrecognised_preference_falls_back_to_light() {
        let store = MemoryStore::with_value(MODE_KEY, "solarized");
        let controller = ModeController::new(store, None);
        assert_eq!(controller.mode(), Mode::Light);
    }

    #[test]
    fn override_beats_the_stored_preference() {
        let store = MemoryStore::with_value(MODE_KEY, "light-mode");
        let controller = ModeController::new(store, Some(Mode::Dark));
        assert_eq!(controller.mode(), Mode::Dark);
    }

    #[test]
    fn toggle_flips_styles_and_persists() {
        let mut controller = ModeController::new(MemoryStore::new(), None);
        controller.toggle();

        assert_eq!(controller.mode(), Mode::Dark);
        assert!(controller.page().body.has_class("dark-mode"));
        assert_eq!(
            controller.page().toggle_button.icon.as_deref(),
            Some(ICON_SUN)
        );
        assert_eq!(controller.page().toggle_button.color, Some(PAPER));
        assert_eq!(controller.page().portfolio_link.color, Some(PAPER));
        assert_eq!(
            controller.page().responsive_warning.background_color,
            Some(INK)
        );
        assert_eq!(
            controller.store.get(MODE_KEY),
            Some("dark-mode".to_string())
        );

        controller.toggle();
        assert_eq!(controller.mode(), Mode::Light);
        assert_eq!(
            controller.store.get(MODE_KEY),
            Some("light-mode".to_string())
        );
    }

    #[test]
    fn apply_is_idempotent() {
        let mut controller = ModeController::new(MemoryStore::new(), None);
        let before = controller.page().clone();
        controller.apply(Mode::Light);
        assert_eq!(controller.page(), &before);
    }

    #[test]
    fn frame_theme_follows_the_mode() {
        let mut controller = ModeController::new(MemoryStore::new(), None);
        assert_eq!(controller.frame_theme(), FrameTheme::light());
        controller.handle_click();
        assert_eq!(controller.frame_theme(), FrameTheme::dark());
    }

    #[test]
    fn surface_ready_applies_before_the_first_frame() {
        let store = MemoryStore::with_value(MODE_KEY, "dark-mode");
        let mut controller = ModeController::new(store, None);
        controller.on_surface_ready(1920, 1080);
        assert!(controller.page().body.has_class("dark-mode"));
        assert!(!controller.page().responsive_warning.has_class("show"));
    }

    #[test]
    fn failed_persist_keeps_the_new_mode() {
        let mut controller = ModeController::new(FailingStore, None);
        controller.toggle();
        assert_eq!(controller.mode(), Mode::Dark);
    }

    #[test]
    fn storage_values_round_trip() {
        for mode in [Mode::Light, Mode::Dark] {
            assert_eq!(
                Mode::from_storage_value(Some(mode.storage_value())),
                mode
            );
        }
        assert_eq!(Mode::from_storage_value(None), Mode::Light);
    }
}
