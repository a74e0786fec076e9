//! In-memory model of the page chrome the backdrop sits behind.
//!
//! The daemon does not own a DOM; it owns this registry of the four styled
//! elements and keeps it consistent with the rendered frame. Anything that
//! embeds the backdrop can read the classes and inline styles back out.

use tracing::info;

/// Whether the surrounding layout adapts to narrow viewports on its own.
pub const RESPONSIVE_DESIGN: bool = true;

/// Viewport widths at or below this trigger the warning banner when the
/// layout is not responsive.
pub const RESPONSIVE_MIN_WIDTH: u32 = 768;

/// Inline colour in CSS `rgb(...)` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS serialisation, e.g. `rgb(2, 4, 8)`.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Near-black used for light-mode text and the dark-mode banner.
pub const INK: Rgb = Rgb::new(2, 4, 8);

/// Near-white used for dark-mode text and the light-mode banner.
pub const PAPER: Rgb = Rgb::new(245, 245, 245);

/// One styled element of the page chrome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    classes: Vec<String>,
    pub color: Option<Rgb>,
    pub background_color: Option<Rgb>,
    pub icon: Option<String>,
}

impl Element {
    fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            ..Self::default()
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
    }

    pub fn replace_class(&mut self, from: &str, to: &str) {
        self.remove_class(from);
        self.add_class(to);
    }
}

/// The four elements the daemon styles.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    pub body: Element,
    pub responsive_warning: Element,
    pub toggle_button: Element,
    pub portfolio_link: Element,
}

impl PageModel {
    /// Fresh page as served: light body, hidden warning, unstyled controls.
    pub fn new() -> Self {
        Self {
            body: Element::with_class("light-mode"),
            responsive_warning: Element::with_class("responsive-warning"),
            toggle_button: Element::with_class("toggle-mode-btn"),
            portfolio_link: Element::with_class("portfolio-link"),
        }
    }

    /// One-time start-up check that surfaces the warning banner on narrow
    /// viewports when the layout cannot adapt by itself.
    pub fn check_responsive_warning(&mut self, viewport_width: u32) {
        if warning_needed(RESPONSIVE_DESIGN, viewport_width) {
            self.responsive_warning.add_class("show");
            info!(
                width = viewport_width,
                "narrow viewport, showing responsive warning"
            );
        }
    }
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the warning banner should be shown for this viewport.
pub fn warning_needed(responsive_design: bool, viewport_width: u32) -> bool {
    !responsive_design && viewport_width <= RESPONSIVE_MIN_WIDTH
}
