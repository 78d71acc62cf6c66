//! Accessibility preferences for the current page session.

#[cfg(test)]
#[path = "accessibility_test.rs"]
mod accessibility_test;

/// Class applied to the app wrapper while high contrast is on.
pub const HIGH_CONTRAST_CLASS: &str = "high-contrast";

/// High-contrast display flag.
///
/// Provided as an `RwSignal<AccessibilityState>` context; the app wrapper and
/// the navbar toggle both read it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccessibilityState {
    pub high_contrast: bool,
}

impl AccessibilityState {
    #[must_use]
    pub fn new(high_contrast: bool) -> Self {
        Self { high_contrast }
    }

    /// Invert the flag and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.high_contrast = !self.high_contrast;
        self.high_contrast
    }

    /// Class list for the wrapping element.
    #[must_use]
    pub fn wrapper_class(self) -> &'static str {
        if self.high_contrast { HIGH_CONTRAST_CLASS } else { "" }
    }

    /// Label for the toggle button: names the mode it switches to.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        if self.high_contrast { "Normal View" } else { "High Contrast" }
    }
}
