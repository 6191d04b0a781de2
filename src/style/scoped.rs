//! Temporary style overrides restored on drop
//!
//! ```rust
//! use texfigure::{StyleState, TempStyle};
//! use texfigure::style::keys;
//!
//! let mut state = StyleState::default();
//! {
//!     let guard = state.temp_style(TempStyle::new().font_size(12.0));
//!     assert_eq!(guard.params().number(keys::FONT_SIZE), Some(12.0));
//! }
//! assert_eq!(state.params().number(keys::FONT_SIZE), Some(10.0));
//! ```

use std::ops::{Deref, DerefMut};

use super::{keys, StyleParameters, StyleState, StyleValue};

/// Font-oriented overrides applied for the lifetime of a [`StyleGuard`]
#[derive(Debug, Clone, Default)]
pub struct TempStyle {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_serif: Option<Vec<String>>,
    pub font_sans_serif: Option<Vec<String>>,
    pub font_monospace: Option<Vec<String>>,
    /// Applied after the named overrides, so its keys always win
    pub params: Option<StyleParameters>,
}

impl TempStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set every font size key to `size`
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_serif<S: Into<String>>(mut self, fonts: impl IntoIterator<Item = S>) -> Self {
        self.font_serif = Some(fonts.into_iter().map(Into::into).collect());
        self
    }

    pub fn font_sans_serif<S: Into<String>>(mut self, fonts: impl IntoIterator<Item = S>) -> Self {
        self.font_sans_serif = Some(fonts.into_iter().map(Into::into).collect());
        self
    }

    pub fn font_monospace<S: Into<String>>(mut self, fonts: impl IntoIterator<Item = S>) -> Self {
        self.font_monospace = Some(fonts.into_iter().map(Into::into).collect());
        self
    }

    /// Extra parameters merged on top of the named overrides
    pub fn params(mut self, params: StyleParameters) -> Self {
        self.params = Some(params);
        self
    }

    /// Build the overridden parameter set from `base`
    pub fn resolve(&self, base: &StyleParameters) -> StyleParameters {
        let mut resolved = base.clone();

        if let Some(size) = self.font_size {
            for key in keys::FONT_SIZE_KEYS {
                resolved.set(key, size);
            }
        }

        let named: [(&str, Option<StyleValue>); 4] = [
            (keys::FONT_FAMILY, self.font_family.clone().map(StyleValue::Text)),
            (keys::FONT_SERIF, self.font_serif.clone().map(StyleValue::List)),
            (keys::FONT_SANS_SERIF, self.font_sans_serif.clone().map(StyleValue::List)),
            (keys::FONT_MONOSPACE, self.font_monospace.clone().map(StyleValue::List)),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                resolved.set(key, value);
            }
        }

        if let Some(extra) = &self.params {
            resolved.merge(extra);
        }

        resolved
    }
}

/// Holds a style override; restores the previous parameters when dropped
///
/// Dereferences to the underlying [`StyleState`], so guards nest.
#[must_use = "the override is undone as soon as the guard is dropped"]
pub struct StyleGuard<'a> {
    state: &'a mut StyleState,
    saved: StyleParameters,
}

impl<'a> StyleGuard<'a> {
    fn new(state: &'a mut StyleState, overrides: &TempStyle) -> Self {
        let saved = state.params.clone();
        state.params = overrides.resolve(&saved);
        Self { state, saved }
    }
}

impl Deref for StyleGuard<'_> {
    type Target = StyleState;

    fn deref(&self) -> &StyleState {
        self.state
    }
}

impl DerefMut for StyleGuard<'_> {
    fn deref_mut(&mut self) -> &mut StyleState {
        self.state
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        self.state.params = std::mem::take(&mut self.saved);
    }
}

impl StyleState {
    /// Override parameters until the returned guard is dropped
    pub fn temp_style(&mut self, overrides: TempStyle) -> StyleGuard<'_> {
        StyleGuard::new(self, &overrides)
    }

    /// Run `f` with overridden parameters, restoring them afterwards
    ///
    /// Restoration also happens if `f` panics.
    pub fn with_temp_style<R>(
        &mut self,
        overrides: TempStyle,
        f: impl FnOnce(&mut StyleState) -> R,
    ) -> R {
        let mut guard = self.temp_style(overrides);
        f(&mut guard)
    }
}
