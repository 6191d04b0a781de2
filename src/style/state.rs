//! Live style configuration with an immutable starting snapshot

use std::collections::BTreeSet;

use crate::error::FigureError;

use super::{StyleConfig, StyleParameters};

/// Backend used by [`StyleState::latexify`]
pub const LATEX_BACKEND: &str = "pgf";

/// Backend the built-in renderer starts with
pub const DEFAULT_BACKEND: &str = "agg";

/// Backend names accepted out of the box
pub const KNOWN_BACKENDS: &[&str] = &[
    "agg", "cairo", "pdf", "pgf", "ps", "svg", "template", "gtk3agg", "gtk3cairo", "gtk4agg",
    "gtk4cairo", "macosx", "nbagg", "qtagg", "qtcairo", "qt5agg", "qt5cairo", "tkagg", "tkcairo",
    "webagg", "wx", "wxagg", "wxcairo",
];

/// Parameters and backend as they were when the state was created
#[derive(Debug, Clone, PartialEq)]
pub struct OriginalState {
    pub params: StyleParameters,
    pub backend: String,
}

/// The mutable style configuration shared by sessions and exports
#[derive(Debug, Clone)]
pub struct StyleState {
    pub(super) params: StyleParameters,
    backend: String,
    original: OriginalState,
    backends: BTreeSet<String>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(StyleParameters::engine_defaults(), DEFAULT_BACKEND)
    }
}

impl StyleState {
    /// Create a state, snapshotting `params` and `backend` for [`revert`](Self::revert)
    pub fn new(params: StyleParameters, backend: impl Into<String>) -> Self {
        let backend = backend.into().to_lowercase();
        let mut backends: BTreeSet<String> =
            KNOWN_BACKENDS.iter().map(|b| b.to_string()).collect();
        backends.insert(backend.clone());
        Self {
            original: OriginalState {
                params: params.clone(),
                backend: backend.clone(),
            },
            params,
            backend,
            backends,
        }
    }

    /// Register an additional backend name
    pub fn with_backend(mut self, name: impl Into<String>) -> Self {
        self.backends.insert(name.into().to_lowercase());
        self
    }

    /// Live parameters
    pub fn params(&self) -> &StyleParameters {
        &self.params
    }

    /// Active backend name
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Snapshot taken at construction
    pub fn original(&self) -> &OriginalState {
        &self.original
    }

    pub fn supports_backend(&self, name: &str) -> bool {
        self.backends.contains(&name.to_lowercase())
    }

    /// Merge `params` into the live configuration and optionally switch backend
    ///
    /// The merge happens first and is kept even if the backend is rejected.
    pub fn apply(
        &mut self,
        params: &StyleParameters,
        new_backend: Option<&str>,
    ) -> Result<(), FigureError> {
        self.params.merge(params);

        if let Some(backend) = new_backend {
            if !self.supports_backend(backend) {
                log::error!("Backend not supported: {:?}", backend);
                return Err(FigureError::unsupported_backend(backend));
            }
            self.backend = backend.to_lowercase();
            log::debug!("Switched backend to {}", self.backend);
        }

        Ok(())
    }

    /// Apply the LaTeX preset and switch to the PGF backend
    pub fn latexify(&mut self) -> Result<(), FigureError> {
        self.apply(&StyleParameters::latex(), Some(LATEX_BACKEND))
    }

    /// Apply a configuration loaded from TOML
    pub fn apply_config(&mut self, config: &StyleConfig) -> Result<(), FigureError> {
        self.apply(&config.params, config.backend.as_deref())
    }

    /// Restore parameters and backend to the construction snapshot
    pub fn revert(&mut self) {
        self.params = self.original.params.clone();
        self.backend = self.original.backend.clone();
    }
}
