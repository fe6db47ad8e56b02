//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `RICHENUM_NAMESPACE`, `RICHENUM_BLANK_IS_ABSENT`,
//!    `RICHENUM_STRICT_DECLARATIONS`.
//! 2. **Settings file**: a TOML file passed to [`Settings::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `namespace` | `richenum` | First segment of every localization key |
//! | `blank_is_absent` | `true` | Treat a blank raw value as "no value" when reading a bound attribute |
//! | `strict_declarations` | `false` | Reject a second value-set declaration for the same enum type |
//!
//! Settings are process-wide. Install them once at startup with [`install`],
//! before enum types are declared or bound; everything else reads them
//! through [`current`].

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use confique::Config;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_NAMESPACE: &str = "richenum";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Namespace used as the first segment of localization keys.
    #[config(default = "richenum", env = "RICHENUM_NAMESPACE")]
    pub namespace: String,

    /// Whether a blank string read from storage counts as absent.
    #[config(default = true, env = "RICHENUM_BLANK_IS_ABSENT")]
    pub blank_is_absent: bool,

    /// Whether redeclaring an enum's values is an error instead of last-write-wins.
    #[config(default = false, env = "RICHENUM_STRICT_DECLARATIONS")]
    pub strict_declarations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            blank_is_absent: true,
            strict_declarations: false,
        }
    }
}

impl Settings {
    /// Load settings from the environment and an optional TOML file.
    ///
    /// A missing file is skipped, leaving defaults in place.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Settings::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}

static SETTINGS: Lazy<RwLock<Arc<Settings>>> =
    Lazy::new(|| RwLock::new(Arc::new(Settings::default())));

/// Replace the process-wide settings.
pub fn install(settings: Settings) {
    tracing::debug!(
        namespace = %settings.namespace,
        blank_is_absent = settings.blank_is_absent,
        strict_declarations = settings.strict_declarations,
        "installing settings"
    );
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
}

/// The installed settings, or defaults when none were installed.
pub fn current() -> Arc<Settings> {
    SETTINGS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
