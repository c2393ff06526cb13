//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult};

/// Smallest width any element can be resized to.
pub const MIN_WIDTH: f64 = 50.0;

/// Smallest height any element can be resized to.
pub const MIN_HEIGHT: f64 = 30.0;

/// Visible canvas area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Tunables for the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width a resize can produce. Never below [`MIN_WIDTH`].
    pub min_width: f64,
    /// Smallest height a resize can produce. Never below [`MIN_HEIGHT`].
    pub min_height: f64,
    /// X coordinate new elements are placed at.
    pub spawn_x: f64,
    /// Y coordinate new elements are placed at.
    pub spawn_y: f64,
    /// Maximum number of undo levels (0 = unlimited).
    pub history_limit: usize,
    /// Canvas viewport, if known up front.
    pub viewport: Option<Viewport>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            spawn_x: 100.0,
            spawn_y: 100.0,
            history_limit: 100,
            viewport: None,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the resize floor.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] if either minimum is not a
    /// number at or above [`MIN_WIDTH`] / [`MIN_HEIGHT`].
    pub fn validate(&self) -> EditorResult<()> {
        if self.min_width.is_nan() || self.min_width < MIN_WIDTH {
            return Err(EditorError::InvalidConfig(format!(
                "min_width must be at least {MIN_WIDTH}, got {}",
                self.min_width
            )));
        }
        if self.min_height.is_nan() || self.min_height < MIN_HEIGHT {
            return Err(EditorError::InvalidConfig(format!(
                "min_height must be at least {MIN_HEIGHT}, got {}",
                self.min_height
            )));
        }
        Ok(())
    }

    /// Size after dragging the resize handle by a cumulative delta from
    /// `(start_width, start_height)`, floored at the minimum dimensions.
    ///
    /// The floor never drops below [`MIN_WIDTH`] x [`MIN_HEIGHT`], even for
    /// a configuration built in code that skipped validation.
    #[must_use]
    pub fn resized(
        &self,
        start_width: f64,
        start_height: f64,
        delta_x: f64,
        delta_y: f64,
    ) -> (f64, f64) {
        (
            (start_width + delta_x).max(self.min_width.max(MIN_WIDTH)),
            (start_height + delta_y).max(self.min_height.max(MIN_HEIGHT)),
        )
    }
}
