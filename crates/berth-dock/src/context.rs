//! Styling and sizing defaults for the docking system.

use serde::{Deserialize, Serialize};

use crate::operations::{DockError, DockResult};

/// Default tab bar height in pixels.
pub const DEFAULT_TAB_BAR_HEIGHT: f32 = 22.0;

/// Default splitter size in pixels.
pub const DEFAULT_SPLITTER_SIZE: f32 = 2.0;

/// Minimum extent of a leaf with no panels, so it stays visible as a drop target.
pub const DEFAULT_EMPTY_MIN_SIZE: f32 = 20.0;

/// Sizing defaults for the docking system.
///
/// Loadable from JSON; missing keys take their defaults.
///
/// ```
/// use berth_dock::DockingStyle;
///
/// let style = DockingStyle::from_json(r#"{ "tab_bar_height": 28.0 }"#).unwrap();
/// assert_eq!(style.tab_bar_height, 28.0);
/// assert_eq!(style.splitter_size, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockingStyle {
    /// Height of the tab bar in pixels. Added to a leaf's minimum height.
    pub tab_bar_height: f32,
    /// Width of splitter bars in pixels.
    pub splitter_size: f32,
    /// Extra hit-test tolerance around a splitter (pixels per side).
    pub splitter_tolerance: f32,
    /// Minimum extent of an empty leaf.
    pub empty_min_size: f32,
    /// Flex weight given to freshly created nodes.
    pub default_flex: f32,
}

impl Default for DockingStyle {
    fn default() -> Self {
        Self {
            tab_bar_height: DEFAULT_TAB_BAR_HEIGHT,
            splitter_size: DEFAULT_SPLITTER_SIZE,
            splitter_tolerance: 4.0,
            empty_min_size: DEFAULT_EMPTY_MIN_SIZE,
            default_flex: 1.0,
        }
    }
}

impl DockingStyle {
    pub fn from_json(json: &str) -> DockResult<Self> {
        serde_json::from_str(json).map_err(|e| DockError::Config(e.to_string()))
    }

    /// Set the tab bar height.
    pub fn tab_bar_height(mut self, height: f32) -> Self {
        self.tab_bar_height = height;
        self
    }

    /// Set the splitter size.
    pub fn splitter_size(mut self, size: f32) -> Self {
        self.splitter_size = size.max(1.0);
        self
    }

    /// Set the splitter hit-test tolerance (extra pixels per side).
    pub fn splitter_tolerance(mut self, tolerance: f32) -> Self {
        self.splitter_tolerance = tolerance;
        self
    }

    /// Set the minimum extent of empty leaves.
    pub fn empty_min_size(mut self, size: f32) -> Self {
        self.empty_min_size = size;
        self
    }

    /// Set the flex weight of new nodes.
    pub fn default_flex(mut self, flex: f32) -> Self {
        self.default_flex = flex;
        self
    }
}
