//! Tab strip state for a leaf.

use crate::content::PanelInstanceId;
use crate::registry::PanelDescriptor;
use crate::strip::Strip;

/// The tabs of one leaf, with at most one active.
pub type TabStrip = Strip<TabHandle>;

/// A tab as shown in a leaf's tab bar.
#[derive(Debug, Clone, PartialEq)]
pub struct TabHandle {
    pub panel_id: String,
    pub title: String,
    pub icon: Option<String>,
    pub closable: bool,
    /// The panel instance this tab selects.
    pub instance: PanelInstanceId,
}

impl TabHandle {
    pub fn from_descriptor(descriptor: &PanelDescriptor, instance: PanelInstanceId) -> Self {
        Self {
            panel_id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            icon: descriptor.icon.clone(),
            closable: descriptor.closable,
            instance,
        }
    }
}

impl TabStrip {
    /// Titles in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.iter().map(|tab| tab.title.as_str()).collect()
    }

    pub fn position_of(&self, panel_id: &str) -> Option<usize> {
        self.iter().position(|tab| tab.panel_id == panel_id)
    }
}
