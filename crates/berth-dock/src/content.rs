//! Panel instances hosted by a leaf's content surface.

use std::fmt;
use std::sync::Arc;

use crate::strip::Strip;

/// The panel instances of one leaf, mirroring its [`TabStrip`](crate::TabStrip).
pub type ContentSurface = Strip<PanelInstance>;

/// Identity of a panel instance. Survives moves between leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelInstanceId(pub u64);

impl fmt::Display for PanelInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// What a panel currently displays.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// No template; the default empty panel.
    Empty,
    /// Template load in flight.
    Pending { template: String },
    /// Template text, ready to render.
    Ready(Arc<str>),
    /// The template failed to load. The slot stays in the layout.
    Failed { template: String, message: String },
}

impl PanelContent {
    pub fn is_pending(&self) -> bool {
        matches!(self, PanelContent::Pending { .. })
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            PanelContent::Pending { template } | PanelContent::Failed { template, .. } => {
                Some(template.as_str())
            }
            _ => None,
        }
    }
}

/// A live panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelInstance {
    pub id: PanelInstanceId,
    pub panel_id: String,
    pub content: PanelContent,
}

impl ContentSurface {
    pub fn instance(&self, id: PanelInstanceId) -> Option<&PanelInstance> {
        self.iter().find(|panel| panel.id == id)
    }

    pub(crate) fn instance_mut(&mut self, id: PanelInstanceId) -> Option<&mut PanelInstance> {
        self.iter_mut().find(|panel| panel.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_of_pending_and_failed() {
        let pending = PanelContent::Pending {
            template: "a.html".to_string(),
        };
        assert!(pending.is_pending());
        assert_eq!(pending.template(), Some("a.html"));

        let failed = PanelContent::Failed {
            template: "b.html".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(failed.template(), Some("b.html"));
        assert_eq!(PanelContent::Ready(Arc::from("x")).template(), None);
    }

    #[test]
    fn test_instance_lookup() {
        let mut surface = ContentSurface::new();
        surface.push(PanelInstance {
            id: PanelInstanceId(3),
            panel_id: "console".to_string(),
            content: PanelContent::Empty,
        });

        assert!(surface.instance(PanelInstanceId(3)).is_some());
        assert!(surface.instance(PanelInstanceId(4)).is_none());
        if let Some(panel) = surface.instance_mut(PanelInstanceId(3)) {
            panel.content = PanelContent::Ready(Arc::from("<div/>"));
        }
        assert_eq!(
            surface.instance(PanelInstanceId(3)).map(|p| &p.content),
            Some(&PanelContent::Ready(Arc::from("<div/>")))
        );
    }
}
