//! Panel descriptors and the registry that owns them.
//!
//! Panels are declared by packages in a JSON manifest:
//!
//! ```json
//! {
//!   "name": "devtools",
//!   "edock": {
//!     "panels": [
//!       { "id": "console", "title": "Console", "minWidth": 120, "template": "panels/console.html" }
//!     ]
//!   }
//! }
//! ```
//!
//! The registry is filled once at startup and then shared read-only behind an
//! `Arc`.

use berth_core::alloc::HashMap;
use serde::Deserialize;

use crate::operations::{DockError, DockResult};

/// Static description of a panel type.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub closable: bool,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    /// URL of the content template. `None` shows the default empty panel.
    pub template: Option<String>,
    /// Name of the package that declared the panel.
    pub package: Option<String>,
}

impl PanelDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            closable: false,
            min_width: None,
            min_height: None,
            template: None,
            package: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = Some(height);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// A package manifest carrying an `edock` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanelManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub edock: Option<DockSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DockSection {
    #[serde(default)]
    pub panels: Vec<PanelEntry>,
}

/// One panel as written in a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub closable: bool,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub template: Option<String>,
}

impl PanelManifest {
    pub fn from_json(json: &str) -> DockResult<Self> {
        serde_json::from_str(json).map_err(|e| DockError::Config(e.to_string()))
    }
}

/// Maps panel ids to their descriptors.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: HashMap<String, PanelDescriptor>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. The first registration of an id wins.
    pub fn register(&mut self, descriptor: PanelDescriptor) -> bool {
        if self.panels.contains_key(&descriptor.id) {
            tracing::warn!(
                "Panel {} is already registered, skipping duplicate",
                descriptor.id
            );
            return false;
        }
        self.panels.insert(descriptor.id.clone(), descriptor);
        true
    }

    /// Register every panel of a manifest, returning how many were added.
    ///
    /// A panel without an id is keyed by its title.
    pub fn add_manifest(&mut self, manifest: &PanelManifest) -> usize {
        let Some(section) = &manifest.edock else {
            return 0;
        };

        let mut added = 0;
        for entry in &section.panels {
            let Some(id) = entry.id.clone().or_else(|| entry.title.clone()) else {
                tracing::warn!(
                    "Skipping panel without id or title in package {:?}",
                    manifest.name
                );
                continue;
            };

            let descriptor = PanelDescriptor {
                title: entry.title.clone().unwrap_or_else(|| id.clone()),
                id,
                icon: entry.icon.clone(),
                closable: entry.closable,
                min_width: entry.min_width,
                min_height: entry.min_height,
                template: entry.template.clone(),
                package: manifest.name.clone(),
            };
            if self.register(descriptor) {
                added += 1;
            }
        }
        added
    }

    pub fn add_manifest_json(&mut self, json: &str) -> DockResult<usize> {
        let manifest = PanelManifest::from_json(json)?;
        Ok(self.add_manifest(&manifest))
    }

    pub fn get_panel_info(&self, id: &str) -> Option<&PanelDescriptor> {
        self.panels.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelDescriptor> {
        self.panels.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "name": "devtools",
        "edock": {
            "panels": [
                { "id": "console", "title": "Console", "closable": true, "minWidth": 120, "template": "console.html" },
                { "title": "Inspector", "minHeight": 80 },
                { "id": "console", "title": "Console Again" }
            ]
        }
    }"#;

    #[test]
    fn test_manifest_registers_panels() {
        let mut registry = PanelRegistry::new();
        let added = registry.add_manifest_json(MANIFEST).unwrap();
        assert_eq!(added, 2);

        let console = registry.get_panel_info("console").unwrap();
        assert_eq!(console.title, "Console");
        assert!(console.closable);
        assert_eq!(console.min_width, Some(120.0));
        assert_eq!(console.template.as_deref(), Some("console.html"));
        assert_eq!(console.package.as_deref(), Some("devtools"));
    }

    #[test]
    fn test_missing_id_falls_back_to_title() {
        let mut registry = PanelRegistry::new();
        registry.add_manifest_json(MANIFEST).unwrap();

        let inspector = registry.get_panel_info("Inspector").unwrap();
        assert_eq!(inspector.min_height, Some(80.0));
        assert!(!inspector.closable);
    }

    #[test]
    fn test_duplicate_does_not_overwrite() {
        let mut registry = PanelRegistry::new();
        registry.add_manifest_json(MANIFEST).unwrap();
        assert!(!registry.register(PanelDescriptor::new("console", "Other")));
        assert_eq!(registry.get_panel_info("console").unwrap().title, "Console");
    }

    #[test]
    fn test_manifest_without_section() {
        let mut registry = PanelRegistry::new();
        assert_eq!(registry.add_manifest_json(r#"{ "name": "plain" }"#).unwrap(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut registry = PanelRegistry::new();
        let err = registry.add_manifest_json("{ not json").unwrap_err();
        assert!(matches!(err, DockError::Config(_)));
    }
}
