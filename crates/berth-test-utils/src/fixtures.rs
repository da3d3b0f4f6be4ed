//! Shared panel fixtures.

use std::sync::Arc;

use berth_dock::{PanelDescriptor, PanelRegistry};

/// A package manifest declaring two template-backed panels.
pub const SAMPLE_MANIFEST: &str = r#"{
    "name": "devtools",
    "edock": {
        "panels": [
            { "id": "profiler", "title": "Profiler", "minWidth": 80, "template": "panels/profiler.html" },
            { "title": "Timeline", "closable": true, "minHeight": 60, "template": "panels/timeline.html" }
        ]
    }
}"#;

/// Registry with `console`, `inspector`, `explorer`, `search` and `output`.
///
/// `console` has a min width of 50 and `inspector` a min width of 30, the
/// pair used for splitter clamping checks. Only `output` has a template.
pub fn sample_registry() -> Arc<PanelRegistry> {
    let mut registry = PanelRegistry::new();
    registry.register(PanelDescriptor::new("console", "Console").min_width(50.0));
    registry.register(PanelDescriptor::new("inspector", "Inspector").min_width(30.0));
    registry.register(PanelDescriptor::new("explorer", "Explorer").closable(true));
    registry.register(PanelDescriptor::new("search", "Search").min_height(40.0));
    registry.register(
        PanelDescriptor::new("output", "Output")
            .closable(true)
            .template("panels/output.html"),
    );
    Arc::new(registry)
}
