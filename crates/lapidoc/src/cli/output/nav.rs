//! Navigation tree rendering.

use std::collections::BTreeMap;

use lapidoc_corpus::NavItem;
use lapidoc_highlight::{dim, header, subheader};

/// Version string shown in the navigation footer.
const VERSION_LABEL: &str = "v1.0.0-stable";

/// Which navigation groups are expanded.
///
/// Groups not tracked here are collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    /// Expansion flag per group id.
    expanded: BTreeMap<String, bool>,
}

impl Default for NavState {
    fn default() -> Self {
        let expanded = [
            ("getting-started", true),
            ("modules", true),
            ("resources", false),
        ]
        .into_iter()
        .map(|(id, open)| (id.to_string(), open))
        .collect();
        Self { expanded }
    }
}

impl NavState {
    /// Returns true if the group is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Flips a group between expanded and collapsed.
    pub fn toggle(&mut self, id: &str) {
        let open = !self.is_expanded(id);
        self.expanded.insert(id.to_string(), open);
    }

    /// Sets a group's expansion explicitly.
    pub fn set(&mut self, id: &str, open: bool) {
        self.expanded.insert(id.to_string(), open);
    }
}

/// Renders the sidebar: brand header, the tree, and the version footer.
///
/// Children of collapsed groups are hidden. The active leaf is highlighted.
pub fn render_nav(items: &[NavItem], state: &NavState, active: Option<&str>) -> String {
    let mut out = format!("{}\n{}\n\n", header("LAPI"), dim("Lua API Wrapper"));
    render_items(items, 0, state, active, &mut out);
    out.push('\n');
    out.push_str(&format!("{} {VERSION_LABEL}\n", dim("Current Version")));
    out
}

/// Appends one level of the tree.
fn render_items(
    items: &[NavItem],
    depth: usize,
    state: &NavState,
    active: Option<&str>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    for item in items {
        if item.is_group() {
            let open = state.is_expanded(&item.id);
            let marker = if open { "▾" } else { "▸" };
            out.push_str(&format!(
                "{indent}{marker} {} {}\n",
                subheader(&item.label),
                dim(&format!("[{}]", item.id))
            ));
            if open {
                render_items(&item.children, depth + 1, state, active, out);
            }
        } else if active == Some(item.id.as_str()) {
            out.push_str(&format!(
                "{indent}● {} {}\n",
                header(&item.label),
                dim(&format!("[{}]", item.id))
            ));
        } else {
            out.push_str(&format!(
                "{indent}  {} {}\n",
                item.label,
                dim(&format!("[{}]", item.id))
            ));
        }
    }
}
