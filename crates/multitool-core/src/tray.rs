//! System tray menu model

use crate::profile::Profile;
use serde::Serialize;
use std::fmt;

/// What a tray entry does when clicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "profile", rename_all = "snake_case")]
pub enum TrayAction {
    ShowWindow,
    ApplyProfile(String),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuItem {
    Entry { label: String, action: TrayAction },
    Submenu { label: String, items: Vec<MenuItem> },
    Separator,
}

impl MenuItem {
    fn entry(label: impl Into<String>, action: TrayAction) -> Self {
        Self::Entry {
            label: label.into(),
            action,
        }
    }
}

/// Menu shown from the tray icon
///
/// Rebuild it whenever `AppEvent::ProfilesChanged` arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrayMenu {
    pub items: Vec<MenuItem>,
}

impl TrayMenu {
    /// "Open", a "Mode" submenu with one entry per profile, then "Quit"
    #[must_use]
    pub fn build(profiles: &[Profile]) -> Self {
        let mut items = vec![MenuItem::entry("Open", TrayAction::ShowWindow)];

        if !profiles.is_empty() {
            items.push(MenuItem::Separator);
            items.push(MenuItem::Submenu {
                label: "Mode".to_string(),
                items: profiles
                    .iter()
                    .map(|p| MenuItem::entry(&p.name, TrayAction::ApplyProfile(p.name.clone())))
                    .collect(),
            });
        }

        items.push(MenuItem::Separator);
        items.push(MenuItem::entry("Quit", TrayAction::Quit));
        Self { items }
    }

    /// Find the action behind a top-level or submenu label
    #[must_use]
    pub fn action_for(&self, label: &str) -> Option<&TrayAction> {
        fn search<'a>(items: &'a [MenuItem], label: &str) -> Option<&'a TrayAction> {
            items.iter().find_map(|item| match item {
                MenuItem::Entry { label: l, action } if l == label => Some(action),
                MenuItem::Submenu { items, .. } => search(items, label),
                _ => None,
            })
        }
        search(&self.items, label)
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[MenuItem], depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for item in items {
        match item {
            MenuItem::Entry { label, .. } => writeln!(f, "{indent}{label}")?,
            MenuItem::Submenu { label, items } => {
                writeln!(f, "{indent}{label} >")?;
                write_items(f, items, depth + 1)?;
            }
            MenuItem::Separator => writeln!(f, "{indent}---")?,
        }
    }
    Ok(())
}

impl fmt::Display for TrayMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.items, 0)
    }
}
