//! Tool capability types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::CoreError;

/// Fixed set of tool groups, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToolCategory {
    System,
    Files,
    Text,
    Network,
}

impl ToolCategory {
    /// Every category in the order category tabs are shown
    pub const ALL: [ToolCategory; 4] = [
        ToolCategory::System,
        ToolCategory::Files,
        ToolCategory::Text,
        ToolCategory::Network,
    ];

    /// Theme icon shown on the category tab
    #[must_use]
    pub fn icon(self) -> Icon {
        Icon::Theme(match self {
            Self::System => "settings",
            Self::Files => "folder",
            Self::Text => "document",
            Self::Network => "computer",
        })
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "System",
            Self::Files => "Files",
            Self::Text => "Text",
            Self::Network => "Network",
        };
        f.write_str(name)
    }
}

impl FromStr for ToolCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("Invalid tool category: {s}")))
    }
}

/// Opaque reference to a presentation asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Toolkit fallback icon
    Default,
    /// Named icon from the toolkit theme
    Theme(&'static str),
    /// Asset loaded from disk
    Asset { name: String, bytes: Arc<[u8]> },
}

impl Icon {
    /// Short label for text front ends
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Theme(name) => *name,
            Self::Asset { name, .. } => name.as_str(),
        }
    }
}

/// One titled block of a tool's view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub heading: String,
    pub lines: Vec<String>,
}

impl Section {
    #[must_use]
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// View model a tool hands to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Surface {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading)?;
            for line in &section.lines {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}

/// A tool hosted by the shell
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn category(&self) -> ToolCategory;

    fn icon(&self) -> Icon;

    /// Current view of the tool
    fn ui_surface(&self) -> Surface;

    /// The file-drop capability, for tools that accept dropped files
    fn as_file_dropper(&self) -> Option<&dyn FileDropper> {
        None
    }
}

/// Optional capability: accept files dropped onto the window
pub trait FileDropper: Send + Sync {
    /// Handle a batch of dropped paths, returning how many were accepted
    fn on_files_dropped(&self, paths: &[String]) -> usize;
}
