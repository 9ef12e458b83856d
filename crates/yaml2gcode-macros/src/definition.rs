//! Macro definitions

use crate::instruction::Instruction;

/// `aliasOf` block: copy another macro's commands, optionally rotated.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasSpec {
    pub source: String,
    /// Clockwise rotation in degrees applied to copied path waypoints
    pub rotate: Option<f64>,
}

/// A named, reusable instruction list.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroDefinition {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    /// For aliases this is filled in by the registry during resolution
    pub commands: Vec<Instruction>,
    pub alias: Option<AliasSpec>,
}

impl MacroDefinition {
    pub fn new(name: impl Into<String>, commands: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            commands,
            alias: None,
        }
    }

    /// An alias of `source`; its commands are derived during resolution.
    pub fn alias_of(name: impl Into<String>, source: impl Into<String>, rotate: Option<f64>) -> Self {
        Self {
            alias: Some(AliasSpec {
                source: source.into(),
                rotate,
            }),
            ..Self::new(name, Vec::new())
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Label shown in the expansion header, falling back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
