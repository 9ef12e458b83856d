//! Macro registry
//!
//! Owns every macro definition of a program. Construction resolves aliases
//! and rejects cyclic macro graphs, so that once a registry exists every
//! lookup returns a final, immutable body and expansion always terminates.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};
use yaml2gcode_core::MacroError;

use crate::definition::MacroDefinition;
use crate::instruction::Instruction;

/// Registry of macro definitions
#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, MacroDefinition>,

    /// Declaration order
    order: Vec<String>,
}

impl MacroRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions in declaration order.
    ///
    /// Aliases are resolved depth first, so an alias may name a macro that
    /// is declared after it. Fails on alias cycles, aliases of unknown
    /// macros, and macros that (indirectly) invoke themselves.
    pub fn build(definitions: Vec<MacroDefinition>) -> Result<Self, MacroError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition);
        }

        registry.resolve_aliases()?;
        registry.check_invocation_cycles()?;

        info!("Registered {} macros", registry.len());
        Ok(registry)
    }

    fn insert(&mut self, definition: MacroDefinition) {
        let name = definition.name.clone();
        if self.macros.insert(name.clone(), definition).is_some() {
            warn!("Macro '{}' defined twice, keeping the last definition", name);
        } else {
            self.order.push(name);
        }
    }

    fn resolve_aliases(&mut self) -> Result<(), MacroError> {
        let mut resolved = HashSet::new();
        let names = self.order.clone();
        for name in &names {
            let mut visiting = Vec::new();
            self.resolve_alias(name, &mut visiting, &mut resolved)?;
        }
        Ok(())
    }

    fn resolve_alias(
        &mut self,
        name: &str,
        visiting: &mut Vec<String>,
        resolved: &mut HashSet<String>,
    ) -> Result<(), MacroError> {
        if resolved.contains(name) {
            return Ok(());
        }
        let Some(alias) = self.macros.get(name).and_then(|m| m.alias.clone()) else {
            resolved.insert(name.to_string());
            return Ok(());
        };

        if let Some(start) = visiting.iter().position(|n| n == name) {
            let mut chain = visiting[start..].to_vec();
            chain.push(name.to_string());
            return Err(MacroError::AliasCycle { chain });
        }
        if !self.macros.contains_key(&alias.source) {
            return Err(MacroError::UnknownAliasSource {
                alias: name.to_string(),
                source_name: alias.source,
            });
        }

        visiting.push(name.to_string());
        self.resolve_alias(&alias.source, visiting, resolved)?;
        visiting.pop();

        let source = &self.macros[&alias.source].commands;
        let commands: Vec<Instruction> = match alias.rotate {
            Some(degrees) => source.iter().map(|i| i.rotated(degrees)).collect(),
            None => source.clone(),
        };
        debug!(
            "Resolved alias '{}' of '{}' ({} commands, rotate {:?})",
            name,
            alias.source,
            commands.len(),
            alias.rotate
        );
        if let Some(definition) = self.macros.get_mut(name) {
            definition.commands = commands;
        }
        resolved.insert(name.to_string());
        Ok(())
    }

    fn check_invocation_cycles(&self) -> Result<(), MacroError> {
        let mut done = HashSet::new();
        for name in &self.order {
            let mut stack = Vec::new();
            self.visit_invocations(name, &mut stack, &mut done)?;
        }
        Ok(())
    }

    fn visit_invocations<'a>(
        &'a self,
        name: &'a str,
        stack: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<(), MacroError> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(start) = stack.iter().position(|n| *n == name) {
            let mut chain: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
            chain.push(name.to_string());
            return Err(MacroError::RecursiveInvocation { chain });
        }
        let Some(definition) = self.macros.get(name) else {
            return Ok(());
        };

        stack.push(name);
        for instruction in &definition.commands {
            for callee in instruction.invoked_macros() {
                if self.contains(callee) {
                    self.visit_invocations(callee, stack, done)?;
                }
            }
        }
        stack.pop();
        done.insert(name);
        Ok(())
    }

    /// Get a macro by name
    pub fn get(&self, name: &str) -> Option<&MacroDefinition> {
        self.macros.get(name)
    }

    /// Get a macro by name, failing with `UnknownMacro`
    pub fn lookup(&self, name: &str) -> Result<&MacroDefinition, MacroError> {
        self.get(name)
            .ok_or_else(|| MacroError::UnknownMacro(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Macro names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}
