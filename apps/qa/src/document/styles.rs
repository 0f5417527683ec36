//! Named style roles with two-level inheritance.
//!
//! A role is either a *base* role carrying a complete attribute set, or a
//! *derived* role naming a base plus the attributes it overrides. Derivation
//! is only allowed from base roles, so resolution is a single lookup step and
//! cyclic derivation is unrepresentable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::AssemblerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
}

/// A complete set of rendering attributes, as applied to a block at layout
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub font_size_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    pub alignment: Alignment,
}

/// The subset of attributes a derived role overrides. Unset attributes
/// resolve to the base role's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub font_size_pt: Option<f32>,
    pub space_before_pt: Option<f32>,
    pub space_after_pt: Option<f32>,
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone)]
struct DerivedRole {
    base: String,
    overrides: StyleOverrides,
}

/// The registry of style roles a document renders against.
///
/// Role names are unique across base and derived roles.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    bases: HashMap<String, ResolvedStyle>,
    derived: HashMap<String, DerivedRole>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bases.contains_key(name) || self.derived.contains_key(name)
    }

    /// Registers a base role with a complete attribute set.
    pub fn define_base(
        &mut self,
        name: impl Into<String>,
        style: ResolvedStyle,
    ) -> Result<(), AssemblerError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(AssemblerError::DuplicateStyleRole(name));
        }
        self.bases.insert(name, style);
        Ok(())
    }

    /// Registers a role derived from a base role. The base must already be
    /// registered as a base role — deriving from another derived role is
    /// rejected, which keeps resolution a single step.
    pub fn derive(
        &mut self,
        name: impl Into<String>,
        base: impl Into<String>,
        overrides: StyleOverrides,
    ) -> Result<(), AssemblerError> {
        let name = name.into();
        let base = base.into();
        if self.contains(&name) {
            return Err(AssemblerError::DuplicateStyleRole(name));
        }
        if !self.bases.contains_key(&base) {
            return Err(AssemblerError::UnknownBaseRole { role: name, base });
        }
        self.derived.insert(name, DerivedRole { base, overrides });
        Ok(())
    }

    /// Resolves a role name to its effective attribute set.
    ///
    /// A base role resolves to exactly its own attributes; a derived role
    /// resolves to its base's attributes with the overrides applied.
    pub fn resolve(&self, name: &str) -> Result<ResolvedStyle, AssemblerError> {
        if let Some(style) = self.bases.get(name) {
            return Ok(*style);
        }
        let Some(role) = self.derived.get(name) else {
            return Err(AssemblerError::StyleNotFound(name.to_string()));
        };
        // The base is guaranteed present: `derive` checked it at registration.
        let base = self
            .bases
            .get(&role.base)
            .ok_or_else(|| AssemblerError::StyleNotFound(role.base.clone()))?;
        let ov = &role.overrides;
        Ok(ResolvedStyle {
            font_size_pt: ov.font_size_pt.unwrap_or(base.font_size_pt),
            space_before_pt: ov.space_before_pt.unwrap_or(base.space_before_pt),
            space_after_pt: ov.space_after_pt.unwrap_or(base.space_after_pt),
            alignment: ov.alignment.unwrap_or(base.alignment),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
