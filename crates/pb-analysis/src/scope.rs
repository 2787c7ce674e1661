//! Lexical scopes.
//!
//! One `Scopes` lives for the duration of one function body. Every
//! declaration gets the next slot index; slots are never reused, so sibling
//! blocks that declare the same name still get distinct slots.

use rustc_hash::FxHashMap;

use pb_common::{CompilerError, Location, TypeId};

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub location: Location,
    pub ty: TypeId,
    pub slot: u16,
}

#[derive(Debug)]
pub struct Scopes {
    scopes: Vec<FxHashMap<String, Symbol>>,
    next_slot: u16,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// A fresh function-level scope stack with a single empty scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
            next_slot: 0,
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Innermost-to-outermost lookup.
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Declares `name` in the innermost scope and returns its slot.
    /// A name visible from any enclosing scope may not be declared again.
    pub fn add(&mut self, name: &str, location: Location, ty: TypeId) -> Result<u16, CompilerError> {
        if let Some(other) = self.find(name) {
            return Err(CompilerError::new(
                format!(
                    "Variable {} already defined in line {}, column {}.",
                    name, other.location.start.line, other.location.start.column
                ),
                location,
            ));
        }
        let slot = self.next_slot;
        self.next_slot = slot.checked_add(1).ok_or_else(|| {
            CompilerError::new(
                format!("Too many variables, can not declare {}.", name),
                location,
            )
        })?;
        let symbol = Symbol {
            name: name.to_string(),
            location,
            ty,
            slot,
        };
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), symbol);
        }
        Ok(slot)
    }

    /// Number of slots handed out so far, i.e. the frame size.
    pub fn slot_count(&self) -> u16 {
        self.next_slot
    }
}
