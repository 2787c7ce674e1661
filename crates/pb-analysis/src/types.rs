//! Type registry and resolved signatures.

use rustc_hash::FxHashMap;

use pb_common::{Location, TypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Builtin,
    /// A user function, keyed by its signature.
    Function,
    Record,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    /// Declaration site; `None` for built-ins.
    pub location: Option<Location>,
}

/// Arena of all types known to one compilation, keyed by name.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    by_name: FxHashMap<String, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry holding the four built-ins at their fixed ids.
    pub fn new() -> Self {
        let mut registry = Self {
            types: Vec::new(),
            by_name: FxHashMap::default(),
        };
        for name in ["nothing", "boolean", "number", "string"] {
            registry.insert(name, TypeKind::Builtin, None);
        }
        debug_assert_eq!(registry.lookup("string"), Some(TypeId::STRING));
        registry
    }

    fn insert(&mut self, name: &str, kind: TypeKind, location: Option<Location>) -> TypeId {
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(TypeDef {
            name: name.to_string(),
            kind,
            location,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Registers a new type, or returns the existing definition on collision.
    pub fn register(&mut self, name: &str, kind: TypeKind, location: Location) -> Result<TypeId, &TypeDef> {
        if let Some(&existing) = self.by_name.get(name) {
            return Err(&self.types[existing.as_u32() as usize]);
        }
        Ok(self.insert(name, kind, Some(location)))
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.as_u32() as usize)
    }

    /// Display name of a type, for error messages.
    pub fn name(&self, id: TypeId) -> &str {
        self.get(id).map_or("<unknown>", |def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A checked user function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub ty: TypeId,
    /// Dense function index; `$main` is 0.
    pub index: u32,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub location: Location,
}

/// An external whose parameter/return type names have been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalType {
    pub index: u32,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub is_async: bool,
}

/// Everything the checker learned about a program, beyond the AST annotations.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    pub registry: TypeRegistry,
    pub functions: FxHashMap<String, FunctionType>,
    pub externals: FxHashMap<String, ExternalType>,
}

/// Where a call goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget {
    Function(u32),
    External(u32),
}

impl TypeInfo {
    /// Resolves a call signature. User functions shadow externals.
    pub fn resolve_call(&self, signature: &str) -> Option<(CallTarget, TypeId)> {
        if let Some(f) = self.functions.get(signature) {
            return Some((CallTarget::Function(f.index), f.return_type));
        }
        self.externals
            .get(signature)
            .map(|e| (CallTarget::External(e.index), e.return_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_fixed() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.lookup("nothing"), Some(TypeId::NOTHING));
        assert_eq!(registry.lookup("boolean"), Some(TypeId::BOOLEAN));
        assert_eq!(registry.lookup("number"), Some(TypeId::NUMBER));
        assert_eq!(registry.lookup("string"), Some(TypeId::STRING));
        assert_eq!(registry.name(TypeId::NUMBER), "number");
    }

    #[test]
    fn test_register_reports_collision() {
        let mut registry = TypeRegistry::new();
        let id = registry
            .register("Point", TypeKind::Record, Location::unknown())
            .unwrap();
        assert!(!id.is_builtin());
        let other = registry
            .register("Point", TypeKind::Record, Location::unknown())
            .unwrap_err();
        assert_eq!(other.kind, TypeKind::Record);
        assert!(registry.register("number", TypeKind::Record, Location::unknown()).is_err());
    }
}
