//! Host-provided functions.
//!
//! Externals are registered with parameter and return type *names*; the
//! checker resolves those names when a program is compiled against the
//! registry. Lookup is by signature `name(typeName,...)`, the same key user
//! functions use, so overloads such as `toString(number)` and
//! `toString(boolean)` coexist.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use pb_common::signature;

use crate::pending::Pending;
use crate::value::Value;

pub type SyncFn<H> = dyn Fn(&mut H, &[Value]) -> Value + Send + Sync;
pub type AsyncFn<H> = dyn Fn(&mut H, &[Value]) -> Pending + Send + Sync;

/// How an external runs. Arguments arrive in source order.
pub enum Callback<H> {
    /// Runs to completion inside the calling step.
    Sync(Arc<SyncFn<H>>),
    /// Starts work and returns a handle; the VM suspends until it completes.
    Async(Arc<AsyncFn<H>>),
}

impl<H> Clone for Callback<H> {
    fn clone(&self) -> Self {
        match self {
            Callback::Sync(f) => Callback::Sync(f.clone()),
            Callback::Async(f) => Callback::Async(f.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalParam {
    pub name: String,
    pub type_name: String,
}

pub struct ExternalFunction<H> {
    pub name: String,
    pub params: Vec<ExternalParam>,
    /// `None` means `nothing`.
    pub return_type_name: Option<String>,
    pub callback: Callback<H>,
    /// Position in the registry table; the operand of `CallExt`.
    pub index: u32,
    signature: String,
}

impl<H> ExternalFunction<H> {
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        matches!(self.callback, Callback::Async(_))
    }

    /// Whether a call leaves a value on the stack.
    #[inline]
    pub fn returns_value(&self) -> bool {
        matches!(self.return_type_name.as_deref(), Some(name) if name != "nothing")
    }
}

impl<H> fmt::Debug for ExternalFunction<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalFunction")
            .field("signature", &self.signature)
            .field("return_type_name", &self.return_type_name)
            .field("async", &self.is_async())
            .field("index", &self.index)
            .finish()
    }
}

/// Table of externals available to a program.
pub struct ExternalRegistry<H> {
    functions: Vec<ExternalFunction<H>>,
    lookup: HashMap<String, u32>,
}

impl<H> Default for ExternalRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ExternalRegistry<H> {
    pub fn new() -> Self {
        Self {
            functions: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Registers an external and returns its table index. A later function
    /// with the same signature shadows the earlier one for lookup.
    pub fn add_function(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
        return_type_name: Option<&str>,
        callback: Callback<H>,
    ) -> u32 {
        let index = self.functions.len() as u32;
        let params: Vec<ExternalParam> = params
            .iter()
            .map(|(name, type_name)| ExternalParam {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
            .collect();
        let signature = signature(name, params.iter().map(|p| p.type_name.as_str()));
        tracing::trace!(%signature, index, "register external");
        self.lookup.insert(signature.clone(), index);
        self.functions.push(ExternalFunction {
            name: name.to_string(),
            params,
            return_type_name: return_type_name.map(str::to_string),
            callback,
            index,
            signature,
        });
        index
    }

    pub fn add_sync<F>(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
        return_type_name: Option<&str>,
        f: F,
    ) -> u32
    where
        F: Fn(&mut H, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.add_function(name, params, return_type_name, Callback::Sync(Arc::new(f)))
    }

    pub fn add_async<F>(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
        return_type_name: Option<&str>,
        f: F,
    ) -> u32
    where
        F: Fn(&mut H, &[Value]) -> Pending + Send + Sync + 'static,
    {
        self.add_function(name, params, return_type_name, Callback::Async(Arc::new(f)))
    }

    pub fn lookup(&self, signature: &str) -> Option<&ExternalFunction<H>> {
        let index = *self.lookup.get(signature)?;
        self.functions.get(index as usize)
    }

    #[inline]
    pub fn get(&self, index: u32) -> Option<&ExternalFunction<H>> {
        self.functions.get(index as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExternalFunction<H>> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_signature() {
        let mut registry: ExternalRegistry<()> = ExternalRegistry::new();
        let a = registry.add_sync("toString", &[("value", "number")], Some("string"), |_, args| {
            Value::from(args[0].to_string())
        });
        let b = registry.add_sync("toString", &[("value", "boolean")], Some("string"), |_, args| {
            Value::from(args[0].to_string())
        });
        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.lookup("toString(number)").map(|f| f.index), Some(0));
        assert_eq!(registry.lookup("toString(boolean)").map(|f| f.index), Some(1));
        assert!(registry.lookup("toString(string)").is_none());
    }

    #[test]
    fn test_later_registration_shadows() {
        let mut registry: ExternalRegistry<()> = ExternalRegistry::new();
        registry.add_sync("f", &[], None, |_, _| Value::Nothing);
        registry.add_sync("f", &[], Some("number"), |_, _| Value::from(1.0));
        assert_eq!(registry.len(), 2);
        let f = registry.lookup("f()").unwrap();
        assert_eq!(f.index, 1);
        assert!(f.returns_value());
    }

    #[test]
    fn test_async_flag() {
        let mut registry: ExternalRegistry<()> = ExternalRegistry::new();
        registry.add_async("wait", &[("ms", "number")], Some("number"), |_, args| {
            Pending::ready(args[0].clone())
        });
        let wait = registry.get(0).unwrap();
        assert!(wait.is_async());
        assert_eq!(wait.signature(), "wait(number)");
    }

    #[test]
    fn test_callback_receives_host() {
        let mut registry: ExternalRegistry<Vec<String>> = ExternalRegistry::new();
        registry.add_sync("log", &[("m", "string")], None, |host, args| {
            host.push(args[0].to_string());
            Value::Nothing
        });
        let mut host = Vec::new();
        if let Callback::Sync(f) = &registry.get(0).unwrap().callback {
            f(&mut host, &[Value::from("hi")]);
        }
        assert_eq!(host, vec!["hi".to_string()]);
    }
}
