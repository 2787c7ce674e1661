//! Type identity handles.
//!
//! Types live in the checker's registry; everything else refers to them by
//! `TypeId`. Two types are the same type exactly when their ids are equal.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    // Built-ins are always registered first, in this order.
    pub const NOTHING: TypeId = TypeId(0);
    pub const BOOLEAN: TypeId = TypeId(1);
    pub const NUMBER: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);

    pub const BUILTIN_COUNT: u32 = 4;

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    #[inline]
    pub fn is_nothing(self) -> bool {
        self == Self::NOTHING
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::NOTHING => write!(f, "TypeId(nothing)"),
            TypeId::BOOLEAN => write!(f, "TypeId(boolean)"),
            TypeId::NUMBER => write!(f, "TypeId(number)"),
            TypeId::STRING => write!(f, "TypeId(string)"),
            TypeId(id) => write!(f, "TypeId({})", id),
        }
    }
}

/// Builds the overload key `name(argTypeName,argTypeName,...)` used for both
/// user and external functions.
pub fn signature<'a>(name: &str, type_names: impl IntoIterator<Item = &'a str>) -> String {
    let mut sig = String::with_capacity(name.len() + 2);
    sig.push_str(name);
    sig.push('(');
    for (i, ty) in type_names.into_iter().enumerate() {
        if i > 0 {
            sig.push(',');
        }
        sig.push_str(ty);
    }
    sig.push(')');
    sig
}
