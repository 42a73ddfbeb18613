//! Nominal type table.
//!
//! The host compiler owns the full type system; matching only needs a small
//! slice of it: identity, the base-type chain (for the dynamic type test),
//! and nullability (for the null-safety guarantee).

use std::fmt;

use crate::{Name, StringInterner};

/// Type identifier, an index into a `TypePool`.
///
/// # Pre-interned Types
/// `OBJECT`, `INT`, `BOOL` and `STR` occupy fixed indices; nominal types
/// start at `FIRST_NOMINAL`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Top reference type. Every reference type is a subtype of it.
    pub const OBJECT: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const STR: TypeId = TypeId(3);

    /// First ID handed out for declared records and classes.
    pub const FIRST_NOMINAL: u32 = 4;

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeId::OBJECT => write!(f, "object"),
            TypeId::INT => write!(f, "int"),
            TypeId::BOOL => write!(f, "bool"),
            TypeId::STR => write!(f, "str"),
            TypeId(n) => write!(f, "TypeId({n})"),
        }
    }
}

/// What a `TypeId` refers to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Object,
    Int,
    Bool,
    Str,
    /// A type declared with primary members.
    Record { name: Name, base: TypeId },
    /// Any other nominal reference type (may carry user `Match` operators).
    Class { name: Name, base: TypeId },
}

impl TypeKind {
    fn base(&self) -> Option<TypeId> {
        match self {
            TypeKind::Record { base, .. } | TypeKind::Class { base, .. } => Some(*base),
            TypeKind::Str => Some(TypeId::OBJECT),
            TypeKind::Object | TypeKind::Int | TypeKind::Bool => None,
        }
    }
}

/// Table of all known types.
///
/// Base types must be declared before their subtypes, so every base chain
/// strictly decreases in index and subtype walks always terminate.
#[derive(Clone, Debug)]
pub struct TypePool {
    kinds: Vec<TypeKind>,
}

impl TypePool {
    /// Create a pool holding only the pre-interned types.
    pub fn new() -> Self {
        TypePool {
            kinds: vec![TypeKind::Object, TypeKind::Int, TypeKind::Bool, TypeKind::Str],
        }
    }

    /// Declare a record type deriving from `base`.
    pub fn declare_record(&mut self, name: Name, base: TypeId) -> TypeId {
        let base = self.checked_base(base);
        self.push(TypeKind::Record { name, base })
    }

    /// Declare a non-record nominal reference type deriving from `base`.
    pub fn declare_class(&mut self, name: Name, base: TypeId) -> TypeId {
        let base = self.checked_base(base);
        self.push(TypeKind::Class { name, base })
    }

    fn checked_base(&self, base: TypeId) -> TypeId {
        match self.kind(base) {
            Some(TypeKind::Object | TypeKind::Record { .. } | TypeKind::Class { .. }) => base,
            _ => {
                tracing::warn!(?base, "invalid base type, falling back to object");
                TypeId::OBJECT
            }
        }
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let Ok(raw) = u32::try_from(self.kinds.len()) else {
            panic!("type pool exceeded {} entries", u32::MAX);
        };
        tracing::trace!(raw, ?kind, "declared type");
        self.kinds.push(kind);
        TypeId(raw)
    }

    /// Look up a type's kind.
    pub fn kind(&self, ty: TypeId) -> Option<&TypeKind> {
        self.kinds.get(ty.index())
    }

    /// Declared name of a nominal type.
    pub fn name(&self, ty: TypeId) -> Option<Name> {
        match self.kind(ty)? {
            TypeKind::Record { name, .. } | TypeKind::Class { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// Check if `ty` was declared as a record.
    pub fn is_record(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Record { .. }))
    }

    /// Check if values of `ty` may be null.
    pub fn is_nullable(&self, ty: TypeId) -> bool {
        !matches!(self.kind(ty), Some(TypeKind::Int | TypeKind::Bool) | None)
    }

    /// Reflexive, transitive subtype check along the base chain.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup {
            return self.kind(sub).is_some();
        }
        if sup == TypeId::OBJECT {
            return self.is_nullable(sub);
        }
        let mut current = sub;
        while let Some(base) = self.kind(current).and_then(TypeKind::base) {
            if base == sup {
                return true;
            }
            current = base;
        }
        false
    }

    /// Check if a value of one type could ever be a value of the other.
    pub fn related(&self, a: TypeId, b: TypeId) -> bool {
        self.is_subtype(a, b) || self.is_subtype(b, a)
    }

    /// Render a type for diagnostics.
    pub fn display(&self, ty: TypeId, interner: &StringInterner) -> String {
        match self.kind(ty) {
            Some(TypeKind::Object) => "object".to_string(),
            Some(TypeKind::Int) => "int".to_string(),
            Some(TypeKind::Bool) => "bool".to_string(),
            Some(TypeKind::Str) => "str".to_string(),
            Some(TypeKind::Record { name, .. } | TypeKind::Class { name, .. }) => {
                interner.lookup(*name).to_string()
            }
            None => format!("<unknown type {}>", ty.raw()),
        }
    }

    /// Number of types in the pool.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false: the pre-interned types are present from construction.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
