//! String interner for identifiers.
//!
//! Provides O(1) interning and lookup. Interned strings are leaked so that
//! lookups can hand out `&'static str` without holding the lock.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// String interner with interior locking.
///
/// # Thread Safety
/// Uses a single `RwLock`; reads (the common case after declaration
/// processing) never contend with each other.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the well-known member names pre-interned.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        let interner = StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        };
        for name in WellKnownNames::STRINGS {
            interner.intern(name);
        }
        interner
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&idx) = self.table.read().map.get(s) {
            return Name::from_raw(idx);
        }

        let mut table = self.table.write();
        // Double-check after acquiring write lock
        if let Some(&idx) = table.map.get(s) {
            return Name::from_raw(idx);
        }

        let Ok(idx) = u32::try_from(table.strings.len()) else {
            panic!("string interner exceeded {} entries", u32::MAX);
        };
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the string for a Name.
    ///
    /// Returns `""` for names that were not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Names of the members the synthesizers treat specially.
    pub fn well_known(&self) -> WellKnownNames {
        WellKnownNames {
            equals: self.intern("equals"),
            hash: self.intern("hash"),
            match_op: self.intern("Match"),
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Pre-interned names of the members that drive override-by-presence.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WellKnownNames {
    /// User equality override.
    pub equals: Name,
    /// User hash override.
    pub hash: Name,
    /// Deconstruction operator.
    pub match_op: Name,
}

impl WellKnownNames {
    const STRINGS: [&'static str; 3] = ["equals", "hash", "Match"];
}

/// Shareable handle to a `StringInterner`.
#[derive(Clone, Default, Debug)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
