//! Global symbol interner.
//!
//! Every distinct name is stored exactly once. Interned symbols compare by id
//! (O(1)) and order by name, so canonical ordering is alphabetical and
//! independent of interning order.
//!
//! The registry is the only shared mutable state in the engine. Name lookups
//! are sharded by `FxHasher` to keep lock contention low; the id table is a
//! `SlotMap` behind an `RwLock`.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHasher};
use slotmap::{DefaultKey, Key, KeyData, SlotMap};

/// An interned name used by `Symbol` and `CustomConstant` nodes
#[derive(Debug, Clone)]
pub struct InternedSymbol {
    id: u64,
    name: Arc<str>,
}

impl InternedSymbol {
    /// The symbol's unique id
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for InternedSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for InternedSymbol {}

impl Hash for InternedSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for InternedSymbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedSymbol {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            Ordering::Equal
        } else {
            self.name.cmp(&other.name)
        }
    }
}

impl AsRef<str> for InternedSymbol {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Registry
// ============================================================================

const NUM_SHARDS: usize = 16;

struct SymbolRegistry {
    shards: [Mutex<FxHashMap<Arc<str>, DefaultKey>>; NUM_SHARDS],
    by_key: RwLock<SlotMap<DefaultKey, Arc<str>>>,
}

impl SymbolRegistry {
    fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(FxHashMap::default())),
            by_key: RwLock::new(SlotMap::with_key()),
        }
    }

    fn shard(&self, name: &str) -> &Mutex<FxHashMap<Arc<str>, DefaultKey>> {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits are needed to pick a shard"
        )]
        let idx = (hasher.finish() as usize) % NUM_SHARDS;
        &self.shards[idx]
    }
}

static REGISTRY: LazyLock<SymbolRegistry> = LazyLock::new(SymbolRegistry::new);

/// Intern `name`, returning the existing entry when it was seen before
pub fn intern(name: &str) -> InternedSymbol {
    let mut shard = REGISTRY
        .shard(name)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some((existing, key)) = shard.get_key_value(name) {
        return InternedSymbol {
            id: key.data().as_ffi(),
            name: Arc::clone(existing),
        };
    }

    let shared: Arc<str> = Arc::from(name);
    let key = REGISTRY
        .by_key
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(Arc::clone(&shared));
    shard.insert(Arc::clone(&shared), key);
    drop(shard);

    InternedSymbol {
        id: key.data().as_ffi(),
        name: shared,
    }
}

/// Look up an interned symbol by id
pub fn lookup_by_id(id: u64) -> Option<InternedSymbol> {
    let key: DefaultKey = KeyData::from_ffi(id).into();
    REGISTRY
        .by_key
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .map(|name| InternedSymbol {
            id,
            name: Arc::clone(name),
        })
}

/// True if `name` has been interned
pub fn symbol_exists(name: &str) -> bool {
    REGISTRY
        .shard(name)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Number of distinct names interned so far
pub fn symbol_count() -> usize {
    REGISTRY
        .by_key
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
}
