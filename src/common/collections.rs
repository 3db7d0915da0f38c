pub use std::collections::BTreeSet;

pub type HashSet<T> = rustc_hash::FxHashSet<T>;
