//! mtf-table: a key-value table that moves each entry it finds to the
//! front, so frequently used keys are found again quickly.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose only index is a recency-ordered list, with
//!   caller-chosen key equality and caller-chosen release of keys/values.
//! - Layers:
//!   - NodeList<T>: sentinel-headed singly-linked list whose nodes live in a
//!     `SlotMap`. Positions name link slots, so the sentinel is never an
//!     element and front insert/remove need no special case. Exposes a
//!     `splice_to_front` primitive that relinks one element in O(1).
//!   - MtfTable<'a, K, V, C>: stores `(key, value)` entries in a NodeList,
//!     matches keys with a `Comparator` (any `Fn(&Q, &Q) -> Ordering`, or
//!     `OrdCompare`) on a borrowed form `Q` of the key, and hands released
//!     keys/values to optional destructor hooks living for `'a`.
//!
//! Constraints
//! - Every operation takes exclusive access. Hooks are required to be
//!   `Send`, so a table of `Send` keys, values and comparator is `Send` and
//!   can be shared between threads behind a `Mutex`.
//! - Lookup is a linear scan; a hit costs one constant-time relink.
//! - Duplicate keys are allowed. Lookup uses the first match in recency
//!   order; remove takes every match.
//! - No iteration over entries and no hashing.
//!
//! Relocation
//! - Moving the element at position `p` to the front rewrites three links:
//!   sentinel -> element, element -> old front, `p` -> element's old
//!   successor. If `p` is the sentinel the element is already first and no
//!   link changes; applying the three writes there would point the element
//!   at itself and drop its successor.
//!
//! Ownership
//! - The table always owns its entries. A configured key/value hook
//!   receives each released key/value by value exactly once; with no hook
//!   the table drops it. Hooks apply to entries already stored when set.
//! - Entries are unlinked before hooks run, so user code never observes a
//!   partially relinked list.
//!
//! Notes and non-goals
//! - Heap exhaustion aborts as usual; running out of arena index space is
//!   reported as `TableError::CapacityExhausted` without changing the table.
//! - The NodeList layer is an implementation detail, public only with the
//!   `bench_internal` feature.

mod error;
#[cfg(feature = "bench_internal")]
pub mod node_list;
#[cfg(not(feature = "bench_internal"))]
mod node_list;
mod table;
mod table_proptest;

// Public surface
pub use error::{InvariantError, TableError};
pub use table::{Comparator, KeyDestructor, MtfTable, OrdCompare, ValueDestructor};
