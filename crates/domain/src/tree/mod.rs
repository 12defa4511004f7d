//! Id-keyed view of the collection forest.
//!
//! The persisted document nests children inside their parents; mutations
//! instead run against [`CollectionTree`], a flat node table with parent and
//! child references by id. Cycle checks and ancestor paths are O(depth)
//! walks over parent links, and a child's ownership transfers atomically on
//! move. `from_config` / `into_config` convert between the two shapes
//! without losing child order.

mod arena;
mod ops;

pub use arena::CollectionTree;
