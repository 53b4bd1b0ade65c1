//! Component tree traversal and DOM-to-component indexing.

pub mod filter;
pub mod index;
pub mod names;
pub mod tree;
pub mod walker;

pub use filter::{is_framework_component, user_path};
pub use index::{DomComponentIndex, IndexStats};
pub use tree::{ComponentDescriptor, ComponentKind, RuntimeNode};
pub use walker::WalkOutcome;
