// panodiff-core: XML document model, scope selection, and diff generation
// for Panorama configuration comparison.

pub mod compare;
pub mod diff;
pub mod error;
pub mod selector;
pub mod xml;

pub use compare::{ScopedDiff, diff_scoped_config};
pub use error::CoreError;
pub use selector::{PathExpr, Scope};
pub use xml::{Document, Element, Node};
