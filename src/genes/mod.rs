//! Gene identifier handling: alias resolution and its diagnostics.

pub mod resolver;

pub use resolver::{
    AliasConflict, GeneNameResolver, Resolved, ResolutionKind, ResolutionSummary,
};
