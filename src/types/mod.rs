mod issue;
mod project;

pub use issue::Issue;
pub use project::{CatalogEntry, Member, Project, ProjectMetadata};

/// Project metadata keyed by project id.
///
/// An `IndexMap` keeps iteration in load order, so cross-project walks
/// (chip summaries, dropdown option collection) are deterministic.
pub type MetadataMap = indexmap::IndexMap<i64, ProjectMetadata>;
