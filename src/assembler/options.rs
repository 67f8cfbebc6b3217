//! Assembler options and configuration.

use crate::model::Metadata;

/// Options for assembling documents.
#[derive(Debug, Clone)]
pub struct AssemblerOptions {
    /// What to do when a style name is registered twice
    pub duplicate_styles: DuplicateStylePolicy,

    /// Document metadata
    pub metadata: Metadata,
}

impl AssemblerOptions {
    /// Create new assembler options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate style policy.
    pub fn with_duplicate_styles(mut self, policy: DuplicateStylePolicy) -> Self {
        self.duplicate_styles = policy;
        self
    }

    /// Let re-registered styles replace earlier ones.
    pub fn overwrite_styles(mut self) -> Self {
        self.duplicate_styles = DuplicateStylePolicy::Overwrite;
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            duplicate_styles: DuplicateStylePolicy::Reject,
            metadata: Metadata::default(),
        }
    }
}

/// Behaviour when a user style name is registered again.
///
/// Built-in styles can always be redefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateStylePolicy {
    /// Fail with `Error::DuplicateStyle`
    #[default]
    Reject,
    /// Last registration wins
    Overwrite,
}
