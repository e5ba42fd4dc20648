//! In-memory script value.

/// A script obtained from the remote repository or the local cache,
/// prior to transformation and persistence.
///
/// Owned exclusively by the resolution call that created it; transforms
/// rewrite `text` in place while `original_text` keeps the pristine
/// template for cache write-back.
#[derive(Debug, Clone)]
pub struct ScriptValue {
    /// Mutable script body, rewritten in place by transforms.
    pub text: String,
    original_text: String,
    revision: Option<String>,
    is_canonical: bool,
}

impl ScriptValue {
    /// A script fetched directly from the remote repository's current
    /// revision in this call. Eligible for cache write-back.
    pub fn canonical(text: String, revision: Option<String>) -> Self {
        Self {
            original_text: text.clone(),
            text,
            revision,
            is_canonical: true,
        }
    }

    /// A script read back from the local cache. Never written back.
    pub fn cached(text: String, revision: Option<String>) -> Self {
        Self {
            original_text: text.clone(),
            text,
            revision,
            is_canonical: false,
        }
    }

    /// A script fetched at a specific historical revision. Not
    /// canonical: pinned fetches must never refresh the cache.
    pub fn pinned(text: String, revision: String) -> Self {
        Self {
            original_text: text.clone(),
            text,
            revision: Some(revision),
            is_canonical: false,
        }
    }

    /// The template text before any transforms were applied.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Source revision identifier, when the acquisition confirmed one.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// True only when fetched from the remote repository in this call.
    pub fn is_canonical(&self) -> bool {
        self.is_canonical
    }
}
