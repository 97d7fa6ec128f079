//! Deterministic bounded context assembly with citation tracking.

use crate::document::{Match, Source};

/// Default maximum context size in characters.
pub const MAX_CONTEXT_CHARS: usize = 3500;

/// Builds a bounded-length prompt context from ranked retrieval matches.
///
/// Matches are consumed in the order received (already rank-ordered by the
/// caller). Each accepted match contributes a labeled snippet
/// `[source_i] <text>` and a parallel [`Source`] record; the label uses
/// the match's position in the iteration, so skipped blanks leave gaps in
/// the numbering rather than renumbering later snippets. The snippet that
/// would overflow the character budget is truncated to exactly fill it,
/// and all remaining matches are dropped.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::ContextBuilder;
///
/// let builder = ContextBuilder::default();
/// let (context, sources) = builder.build(&matches);
/// assert_eq!(sources.len(), matches.len());
/// ```
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_chars: usize,
}

impl ContextBuilder {
    /// Create a builder with the given character budget.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Return the character budget.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Assemble the context string and its citation sources.
    ///
    /// Returns `("", vec![])` for an empty match list or when every match
    /// text is blank; neither is an error. The budget counts Unicode
    /// scalar values, and truncation is character-level with no
    /// word-boundary awareness.
    pub fn build(&self, matches: &[Match]) -> (String, Vec<Source>) {
        let mut snippets: Vec<String> = Vec::new();
        let mut sources: Vec<Source> = Vec::new();
        let mut total = 0usize;

        for (i, m) in matches.iter().enumerate() {
            let source_id = m
                .metadata
                .get("source")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .or_else(|| m.id.clone())
                .unwrap_or_else(|| format!("chunk_{i}"));

            let mut snippet: String = m.text.trim().to_string();
            if snippet.is_empty() {
                continue;
            }

            let len = snippet.chars().count();
            if total + len > self.max_chars {
                snippet = snippet.chars().take(self.max_chars - total).collect();
            }
            total += snippet.chars().count();

            snippets.push(format!("[source_{i}] {snippet}"));
            sources.push(Source {
                id: source_id,
                label: format!("source_{i}"),
                metadata: m.metadata.clone(),
            });

            if total >= self.max_chars {
                break;
            }
        }

        (snippets.join("\n\n"), sources)
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(MAX_CONTEXT_CHARS)
    }
}
