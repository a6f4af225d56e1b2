//! Context types for rule execution.

use crate::token::{Token, TokenView};
use std::path::{Path, PathBuf};

/// Placeholder path used when linting tokens that did not come from a file.
const ANONYMOUS_PATH: &str = "<input>";

/// Context provided to per-file rules.
///
/// Rules only ever see a shared borrow of the token stream; nothing in the
/// context is mutable.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the file, relative to the analyzed root when known.
    pub path: PathBuf,
    /// Tokens of the file.
    pub tokens: TokenView<'a>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &Path, root: &Path, tokens: &'a [Token]) -> Self {
        let path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            tokens: TokenView::new(tokens),
        }
    }

    /// Creates a context for tokens with no backing file.
    #[must_use]
    pub fn anonymous(tokens: &'a [Token]) -> Self {
        Self {
            path: PathBuf::from(ANONYMOUS_PATH),
            tokens: TokenView::new(tokens),
        }
    }

    /// Whether the file lives under a test directory or is named like a test
    /// script (`*_test.sql`, `*.tests.sql`, `test_*.sql`).
    #[must_use]
    pub fn is_test(&self) -> bool {
        let in_test_dir = self.path.components().any(|c| {
            matches!(c, std::path::Component::Normal(s) if s == "tests" || s == "test")
        });
        if in_test_dir {
            return true;
        }

        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| {
                let name = name.to_ascii_lowercase();
                name.ends_with("_test.sql")
                    || name.ends_with(".tests.sql")
                    || name.starts_with("test_")
            })
    }
}
