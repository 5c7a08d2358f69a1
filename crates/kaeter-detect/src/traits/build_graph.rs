use std::path::Path;

use crate::error::BuildGraphQueryError;

/// Evaluation flags passed along with a query expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Return partial results when some packages fail to load.
    pub keep_going: bool,
    /// Leave out dependencies that are only needed to build tools.
    pub skip_tool_deps: bool,
}

impl QueryOptions {
    #[must_use]
    pub fn keep_going() -> Self {
        Self {
            keep_going: true,
            skip_tool_deps: false,
        }
    }

    #[must_use]
    pub fn without_tool_deps(mut self) -> Self {
        self.skip_tool_deps = true;
        self
    }
}

/// Runs queries against the build dependency graph.
pub trait BuildGraphQuery: Send + Sync {
    /// Returns one entry per result line, in the order the tool printed them.
    ///
    /// # Errors
    ///
    /// Returns an error if the query tool cannot be started or fails.
    fn query(
        &self,
        root: &Path,
        expression: &str,
        options: QueryOptions,
    ) -> Result<Vec<String>, BuildGraphQueryError>;
}

impl<T: BuildGraphQuery + ?Sized> BuildGraphQuery for &T {
    fn query(
        &self,
        root: &Path,
        expression: &str,
        options: QueryOptions,
    ) -> Result<Vec<String>, BuildGraphQueryError> {
        (**self).query(root, expression, options)
    }
}
