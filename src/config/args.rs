//! Command-line overrides understood by the invocation.

/// Optional argument overrides.
///
/// Each field defaults to `None`, meaning "leave the invocation default". Only
/// `Some(true)` has an effect; `Some(false)` behaves like `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    pub compare_sql: Option<bool>,
    pub nocompare_tuples: Option<bool>,
    pub noclean: Option<bool>,
    pub verbose: Option<bool>,
}

impl InvocationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compare_sql(mut self, value: bool) -> Self {
        self.compare_sql = Some(value);
        self
    }

    pub fn with_nocompare_tuples(mut self, value: bool) -> Self {
        self.nocompare_tuples = Some(value);
        self
    }

    pub fn with_noclean(mut self, value: bool) -> Self {
        self.noclean = Some(value);
        self
    }

    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = Some(value);
        self
    }
}

/// A flag only counts when it is present and set.
pub(crate) fn is_set(flag: Option<bool>) -> bool {
    flag == Some(true)
}
