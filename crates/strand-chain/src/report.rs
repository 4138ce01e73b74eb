//! The [`ValidationReport`] returned by every validator.

use serde::Serialize;

/// Outcome of a read-only validation pass.
///
/// Defects are data, not faults: a malformed transcript produces a report
/// with `valid == false` and one entry per defect, in file order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport<E> {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Every defect found, in file order.
    pub errors: Vec<E>,
}

impl<E> ValidationReport<E> {
    /// Build a report from collected errors.
    #[must_use]
    pub fn from_errors(errors: Vec<E>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether no defects were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// 1-based position of the record at `index`.
pub(crate) fn line_of(index: usize) -> usize {
    index + 1
}
