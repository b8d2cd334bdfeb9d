//! Student record value types.

/// One student's stored data.
///
/// `age` is stored and compared as text, never parsed as a number; the
/// roster treats it as an opaque label, the same as `major`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    /// Unique student id; immutable once the record is created.
    pub id: String,
    pub name: String,
    pub age: String,
    pub major: String,
}

impl StudentRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
        major: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
            major: major.into(),
        }
    }
}

/// Partial update for an existing record.
///
/// `None` keeps the stored value; `Some` replaces it. An explicit empty
/// string is rejected by the store rather than treated as "keep", so a
/// record can never end up with a blank field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub major: Option<String>,
}

impl StudentUpdate {
    /// Returns true if applying this update would change nothing.
    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.major.is_none()
    }
}
