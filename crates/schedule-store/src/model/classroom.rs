use serde::{Deserialize, Serialize};

/// A classroom the directory reports a user as belonging to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub classroom_id: String,
    pub name: String,
}

impl Classroom {
    #[must_use]
    pub fn new(classroom_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            classroom_id: classroom_id.into(),
            name: name.into(),
        }
    }
}
