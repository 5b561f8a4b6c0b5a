use serde::{Deserialize, Serialize};

/// A role (or everyone) to ping when the poll or ranking is announced.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mention {
    Everyone,
    Role(i64),
}

impl Mention {
    /// The platform mention string for the rendered announcement.
    pub fn display_tag(&self) -> String {
        match self {
            Mention::Everyone => String::from("@everyone"),
            Mention::Role(id) => format!("<@&{id}>"),
        }
    }
}
