//! Topic identifiers

use std::borrow::Borrow;
use std::fmt;

/// Named logical channel correlating producers and queues
///
/// Topics are plain values: two `Topic`s with the same name denote the same
/// topic everywhere, including as keys in the relation registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic {
    name: String,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// Lets registry maps be queried with a bare name
impl Borrow<str> for Topic {
    fn borrow(&self) -> &str {
        &self.name
    }
}
