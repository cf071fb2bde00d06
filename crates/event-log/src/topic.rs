use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A named publish/subscribe channel.
///
/// Topics compare by name, so two contexts that each declare `"payments"`
/// address the same channel without sharing a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    /// Creates a topic from a static name, usable in `const` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a topic from any name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the topic name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Topic {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: Topic = Topic::from_static("orders");

    #[test]
    fn topics_compare_by_name() {
        assert_eq!(ORDERS, Topic::new("orders"));
        assert_ne!(ORDERS, Topic::new("payments"));
        assert_eq!(ORDERS.name(), "orders");
        assert_eq!(ORDERS.to_string(), "orders");
    }

    #[test]
    fn static_and_owned_topics_hash_alike() {
        let mut set = std::collections::HashSet::new();
        set.insert(ORDERS);
        assert!(set.contains(&Topic::new(String::from("orders"))));
    }
}
