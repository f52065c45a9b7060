//! Trade category entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A construction trade category (e.g. Electrical, Plumbing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Unique identifier
    pub id: EntityId,

    /// Trade name
    pub name: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this trade)
    pub author: String,
}

impl Entity for Trade {
    const PREFIX: &'static str = "TRADE";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Trade {
    /// Create a new trade category
    pub fn new(name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Trade),
            name,
            created: Utc::now(),
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_roundtrip() {
        let t = Trade::new("Electrical".to_string(), "test".to_string());
        let yaml = serde_yml::to_string(&t).unwrap();
        let parsed: Trade = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(t.id, parsed.id);
        assert_eq!(parsed.name, "Electrical");
    }
}
