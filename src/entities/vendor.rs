//! Vendor entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Rating};
use crate::core::identity::{EntityId, EntityPrefix};

/// A vendor (subcontractor or supplier)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique identifier
    pub id: EntityId,

    /// Company name
    pub company: String,

    /// Contact person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    /// Quality/communication rating
    #[serde(default)]
    pub rating: Rating,

    /// Trade categories this vendor covers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades: Vec<EntityId>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this vendor)
    pub author: String,
}

impl Entity for Vendor {
    const PREFIX: &'static str = "VEND";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.company
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Vendor {
    /// Create a new vendor
    pub fn new(company: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Vend),
            company,
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            rating: Rating::default(),
            trades: Vec::new(),
            created: Utc::now(),
            author,
        }
    }
}
