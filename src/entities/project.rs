//! Project entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, ProjectStatus};
use crate::core::identity::{EntityId, EntityPrefix};

/// Client contact details for a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientContact {
    /// Client name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Client email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Client phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A construction project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: EntityId,

    /// Project name
    pub name: String,

    /// Client contact
    #[serde(default)]
    pub client: ClientContact,

    /// Site address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Total budget, if set at the project level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_budget: Option<f64>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this project)
    pub author: String,
}

impl Entity for Project {
    const PREFIX: &'static str = "PROJ";

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

impl Project {
    /// Create a new active project
    pub fn new(name: String, author: String) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Proj),
            name,
            client: ClientContact::default(),
            address: None,
            status: ProjectStatus::Active,
            total_budget: None,
            created: Utc::now(),
            author,
        }
    }
}
