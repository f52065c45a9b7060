//! Entity trait - common interface for all entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all SiteDeck entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "PROJ", "TASK")
    const PREFIX: &'static str;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get the entity's display name
    fn name(&self) -> &str;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author
    fn author(&self) -> &str;
}

/// Project lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::OnHold => write!(f, "on_hold"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "active" => Ok(ProjectStatus::Active),
            "on_hold" => Ok(ProjectStatus::OnHold),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// Task status - who the task is currently waiting on.
///
/// Transitions are unconstrained (any value to any value); every change
/// is appended to the change log for the audit trail.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum TaskStatus {
    #[default]
    Open,
    WaitingOnClient,
    WaitingOnVendor,
    WaitingOnUs,
    Resolved,
}

impl TaskStatus {
    /// Whether the task still needs action
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Resolved)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::WaitingOnClient => write!(f, "waiting_on_client"),
            TaskStatus::WaitingOnVendor => write!(f, "waiting_on_vendor"),
            TaskStatus::WaitingOnUs => write!(f, "waiting_on_us"),
            TaskStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "open" => Ok(TaskStatus::Open),
            "waiting_on_client" => Ok(TaskStatus::WaitingOnClient),
            "waiting_on_vendor" => Ok(TaskStatus::WaitingOnVendor),
            "waiting_on_us" => Ok(TaskStatus::WaitingOnUs),
            "resolved" => Ok(TaskStatus::Resolved),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Task priority, P1 (most urgent) through P3
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    P1,
    #[default]
    P2,
    P3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::P1 => write!(f, "p1"),
            Priority::P2 => write!(f, "p2"),
            Priority::P3 => write!(f, "p3"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "p1" | "1" | "high" => Ok(Priority::P1),
            "p2" | "2" | "medium" => Ok(Priority::P2),
            "p3" | "3" | "low" => Ok(Priority::P3),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Quote status, progressing loosely from pending through contract stages
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum QuoteStatus {
    #[default]
    Pending,
    Quoted,
    Approved,
    Declined,
    ContractSent,
    ContractSigned,
    Completed,
}

impl QuoteStatus {
    /// Late-stage statuses that count as approved for reporting
    pub fn is_approved(&self) -> bool {
        matches!(
            self,
            QuoteStatus::Approved
                | QuoteStatus::ContractSent
                | QuoteStatus::ContractSigned
                | QuoteStatus::Completed
        )
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Pending => write!(f, "pending"),
            QuoteStatus::Quoted => write!(f, "quoted"),
            QuoteStatus::Approved => write!(f, "approved"),
            QuoteStatus::Declined => write!(f, "declined"),
            QuoteStatus::ContractSent => write!(f, "contract_sent"),
            QuoteStatus::ContractSigned => write!(f, "contract_signed"),
            QuoteStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "pending" => Ok(QuoteStatus::Pending),
            "quoted" => Ok(QuoteStatus::Quoted),
            "approved" => Ok(QuoteStatus::Approved),
            "declined" => Ok(QuoteStatus::Declined),
            "contract_sent" => Ok(QuoteStatus::ContractSent),
            "contract_signed" => Ok(QuoteStatus::ContractSigned),
            "completed" => Ok(QuoteStatus::Completed),
            _ => Err(format!("Unknown quote status: {}", s)),
        }
    }
}

/// Vendor quality/communication rating
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Rating {
    Poor,
    #[default]
    Fair,
    Good,
    Excellent,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Poor => write!(f, "poor"),
            Rating::Fair => write!(f, "fair"),
            Rating::Good => write!(f, "good"),
            Rating::Excellent => write!(f, "excellent"),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "poor" => Ok(Rating::Poor),
            "fair" => Ok(Rating::Fair),
            "good" => Ok(Rating::Good),
            "excellent" => Ok(Rating::Excellent),
            _ => Err(format!("Unknown rating: {}", s)),
        }
    }
}

/// Normalize a user-supplied enum value: lowercase, spaces and hyphens
/// to underscores. Shared by all status/priority parsers so CSV input
/// like "On Hold" or "contract-sent" matches.
pub fn normalize_variant(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_variant() {
        assert_eq!(normalize_variant("On Hold"), "on_hold");
        assert_eq!(normalize_variant("contract-sent"), "contract_sent");
        assert_eq!(normalize_variant("  OPEN "), "open");
    }

    #[test]
    fn test_status_parses_loose_forms() {
        assert_eq!(
            "Waiting On Client".parse::<TaskStatus>().unwrap(),
            TaskStatus::WaitingOnClient
        );
        assert_eq!(
            "ON HOLD".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::OnHold
        );
        assert_eq!(
            "Contract Signed".parse::<QuoteStatus>().unwrap(),
            QuoteStatus::ContractSigned
        );
    }

    #[test]
    fn test_priority_aliases() {
        assert_eq!("P1".parse::<Priority>().unwrap(), Priority::P1);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::P1);
        assert_eq!("3".parse::<Priority>().unwrap(), Priority::P3);
    }

    #[test]
    fn test_quote_status_approved_set() {
        assert!(QuoteStatus::Approved.is_approved());
        assert!(QuoteStatus::ContractSent.is_approved());
        assert!(QuoteStatus::ContractSigned.is_approved());
        assert!(QuoteStatus::Completed.is_approved());
        assert!(!QuoteStatus::Quoted.is_approved());
        assert!(!QuoteStatus::Declined.is_approved());
    }

    #[test]
    fn test_task_open_set() {
        assert!(TaskStatus::Open.is_open());
        assert!(TaskStatus::WaitingOnVendor.is_open());
        assert!(!TaskStatus::Resolved.is_open());
    }
}
