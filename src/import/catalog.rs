//! Field catalog for CSV import
//!
//! Static declarative tables mapping each import kind to its fields:
//! canonical key, required flag, value kind, and the column-name aliases
//! the auto-detector matches against. Alias matching is done on the
//! normalized form (lowercase, separators stripped), so aliases here are
//! written in the most readable form.

use std::fmt;
use std::str::FromStr;

/// Target entity type for an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Projects,
    Tasks,
    BudgetItems,
    Vendors,
}

impl ImportKind {
    /// All import kinds
    pub fn all() -> &'static [ImportKind] {
        &[
            ImportKind::Projects,
            ImportKind::Tasks,
            ImportKind::BudgetItems,
            ImportKind::Vendors,
        ]
    }

    /// CLI-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Projects => "projects",
            ImportKind::Tasks => "tasks",
            ImportKind::BudgetItems => "budget-items",
            ImportKind::Vendors => "vendors",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "projects" | "project" | "proj" => Ok(ImportKind::Projects),
            "tasks" | "task" | "rfis" | "rfi" => Ok(ImportKind::Tasks),
            "budget-items" | "budget_items" | "budget" | "items" => Ok(ImportKind::BudgetItems),
            "vendors" | "vendor" => Ok(ImportKind::Vendors),
            _ => Err(format!(
                "Unsupported import kind: '{}'. Supported: projects, tasks, budget-items, vendors",
                s
            )),
        }
    }
}

/// How a field's raw string value is coerced during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; empty coerces to None for optional fields
    Text,
    /// Email address, lowercased and lightly checked
    Email,
    /// Monetary amount; currency symbols and thousands separators stripped
    Money,
    /// Integer count (e.g. follow-up days)
    Integer,
    /// Boolean via {true,1,yes,y}, empty → false
    Bool,
    /// Task status enum
    TaskStatus,
    /// Task priority enum
    Priority,
    /// Project status enum
    ProjectStatus,
    /// Vendor rating enum
    Rating,
    /// Comma-separated trade names
    TradeList,
}

/// One field a target entity type accepts from CSV
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical field key
    pub key: &'static str,
    /// Whether a valid row must carry a non-empty value
    pub required: bool,
    /// Coercion rule
    pub kind: FieldKind,
    /// Known column-name aliases, matched after normalization
    pub aliases: &'static [&'static str],
}

/// Field list for an import kind, in detection priority order.
///
/// The auto-detector walks this list in order, so earlier fields claim
/// contested columns first.
pub fn fields(kind: ImportKind) -> &'static [FieldSpec] {
    match kind {
        ImportKind::Projects => PROJECT_FIELDS,
        ImportKind::Tasks => TASK_FIELDS,
        ImportKind::BudgetItems => BUDGET_ITEM_FIELDS,
        ImportKind::Vendors => VENDOR_FIELDS,
    }
}

const PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "name",
        required: true,
        kind: FieldKind::Text,
        aliases: &["name", "project", "project name", "job", "job name"],
    },
    FieldSpec {
        key: "client_name",
        required: false,
        kind: FieldKind::Text,
        aliases: &["client", "client name", "customer", "owner"],
    },
    FieldSpec {
        key: "client_email",
        required: false,
        kind: FieldKind::Email,
        aliases: &["client email", "email", "customer email"],
    },
    FieldSpec {
        key: "client_phone",
        required: false,
        kind: FieldKind::Text,
        aliases: &["client phone", "phone", "phone number"],
    },
    FieldSpec {
        key: "address",
        required: false,
        kind: FieldKind::Text,
        aliases: &["address", "site address", "location", "job site"],
    },
    FieldSpec {
        key: "status",
        required: false,
        kind: FieldKind::ProjectStatus,
        aliases: &["status", "project status", "state"],
    },
    FieldSpec {
        key: "total_budget",
        required: false,
        kind: FieldKind::Money,
        aliases: &["total budget", "budget", "contract value", "contract amount"],
    },
];

const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "project",
        required: true,
        kind: FieldKind::Text,
        aliases: &["project", "project name", "job", "job name"],
    },
    FieldSpec {
        key: "title",
        required: true,
        kind: FieldKind::Text,
        aliases: &["title", "task", "task name", "rfi", "description", "item"],
    },
    FieldSpec {
        key: "status",
        required: false,
        kind: FieldKind::TaskStatus,
        aliases: &["status", "waiting on", "state"],
    },
    FieldSpec {
        key: "priority",
        required: false,
        kind: FieldKind::Priority,
        aliases: &["priority", "urgency"],
    },
    FieldSpec {
        key: "blocking",
        required: false,
        kind: FieldKind::Bool,
        aliases: &["blocking", "blocker", "blocks work"],
    },
    FieldSpec {
        key: "follow_up_days",
        required: false,
        kind: FieldKind::Integer,
        aliases: &["follow up days", "follow up", "cadence", "check in days"],
    },
    FieldSpec {
        key: "notes",
        required: false,
        kind: FieldKind::Text,
        aliases: &["notes", "comments", "details"],
    },
];

const BUDGET_ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "project",
        required: true,
        kind: FieldKind::Text,
        aliases: &["project", "project name", "job", "job name"],
    },
    FieldSpec {
        key: "area",
        required: true,
        kind: FieldKind::Text,
        aliases: &["area", "budget area", "room", "category", "section"],
    },
    FieldSpec {
        key: "item",
        required: true,
        kind: FieldKind::Text,
        aliases: &["item", "line item", "name", "description"],
    },
    FieldSpec {
        key: "budgeted",
        required: false,
        kind: FieldKind::Money,
        aliases: &["budgeted", "budget", "budgeted amount", "estimate", "estimated"],
    },
    FieldSpec {
        key: "actual",
        required: false,
        kind: FieldKind::Money,
        aliases: &["actual", "actual amount", "spent", "cost", "actual cost"],
    },
];

const VENDOR_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "company",
        required: true,
        kind: FieldKind::Text,
        aliases: &["company", "vendor", "vendor name", "name", "business"],
    },
    FieldSpec {
        key: "contact_name",
        required: false,
        kind: FieldKind::Text,
        aliases: &["contact", "contact name", "rep"],
    },
    FieldSpec {
        key: "contact_email",
        required: false,
        kind: FieldKind::Email,
        aliases: &["email", "contact email"],
    },
    FieldSpec {
        key: "contact_phone",
        required: false,
        kind: FieldKind::Text,
        aliases: &["phone", "contact phone", "phone number", "cell"],
    },
    FieldSpec {
        key: "rating",
        required: false,
        kind: FieldKind::Rating,
        aliases: &["rating", "quality", "score"],
    },
    FieldSpec {
        key: "trades",
        required: false,
        kind: FieldKind::TradeList,
        aliases: &["trades", "trade", "specialties", "categories"],
    },
];

/// CSV template headers for an import kind
pub fn template_headers(kind: ImportKind) -> Vec<&'static str> {
    fields(kind).iter().map(|f| f.key).collect()
}

/// Example CSV row for an import kind
pub fn template_example(kind: ImportKind) -> Vec<&'static str> {
    match kind {
        ImportKind::Projects => vec![
            "\"Maple St Remodel\"",
            "\"Dana Whitfield\"",
            "dana@example.com",
            "\"+1-555-201-3344\"",
            "\"412 Maple St, Portland, OR\"",
            "active",
            "\"185,000\"",
        ],
        ImportKind::Tasks => vec![
            "\"Maple St Remodel\"",
            "\"Confirm cabinet hardware\"",
            "waiting_on_client",
            "p2",
            "false",
            "3",
            "\"Client reviewing finish options\"",
        ],
        ImportKind::BudgetItems => vec![
            "\"Maple St Remodel\"",
            "Kitchen",
            "Cabinets",
            "\"10,000\"",
            "",
        ],
        ImportKind::Vendors => vec![
            "\"Acme Electric\"",
            "\"Sam Ortiz\"",
            "sam@acme-electric.example.com",
            "\"+1-555-987-1100\"",
            "good",
            "\"Electrical, Low Voltage\"",
        ],
    }
}
