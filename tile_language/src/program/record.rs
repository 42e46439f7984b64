//! Save-format records: tiles referenced by id.

use serde::{Deserialize, Serialize};

/// `{ pages: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrainRecord {
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

/// `{ rules?: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleRecord>,
}

/// `{ sensor?, actuator?, filters?, modifiers? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuator: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}
