//! Candidate environment keys for each logical setting
//!
//! Each field is looked up by its primary key first, then by its aliases in
//! order. The first present, non-empty value wins.

use std::collections::HashMap;

/// One logical setting and the keys it can be supplied under
#[derive(Debug, Clone, Copy)]
pub struct FieldKeys {
    /// Logical field name used in error messages
    pub field: &'static str,
    /// Primary key followed by aliases, highest priority first
    pub keys: &'static [&'static str],
}

pub const BASE_URL: FieldKeys = FieldKeys {
    field: "baseUrl",
    keys: &["ELASTICSEARCH_URL", "KIBANA_URL", "ELASTIC_URL"],
};

pub const API_KEY: FieldKeys = FieldKeys {
    field: "apiKey",
    keys: &[
        "ELASTICSEARCH_API_KEY",
        "KIBANA_API_KEY",
        "ELASTIC_API_KEY",
        "API_KEY",
    ],
};

pub const SPACE_ID: FieldKeys = FieldKeys {
    field: "spaceId",
    keys: &["ELASTIC_SPACE_ID", "KIBANA_SPACE_ID"],
};

pub const VERIFY_SSL: FieldKeys = FieldKeys {
    field: "verifySsl",
    keys: &["ELASTIC_VERIFY_SSL", "KIBANA_VERIFY_SSL"],
};

pub const TIMEOUT_SECONDS: FieldKeys = FieldKeys {
    field: "timeoutSeconds",
    keys: &["ELASTIC_TIMEOUT_S", "KIBANA_TIMEOUT_S", "KIBANA_TIMEOUT"],
};

pub const DEFAULT_AGENT_ID: FieldKeys = FieldKeys {
    field: "defaultAgentId",
    keys: &[
        "DEFAULT_AGENT_ID",
        "ELASTIC_AGENT_ID",
        "ELASTIC_DEFAULT_AGENT_ID",
    ],
};

/// A value found in the environment, with the key it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<'a> {
    pub key: &'static str,
    pub value: &'a str,
}

impl FieldKeys {
    /// Find the highest-priority non-empty value for this field
    pub fn lookup<'a>(&self, env: &'a HashMap<String, String>) -> Option<Found<'a>> {
        self.keys.iter().find_map(|&key| {
            env.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|value| Found { key, value })
        })
    }

    /// Comma-separated key list for diagnostics
    pub fn describe(&self) -> String {
        self.keys.join(", ")
    }
}
