use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A static DNS record configured in Unbound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostOverride {
    #[serde(with = "flag")]
    pub enabled: bool,
    pub hostname: String,
    pub domain: String,
    /// Target IP address.
    pub server: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub mxprio: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub mx: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    // Sent in the URL, never in the body.
    #[serde(default, skip_serializing)]
    pub uuid: Option<String>,
}

impl HostOverride {
    pub fn new(
        hostname: impl Into<String>,
        domain: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            enabled: true,
            hostname: hostname.into(),
            domain: domain.into(),
            server: server.into(),
            mxprio: None,
            mx: None,
            description: None,
            uuid: None,
        }
    }

    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.hostname, self.domain)
    }
}

/// Request body for add/set and response body for get.
#[derive(Debug, Serialize, Deserialize)]
pub struct HostContainer {
    pub host: HostOverride,
}

#[derive(Debug, Deserialize)]
pub struct HostsContainer {
    #[serde(default)]
    pub rows: Vec<HostOverride>,
}

/// Body returned by mutating calls.
#[derive(Debug, Deserialize)]
pub struct ServerResult {
    #[serde(default)]
    pub result: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub uuid: Option<String>,
    #[serde(default)]
    pub validations: BTreeMap<String, serde_json::Value>,
}

impl ServerResult {
    pub fn is_failed(&self) -> bool {
        self.result.eq_ignore_ascii_case("failed") || !self.validations.is_empty()
    }

    pub fn is_not_found(&self) -> bool {
        self.result.eq_ignore_ascii_case("not found")
    }

    /// Field/message pairs from `validations`, in field order.
    pub fn validation_messages(&self) -> Vec<(String, String)> {
        self.validations
            .iter()
            .map(|(field, message)| {
                let message = match message {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), message)
            })
            .collect()
    }
}

/// Body returned with non-success status codes.
#[derive(Debug, Deserialize)]
pub struct ServerError {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(alias = "errorMessage")]
    pub message: String,
}

/// Wire form of booleans: `"0"` / `"1"`.
mod flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Bool(b) => Ok(b),
            serde_json::Value::Number(n) => Ok(n.as_u64() == Some(1)),
            serde_json::Value::String(s) => match s.as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(serde::de::Error::custom(format!(
                    "invalid enabled flag: {other}"
                ))),
            },
            serde_json::Value::Null => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "invalid enabled flag: {other}"
            ))),
        }
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
