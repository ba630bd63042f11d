use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three structurally identical table sets used to compare
/// search query plans.
///
/// The base set carries no index on `user_info` besides the primary key;
/// `_wci` adds a composite `(name, surname)` index and `_wsi` adds one
/// index per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    #[default]
    Plain,
    CompositeIndex,
    SeparateIndices,
}

/// Table names in dependency order (parents first).
pub const BASE_TABLES: [&str; 5] = [
    "user_settings",
    "interest",
    "user_info",
    "user_has_interest",
    "friends",
];

impl SchemaVariant {
    pub const ALL: [Self; 3] = [Self::Plain, Self::CompositeIndex, Self::SeparateIndices];

    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::CompositeIndex => "_wci",
            Self::SeparateIndices => "_wsi",
        }
    }

    #[must_use]
    pub fn table(&self, base: &str) -> String {
        format!("{base}{}", self.suffix())
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::CompositeIndex => "composite",
            Self::SeparateIndices => "separate",
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "none" => Ok(Self::Plain),
            "composite" | "wci" => Ok(Self::CompositeIndex),
            "separate" | "wsi" => Ok(Self::SeparateIndices),
            other => anyhow::bail!("Unknown schema variant: {other}"),
        }
    }
}
