use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const UNKNOWN_ACCOUNT: &str = "Unknown Account";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AccountInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }
}

/// Lookup table from account id to display metadata.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    entries: HashMap<String, AccountInfo>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, info: AccountInfo) {
        self.entries.insert(id.into(), info);
    }

    pub fn get(&self, id: &str) -> Option<&AccountInfo> {
        self.entries.get(id)
    }

    pub fn name_of(&self, id: &str) -> String {
        self.entries
            .get(id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| UNKNOWN_ACCOUNT.into())
    }
}

impl FromIterator<(String, AccountInfo)> for AccountDirectory {
    fn from_iter<T: IntoIterator<Item = (String, AccountInfo)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
