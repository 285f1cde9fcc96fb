//! Recipients and the recipient directory

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FlowError, FlowResult};

/// A payee. Replaced wholesale on re-selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    pub name: String,
    pub bank: String,
    pub account: String,
}

impl Recipient {
    pub fn new(
        name: impl Into<String>,
        bank: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bank: bank.into(),
            account: account.into(),
        }
    }

    /// First character of the name, empty when the name is empty.
    pub fn avatar(&self) -> String {
        self.name.chars().next().map(String::from).unwrap_or_default()
    }

    /// `"<bank> <account>"` as shown under the recipient name.
    pub fn account_line(&self) -> String {
        format!("{} {}", self.bank, self.account)
    }

    /// Case-insensitive substring match on name or bank.
    ///
    /// `needle` must already be lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.bank.to_lowercase().contains(needle)
    }
}

/// Static list of known recipients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientDirectory {
    entries: Vec<Recipient>,
}

impl RecipientDirectory {
    pub fn new(entries: Vec<Recipient>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{ "name", "bank", "account" }` objects.
    pub fn from_json(json: &str) -> FlowResult<Self> {
        serde_json::from_str(json).map_err(|e| FlowError::Directory {
            reason: e.to_string(),
        })
    }

    /// Load a JSON directory file.
    pub fn load(path: &Path) -> FlowResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| FlowError::Directory {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[Recipient] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name or bank contains `query`, ignoring case.
    ///
    /// A blank query returns every entry in directory order.
    pub fn filter(&self, query: &str) -> Vec<&Recipient> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|r| r.matches_lowercase(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> RecipientDirectory {
        RecipientDirectory::new(vec![
            Recipient::new("Alice Chen", "Cathay United Bank", "012-345678"),
            Recipient::new("Bob Lin", "Taishin Bank", "812-000111"),
            Recipient::new("Carol Wu", "E.Sun Bank", "808-222333"),
        ])
    }

    #[test]
    fn test_derived_fields() {
        let r = Recipient::new("Alice", "ABC", "123");
        assert_eq!(r.avatar(), "A");
        assert_eq!(r.account_line(), "ABC 123");

        let unicode = Recipient::new("王小明", "國泰世華", "013");
        assert_eq!(unicode.avatar(), "王");

        assert_eq!(Recipient::new("", "X", "1").avatar(), "");
    }

    #[test]
    fn test_filter_blank_returns_all() {
        let dir = directory();
        assert_eq!(dir.filter("").len(), 3);
        assert_eq!(dir.filter("   ").len(), 3);
    }

    #[test]
    fn test_filter_by_name_and_bank_case_insensitive() {
        let dir = directory();

        let by_name: Vec<_> = dir.filter("BOB").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(by_name, vec!["Bob Lin"]);

        let by_bank: Vec<_> = dir.filter("bank").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(by_bank.len(), 3);

        let by_bank: Vec<_> = dir.filter("e.sun").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(by_bank, vec!["Carol Wu"]);

        assert!(dir.filter("zzz").is_empty());
    }

    #[test]
    fn test_from_json() {
        let dir = RecipientDirectory::from_json(
            r#"[{"name":"Alice","bank":"ABC","account":"123"}]"#,
        )
        .unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.entries()[0], Recipient::new("Alice", "ABC", "123"));

        let err = RecipientDirectory::from_json("{not json").unwrap_err();
        assert!(matches!(err, FlowError::Directory { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        std::fs::write(&path, r#"[{"name":"Bob","bank":"XYZ","account":"9"}]"#).unwrap();

        let loaded = RecipientDirectory::load(&path).unwrap();
        assert_eq!(loaded.filter("xyz").len(), 1);

        let missing = RecipientDirectory::load(&dir.path().join("missing.json"));
        assert!(missing.is_err());
    }
}
