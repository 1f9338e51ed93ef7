use serde::{Deserialize, Serialize};

/// Configuration from larder.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Document file, relative to larder.toml
    #[serde(default = "default_list_file")]
    pub file: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            file: default_list_file(),
        }
    }
}

fn default_list_file() -> String {
    "list.json".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub policy: MergePolicy,
}

/// How a duplicate's quantity folds into the existing item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Add amounts when the unit words match, join the texts otherwise
    #[default]
    Sum,
    /// Always join the texts
    Concat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.list.file, "list.json");
        assert_eq!(config.merge.policy, MergePolicy::Sum);
    }

    #[test]
    fn test_explicit_policy() {
        let config: AppConfig = toml::from_str(
            r#"
[list]
file = "groceries.json"

[merge]
policy = "concat"
"#,
        )
        .unwrap();
        assert_eq!(config.list.file, "groceries.json");
        assert_eq!(config.merge.policy, MergePolicy::Concat);
    }
}
