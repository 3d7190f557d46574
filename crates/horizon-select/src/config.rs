//! Declarative combobox configuration.
//!
//! A [`SelectConfig`] describes everything about a combobox that is plain
//! data: the candidate options, the mode, the initial selection and a few
//! presentational settings. Callbacks and render overrides are closures and
//! are attached in code after [`SelectConfig::build`].
//!
//! # Example
//!
//! ```
//! use horizon_select::SelectConfig;
//!
//! let config = SelectConfig::from_toml_str(r#"
//!     multiple = true
//!     placeholder = "Assign people"
//!     value = [2]
//!
//!     [[options]]
//!     id = 1
//!     name = "Alice"
//!
//!     [[options]]
//!     id = 2
//!     name = "Bob"
//!     status = "paused"
//! "#).unwrap();
//!
//! let select = config.build().unwrap();
//! assert!(select.is_multiple());
//! assert_eq!(select.selected().len(), 1);
//! ```

use std::collections::HashSet;
use std::path::Path;

use horizon_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::any::AnySelect;
use crate::error::{ConfigError, ConfigResult};
use crate::mode::{Multiple, SelectionMode, Single};
use crate::option::{OptionId, SelectOption};
use crate::select::{Select, DEFAULT_MAX_VISIBLE_ITEMS};

/// Plain-data description of a combobox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Multiple selection instead of single.
    pub multiple: bool,
    /// Ids of the initially selected options.
    pub value: Vec<OptionId>,
    /// Text shown in the empty search field.
    pub placeholder: String,
    /// Draw the widget in its error state.
    pub error: bool,
    /// Rows shown before the popover scrolls.
    pub max_visible_items: usize,
    /// Candidate options. Stays the last field: TOML tables follow plain keys.
    pub options: Vec<SelectOption>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            value: Vec::new(),
            placeholder: String::new(),
            error: false,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            options: Vec::new(),
        }
    }
}

impl SelectConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading select config");
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(ConfigError::DuplicateOptionId(option.id));
            }
            if option.name.is_empty() {
                return Err(ConfigError::EmptyOptionName(option.id));
            }
        }

        if let Some(unknown) = self.value.iter().find(|id| !seen.contains(*id)) {
            return Err(ConfigError::UnknownValueId(*unknown));
        }

        if !self.multiple && self.value.len() > 1 {
            return Err(ConfigError::TooManyValues {
                count: self.value.len(),
            });
        }
        Ok(())
    }

    /// Validate and build the combobox described by this configuration.
    pub fn build(&self) -> ConfigResult<AnySelect> {
        self.validate()?;
        tracing::debug!(
            target: targets::CONFIG,
            options = self.options.len(),
            multiple = self.multiple,
            "building select from config"
        );

        Ok(if self.multiple {
            AnySelect::Multiple(self.build_typed::<Multiple>())
        } else {
            AnySelect::Single(self.build_typed::<Single>())
        })
    }

    fn build_typed<M: SelectionMode>(&self) -> Select<M> {
        let selected: Vec<SelectOption> = self
            .value
            .iter()
            .filter_map(|id| self.options.iter().find(|option| option.id == *id))
            .cloned()
            .collect();

        Select::<M>::new(self.options.clone())
            .with_value(M::from_selected(selected))
            .with_placeholder(self.placeholder.clone())
            .with_error(self.error)
            .with_max_visible_items(self.max_visible_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionStatus;

    const PEOPLE: &str = r#"
        placeholder = "Pick someone"

        [[options]]
        id = 1
        name = "Alice"
        detail = "alice@example.com"

        [[options]]
        id = 2
        name = "Bob"
        status = "paused"
    "#;

    #[test]
    fn test_parse_defaults() {
        let config = SelectConfig::from_toml_str(PEOPLE).unwrap();
        assert!(!config.multiple);
        assert!(config.value.is_empty());
        assert!(!config.error);
        assert_eq!(config.max_visible_items, DEFAULT_MAX_VISIBLE_ITEMS);
        assert_eq!(config.placeholder, "Pick someone");
        assert_eq!(config.options.len(), 2);
        assert_eq!(config.options[1].status, OptionStatus::Paused);
        assert_eq!(config.options[0].detail.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_parse_error() {
        let err = SelectConfig::from_toml_str("multiple = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let config = SelectConfig {
            options: vec![SelectOption::new(1, "A"), SelectOption::new(1, "B")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateOptionId(OptionId(1)))
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let config = SelectConfig {
            options: vec![SelectOption::new(5, "")],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyOptionName(OptionId(5)))
        ));
    }

    #[test]
    fn test_unknown_value_rejected() {
        let config = SelectConfig {
            options: vec![SelectOption::new(1, "A")],
            value: vec![OptionId(2)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownValueId(OptionId(2)))
        ));
    }

    #[test]
    fn test_single_mode_accepts_one_value() {
        let mut config = SelectConfig {
            options: vec![SelectOption::new(1, "A"), SelectOption::new(2, "B")],
            value: vec![OptionId(1), OptionId(2)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyValues { count: 2 })
        ));

        config.multiple = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_single_syncs_text() {
        let mut config = SelectConfig::from_toml_str(PEOPLE).unwrap();
        config.value = vec![OptionId(1)];

        let select = config.build().unwrap();
        assert!(!select.is_multiple());
        assert_eq!(select.input_text(), "Alice");
        assert_eq!(select.placeholder(), "Pick someone");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SelectConfig::from_toml_str(PEOPLE).unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SelectConfig::from_toml_str(&text).unwrap(), config);
    }
}
