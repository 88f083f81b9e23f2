use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::compare::{default_categories, Category};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub freeform: Vec<FreeformSectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub only_different: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_format")]
    pub format: String,
}

/// Extra freeform section read from a markdown field of each report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeformSectionConfig {
    pub id: String,
    pub title: String,
    pub field: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub placeholder: Option<String>,
    pub no_color: bool,
    pub only_different: bool,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/settings-compare/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        Self::from_toml(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(placeholder) = overrides.placeholder {
            self.display.placeholder = placeholder;
        }
        if overrides.no_color {
            self.display.color = false;
        }
        if overrides.only_different {
            self.display.only_different = true;
        }
    }

    /// Built-in categories followed by configured freeform sections.
    /// A configured section reusing a built-in id is skipped.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories = default_categories();
        for extra in &self.freeform {
            if categories.iter().any(|c| c.id.eq_ignore_ascii_case(&extra.id)) {
                warn!("ignoring freeform section with duplicate id: {}", extra.id);
                continue;
            }
            categories.push(Category::freeform(&extra.id, &extra.title, &extra.field));
        }
        categories
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[display]
placeholder = "—"
color = true
only_different = false

[output]
format = "table"

# Extra sections parsed from markdown fields of each report.
# [[freeform]]
# id = "proton"
# title = "Proton Notes"
# field = "proton_notes"
"#;
        template.to_string()
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            color: true,
            only_different: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_placeholder() -> String {
    "—".to_string()
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}
