//! Validation policy and processing options.
//!
//! Policies are defined in YAML and loaded once per invocation. They
//! control the allowed role set, overlap behavior, and word-count
//! ceilings; they never change mid-run.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Policy governing span validation for one pipeline invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Roles a span may carry (closed set; default: all known roles)
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<Role>,

    /// Whether partially overlapping spans may coexist in the result
    #[serde(default)]
    pub allow_overlap: bool,

    /// Word-count ceiling for roles that are not exempt (default: 8)
    #[serde(default = "default_non_technical_word_limit")]
    pub non_technical_word_limit: usize,

    /// Per-role overrides of the word-count ceiling
    #[serde(default)]
    pub word_limit_overrides: BTreeMap<Role, usize>,

    /// Confidence assigned when the model omits it or sends one
    /// outside [0, 1] (default: 0.5)
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
}

fn default_allowed_roles() -> Vec<Role> {
    Role::ALL.to_vec()
}
fn default_non_technical_word_limit() -> usize {
    8
}
fn default_confidence() -> f64 {
    0.5
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed_roles: default_allowed_roles(),
            allow_overlap: false,
            non_technical_word_limit: default_non_technical_word_limit(),
            word_limit_overrides: BTreeMap::new(),
            default_confidence: default_confidence(),
        }
    }
}

impl ValidationPolicy {
    /// Load a policy from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {}", path.display()))?;

        Self::from_yaml(&content)
    }

    /// Parse a policy from YAML content
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse policy YAML")
    }

    /// Validate the policy definition
    pub fn validate(&self) -> Result<()> {
        if self.allowed_roles.is_empty() {
            anyhow::bail!("Policy must allow at least one role");
        }

        if !(0.0..=1.0).contains(&self.default_confidence) {
            anyhow::bail!(
                "default_confidence must be in [0, 1], got {}",
                self.default_confidence
            );
        }

        if self.non_technical_word_limit == 0 {
            anyhow::bail!("non_technical_word_limit must be at least 1");
        }

        for (role, limit) in &self.word_limit_overrides {
            if *limit == 0 {
                anyhow::bail!("word limit override for role '{}' must be at least 1", role);
            }
        }

        Ok(())
    }

    /// Whether the given role is allowed by this policy
    pub fn allows_role(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// Effective word-count ceiling for a role, if any.
    ///
    /// Exempt roles (technical/style/camera/audio/lighting) are
    /// unbounded. `action` and `environment` descriptions legitimately
    /// need full clauses, so they get a raised floor of 12 words even
    /// when the base limit is lower.
    pub fn word_limit_for(&self, role: Role) -> Option<usize> {
        if role.is_word_limit_exempt() {
            return None;
        }

        let base = self
            .word_limit_overrides
            .get(&role)
            .copied()
            .unwrap_or(self.non_technical_word_limit);

        let limit = match role {
            Role::Action | Role::Environment => base.max(12),
            _ => base,
        };

        Some(limit)
    }
}

/// Per-invocation processing knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Spans below this confidence are dropped (default: 0.0, keep all)
    #[serde(default)]
    pub min_confidence: f64,

    /// Maximum spans in the result; earliest-positioned spans win
    /// (default: 50)
    #[serde(default = "default_max_spans")]
    pub max_spans: usize,

    /// Prompt template version the candidates were produced with;
    /// recorded in trace output for correlation
    #[serde(default = "default_template_version")]
    pub template_version: String,
}

fn default_max_spans() -> usize {
    50
}
fn default_template_version() -> String {
    "v1".to_string()
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            max_spans: default_max_spans(),
            template_version: default_template_version(),
        }
    }
}
