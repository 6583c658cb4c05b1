//! Role taxonomy for labeled spans.
//!
//! Roles form a closed set. Word-limit exemption and merge compatibility
//! are resolved here, once, instead of string prefix checks at run time.

use serde::{Deserialize, Serialize};

/// Category label attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Who or what the text is about
    Subject,

    /// What happens
    Action,

    /// Where it happens
    Environment,

    /// Lighting description
    Lighting,

    /// Camera framing or movement
    Camera,

    /// Sound and music
    Audio,

    /// Overall visual style
    Style,

    /// Technical parameters (resolution, codec, aspect ratio)
    Technical,

    /// Emotional tone
    Mood,
}

/// Parent family of a role, used for merge compatibility and
/// containment-based deduplication.
///
/// Content roles keep their own family: a subject nested inside an
/// action is two distinct claims about the text, not a duplicate.
/// Technical and stylistic roles describe the same production aspect
/// and are routinely fragmented by models, so they share families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    Subject,
    Action,
    Environment,
    /// lighting, camera, audio, technical
    Technical,
    /// style, mood
    Stylistic,
}

impl Role {
    /// All roles, in canonical order
    pub const ALL: [Role; 9] = [
        Role::Subject,
        Role::Action,
        Role::Environment,
        Role::Lighting,
        Role::Camera,
        Role::Audio,
        Role::Style,
        Role::Technical,
        Role::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subject => "subject",
            Role::Action => "action",
            Role::Environment => "environment",
            Role::Lighting => "lighting",
            Role::Camera => "camera",
            Role::Audio => "audio",
            Role::Style => "style",
            Role::Technical => "technical",
            Role::Mood => "mood",
        }
    }

    /// Parse a role name as produced by the model.
    ///
    /// Accepts the canonical names plus a small alias table for labels
    /// models commonly substitute. Matching is case-sensitive on the
    /// trimmed input; mis-cased and unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Role> {
        match name.trim() {
            "subject" => Some(Role::Subject),
            "action" => Some(Role::Action),
            "environment" | "setting" | "scene" => Some(Role::Environment),
            "lighting" => Some(Role::Lighting),
            "camera" | "cinematography" => Some(Role::Camera),
            "audio" | "sound" | "sfx" => Some(Role::Audio),
            "style" | "aesthetic" => Some(Role::Style),
            "technical" => Some(Role::Technical),
            "mood" | "tone" => Some(Role::Mood),
            _ => None,
        }
    }

    /// Parent family for this role
    pub fn family(&self) -> RoleFamily {
        match self {
            Role::Subject => RoleFamily::Subject,
            Role::Action => RoleFamily::Action,
            Role::Environment => RoleFamily::Environment,
            Role::Lighting | Role::Camera | Role::Audio | Role::Technical => RoleFamily::Technical,
            Role::Style | Role::Mood => RoleFamily::Stylistic,
        }
    }

    /// Whether spans with this role are exempt from the word-count ceiling.
    ///
    /// Technical and stylistic descriptions legitimately run long
    /// (camera rigs, codec parameters, lighting setups), so they are
    /// never capped.
    pub fn is_word_limit_exempt(&self) -> bool {
        matches!(
            self,
            Role::Technical | Role::Style | Role::Camera | Role::Audio | Role::Lighting
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
