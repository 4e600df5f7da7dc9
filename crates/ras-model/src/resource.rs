//! Resource classes, numeric identifiers and slots.
//!
//! Every file a project references is addressed by a kind letter and a
//! two-digit number: `Muncie.g03` is geometry slot `g03`. Each kind owns its
//! own `01..=99` numbering space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Suffix appended to a resource file name to form its binary sidecar.
pub const SIDECAR_SUFFIX: &str = ".hdf";

/// Header keys that anchor a new geometry reference when the project has none.
pub const GEOMETRY_HEADER_KEYS: &[&str] = &[
    "Proj Title",
    "Current Plan",
    "Default Exp/Contr",
    "English Units",
];

/// A class of numbered project resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Plan,
    Geometry,
    Unsteady,
    Flow,
}

/// Whether copying a resource also copies its `.hdf` sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarPolicy {
    /// The sidecar must exist next to the template.
    Required,
    /// Copied when present, skipped otherwise.
    Optional,
    /// Never copied.
    None,
}

impl ResourceKind {
    /// All kinds in the order they usually appear in a project file.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Geometry,
        ResourceKind::Flow,
        ResourceKind::Plan,
        ResourceKind::Unsteady,
    ];

    /// File extension letter (`p`, `g`, `u`, `f`).
    pub fn letter(self) -> char {
        match self {
            ResourceKind::Plan => 'p',
            ResourceKind::Geometry => 'g',
            ResourceKind::Unsteady => 'u',
            ResourceKind::Flow => 'f',
        }
    }

    /// Key of the reference line in the project file, including `=`.
    pub fn project_key(self) -> &'static str {
        match self {
            ResourceKind::Plan => "Plan File=",
            ResourceKind::Geometry => "Geom File=",
            ResourceKind::Unsteady => "Unsteady File=",
            ResourceKind::Flow => "Flow File=",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Plan => "plan",
            ResourceKind::Geometry => "geometry",
            ResourceKind::Unsteady => "unsteady",
            ResourceKind::Flow => "flow",
        }
    }

    pub fn sidecar_policy(self) -> SidecarPolicy {
        match self {
            ResourceKind::Geometry => SidecarPolicy::Required,
            ResourceKind::Unsteady => SidecarPolicy::Optional,
            ResourceKind::Plan | ResourceKind::Flow => SidecarPolicy::None,
        }
    }

    /// Header keys used to position the first reference of this kind.
    ///
    /// Empty for every kind except geometry; an empty set means the
    /// reference is appended at the end of the document instead.
    pub fn header_anchor_keys(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Geometry => GEOMETRY_HEADER_KEYS,
            _ => &[],
        }
    }

    /// Resolve a kind from its extension letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'p' => Some(ResourceKind::Plan),
            'g' => Some(ResourceKind::Geometry),
            'u' => Some(ResourceKind::Unsteady),
            'f' => Some(ResourceKind::Flow),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plan" | "p" => Ok(ResourceKind::Plan),
            "geometry" | "geom" | "g" => Ok(ResourceKind::Geometry),
            "unsteady" | "u" => Ok(ResourceKind::Unsteady),
            "flow" | "steady" | "f" => Ok(ResourceKind::Flow),
            _ => Err(ModelError::UnknownKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A resource number in `01..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ResourceId(u8);

impl ResourceId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    /// Build an id from a number, rejecting anything outside `01..=99`.
    pub fn new(number: u32) -> Result<Self> {
        if (u32::from(Self::MIN)..=u32::from(Self::MAX)).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(ModelError::invalid_id(number.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Parse the digits of an id, accepting an optional leading kind letter.
    ///
    /// `"3"`, `"03"` and `"g03"` all parse to 3. The letter is not checked
    /// against any kind here; use [`ResourceSlot`] for that.
    pub fn parse_loose(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let digits = trimmed
            .strip_prefix(|ch: char| ch.is_ascii_alphabetic())
            .unwrap_or(trimmed);
        parse_digits(digits).ok_or_else(|| ModelError::invalid_id(value))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_loose(s)
    }
}

impl TryFrom<u8> for ResourceId {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(u32::from(value))
    }
}

impl From<ResourceId> for u8 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

/// A numbered resource of a given kind, e.g. `g03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceSlot {
    pub kind: ResourceKind,
    pub id: ResourceId,
}

impl ResourceSlot {
    pub fn new(kind: ResourceKind, id: ResourceId) -> Self {
        Self { kind, id }
    }

    /// File extension of the resource (without the leading dot).
    pub fn extension(&self) -> String {
        self.to_string()
    }

    /// Parse a slot and require it to be of `kind`.
    ///
    /// A bare number (`"03"`) is accepted and takes the expected kind.
    pub fn parse_as(value: &str, kind: ResourceKind) -> Result<Self> {
        let trimmed = value.trim();
        match trimmed.chars().next() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                let slot: ResourceSlot = trimmed.parse()?;
                if slot.kind == kind {
                    Ok(slot)
                } else {
                    Err(ModelError::invalid_slot(value))
                }
            }
            _ => Ok(Self::new(kind, ResourceId::parse_loose(trimmed)?)),
        }
    }
}

impl fmt::Display for ResourceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.letter(), self.id)
    }
}

impl FromStr for ResourceSlot {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let kind = chars
            .next()
            .and_then(ResourceKind::from_letter)
            .ok_or_else(|| ModelError::invalid_slot(s))?;
        let id = parse_digits(chars.as_str()).ok_or_else(|| ModelError::invalid_slot(s))?;
        Ok(Self::new(kind, id))
    }
}

/// Parse a non-empty run of ASCII digits into an id.
pub(crate) fn parse_digits(digits: &str) -> Option<ResourceId> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u32>()
        .ok()
        .and_then(|number| ResourceId::new(number).ok())
}
