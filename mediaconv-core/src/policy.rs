//! Extension policy table.
//!
//! Maps a lower-cased file extension to its source category and the target
//! format it is converted into. Both classification (which files become
//! tasks) and dispatch (which fallback chain to run) read from this one table.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// JPEG quality used for every JPEG the backends write.
pub const JPEG_QUALITY: u8 = 95;

/// Audio codec requested from ffmpeg for MP3 extraction.
pub const AUDIO_CODEC: &str = "libmp3lame";

/// Classification of an input file, derived from its extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    StillImageStandard,
    HeicHeif,
    RawCamera,
    VideoContainer,
    Unsupported,
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StillImageStandard => "still image",
            Self::HeicHeif => "HEIC/HEIF",
            Self::RawCamera => "camera RAW",
            Self::VideoContainer => "video",
            Self::Unsupported => "unsupported",
        };
        f.write_str(label)
    }
}

/// Output format of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFormat {
    Png,
    /// Always encoded from an RGB buffer at [`JPEG_QUALITY`].
    Jpeg,
    /// Audio track extracted with [`AUDIO_CODEC`].
    Mp3,
}

impl TargetFormat {
    /// Canonical file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
            Self::Mp3 => "MP3",
        };
        f.write_str(label)
    }
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyRule {
    pub extensions: &'static [&'static str],
    pub category: SourceCategory,
    pub target: TargetFormat,
}

/// Camera RAW extensions recognised by the policy table.
pub const RAW_EXTENSIONS: &[&str] = &["cr2", "nef", "arw", "dng", "orf", "raw", "rw2", "raf", "sr2"];

/// The policy table, in priority order.
pub const POLICY_TABLE: &[PolicyRule] = &[
    PolicyRule {
        extensions: &["jpg", "jpeg"],
        category: SourceCategory::StillImageStandard,
        target: TargetFormat::Png,
    },
    PolicyRule {
        extensions: &["png"],
        category: SourceCategory::StillImageStandard,
        target: TargetFormat::Jpeg,
    },
    PolicyRule {
        extensions: &["heic", "heif"],
        category: SourceCategory::HeicHeif,
        target: TargetFormat::Jpeg,
    },
    PolicyRule {
        extensions: RAW_EXTENSIONS,
        category: SourceCategory::RawCamera,
        target: TargetFormat::Jpeg,
    },
    PolicyRule {
        extensions: &["mp4"],
        category: SourceCategory::VideoContainer,
        target: TargetFormat::Mp3,
    },
];

static RULES_BY_EXTENSION: Lazy<HashMap<&'static str, &'static PolicyRule>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for rule in POLICY_TABLE {
        for ext in rule.extensions {
            // First rule wins, matching table priority.
            map.entry(*ext).or_insert(rule);
        }
    }
    map
});

/// Looks up the rule for an extension (case-insensitive, leading dot optional).
pub fn lookup(extension: &str) -> Option<&'static PolicyRule> {
    let normalized = extension.trim_start_matches('.').to_ascii_lowercase();
    RULES_BY_EXTENSION.get(normalized.as_str()).copied()
}

/// Lower-cased extension of a path, or an empty string when it has none.
pub fn normalized_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Result of classifying one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: SourceCategory,
    pub target: Option<TargetFormat>,
}

/// Classifies a file by its extension.
pub fn classify(path: &Path) -> Classification {
    match lookup(&normalized_extension(path)) {
        Some(rule) => Classification {
            category: rule.category,
            target: Some(rule.target),
        },
        None => Classification {
            category: SourceCategory::Unsupported,
            target: None,
        },
    }
}
