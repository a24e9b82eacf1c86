//! Static software catalog.
//!
//! Maps a software identifier and version string to a downloadable artifact.
//! The catalog is pure data: lookups are synchronous, side-effect free, and
//! absence of an entry is an expected "not offered" state rather than an
//! error. The orchestrator never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::install::InstallKey;

const MIB: u64 = 1024 * 1024;

/// Whether a downloaded artifact is used directly or must be unpacked first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A ready-to-run server jar.
    Direct,
    /// An installer bundle that must be decompressed on the server.
    Archive,
}

/// Software identifiers whose artifacts ship as installer archives.
const ARCHIVE_KIND_SOFTWARES: &[&str] = &["forge", "neoforge"];

impl ArtifactKind {
    /// Derive the artifact kind from a software identifier.
    #[must_use]
    pub fn for_software(software: &str) -> Self {
        if ARCHIVE_KIND_SOFTWARES.contains(&software) {
            Self::Archive
        } else {
            Self::Direct
        }
    }

    /// Whether this kind requires a decompress step after the pull.
    #[must_use]
    pub const fn is_archive(&self) -> bool {
        matches!(self, Self::Archive)
    }

    /// String representation for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Archive => "archive",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display category of a software distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Plain Minecraft server software.
    Minecraft,
    /// Mod-loader platforms.
    Modded,
    /// Network proxies.
    Proxy,
}

impl Category {
    /// String representation for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minecraft => "minecraft",
            Self::Modded => "modded",
            Self::Proxy => "proxy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One software distribution offered by the catalog.
#[derive(Debug)]
pub struct Software {
    /// Stable identifier (e.g., "paper").
    pub id: &'static str,
    /// Display name (e.g., "Paper").
    pub name: &'static str,
    /// One-line description for selection UIs.
    pub description: &'static str,
    /// Display category.
    pub category: Category,
    /// Offered versions, newest first.
    pub versions: &'static [&'static str],
    /// Approximate artifact size, used only for simulated progress.
    pub approx_size: u64,
    /// Per-version pinned artifact URLs. When non-empty this table is
    /// authoritative: a listed version with no pinned URL is not offered.
    pub pinned_urls: &'static [(&'static str, &'static str)],
}

/// Mohist builds are content-addressed on the mirror, so every version pins
/// its own URL instead of following the template.
const MOHIST_URLS: &[(&str, &str)] = &[
    (
        "1.20.2",
        "https://s3.mcjars.app/mohist/1.20.2/1.20.2-1b280342/server.jar",
    ),
    (
        "1.20.1",
        "https://s3.mcjars.app/mohist/1.20.1/1.20.1-b562929a/server.jar",
    ),
    (
        "1.19.4",
        "https://s3.mcjars.app/mohist/1.19.4/1.19.4-c1f9ddbf/server.jar",
    ),
    (
        "1.19.2",
        "https://s3.mcjars.app/mohist/1.19.2/1.19.2-acf34325/server.jar",
    ),
    (
        "1.18.2",
        "https://s3.mcjars.app/mohist/1.18.2/1.18.2-ffc4df93/server.jar",
    ),
    (
        "1.16.5",
        "https://s3.mcjars.app/mohist/1.16.5/1.16.5-044418da/server.jar",
    ),
    (
        "1.12.2",
        "https://s3.mcjars.app/mohist/1.12.2/1.12.2-2bfa4f6d/server.jar",
    ),
    (
        "1.7.10",
        "https://s3.mcjars.app/mohist/1.7.10/1.7.10-de68ad73/server.jar",
    ),
];

/// The built-in software table.
const SOFTWARES: &[Software] = &[
    Software {
        id: "paper",
        name: "Paper",
        description: "High performance Minecraft server with plugin support",
        category: Category::Minecraft,
        versions: &["1.21.8", "1.21.7", "1.21.4", "1.20.6", "1.20.4", "1.19.4"],
        approx_size: 50 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "purpur",
        name: "Purpur",
        description: "Feature-rich Paper fork with extensive customization",
        category: Category::Minecraft,
        versions: &["1.21.8", "1.21.4", "1.20.6", "1.20.4", "1.19.4"],
        approx_size: 55 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "archlight",
        name: "Archlight",
        description: "Minecraft server software with advanced optimization features",
        category: Category::Minecraft,
        versions: &["1.21.4", "1.20.4", "1.20.1", "1.19.4"],
        approx_size: 70 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "forge",
        name: "Forge",
        description: "Minecraft modding platform with extensive mod compatibility",
        category: Category::Modded,
        versions: &["1.21.8", "1.21.4", "1.20.4", "1.19.2", "1.18.2"],
        approx_size: 120 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "neoforge",
        name: "NeoForge",
        description: "Modern modding platform forked from Forge",
        category: Category::Modded,
        versions: &["1.21.8", "1.21.4", "1.20.6", "1.20.4"],
        approx_size: 130 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "fabric",
        name: "Fabric",
        description: "Lightweight and fast modding toolchain",
        category: Category::Modded,
        versions: &["1.21.8", "1.21.4", "1.20.6", "1.20.4", "1.19.4"],
        approx_size: 20 * MIB,
        pinned_urls: &[],
    },
    Software {
        id: "mohist",
        name: "Mohist",
        description: "Hybrid server combining Forge mods with Bukkit plugins",
        category: Category::Modded,
        versions: &[
            "1.20.2", "1.20.1", "1.19.4", "1.19.2", "1.18.2", "1.16.5", "1.12.2", "1.7.10",
        ],
        approx_size: 90 * MIB,
        pinned_urls: MOHIST_URLS,
    },
    Software {
        id: "velocity",
        name: "Velocity",
        description: "Next-generation Minecraft proxy",
        category: Category::Proxy,
        versions: &["3.3.0", "3.2.0", "3.1.2", "3.0.1"],
        approx_size: 35 * MIB,
        pinned_urls: &[],
    },
];

impl Software {
    /// Artifact kind for this software.
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        ArtifactKind::for_software(self.id)
    }

    /// Resolve the artifact URL for one of this software's versions.
    ///
    /// Returns `None` for versions that are not offered.
    #[must_use]
    pub fn artifact_url(&self, version: &str) -> Option<String> {
        if !self.versions.contains(&version) {
            return None;
        }

        if !self.pinned_urls.is_empty() {
            return self
                .pinned_urls
                .iter()
                .find(|(v, _)| *v == version)
                .map(|(_, url)| (*url).to_string());
        }

        let filename = match self.kind() {
            ArtifactKind::Direct => "server.jar",
            ArtifactKind::Archive => "bundle.zip",
        };
        Some(format!(
            "https://s3.mcjars.app/{}/{}/{}",
            self.id, version, filename
        ))
    }
}

/// A resolved catalog entry: everything the orchestrator needs for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Software identifier.
    pub software: String,
    /// Version string.
    pub version: String,
    /// Absolute artifact URL.
    pub artifact_url: String,
    /// Whether the artifact needs a decompress step.
    pub kind: ArtifactKind,
    /// Approximate artifact size for simulated progress.
    pub approx_size: u64,
}

impl CatalogEntry {
    /// The install key identifying a run for this entry.
    #[must_use]
    pub fn key(&self) -> InstallKey {
        InstallKey::new(&self.software, &self.version)
    }
}

/// Read-only lookup over a static software table.
#[derive(Clone, Copy, Debug)]
pub struct SoftwareCatalog {
    softwares: &'static [Software],
}

impl SoftwareCatalog {
    /// Catalog over a caller-provided static table (for tests).
    #[must_use]
    pub const fn new(softwares: &'static [Software]) -> Self {
        Self { softwares }
    }

    /// The built-in catalog.
    #[must_use]
    pub const fn builtin() -> Self {
        Self::new(SOFTWARES)
    }

    /// All offered softwares, in display order.
    #[must_use]
    pub const fn softwares(&self) -> &'static [Software] {
        self.softwares
    }

    /// Look up a software by identifier.
    #[must_use]
    pub fn get(&self, software: &str) -> Option<&'static Software> {
        self.softwares.iter().find(|s| s.id == software)
    }

    /// Resolve a `(software, version)` pair to a catalog entry.
    ///
    /// `None` means "not offered", which is an expected state.
    #[must_use]
    pub fn resolve(&self, software: &str, version: &str) -> Option<CatalogEntry> {
        let entry = self.get(software)?;
        let artifact_url = entry.artifact_url(version)?;

        Some(CatalogEntry {
            software: entry.id.to_string(),
            version: version.to_string(),
            artifact_url,
            kind: entry.kind(),
            approx_size: entry.approx_size,
        })
    }
}

impl Default for SoftwareCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
