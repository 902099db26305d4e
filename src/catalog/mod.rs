//! Catalog of supported games and their death counter pointer chains

use crate::core::types::{AddressWidth, Offset};
use std::collections::HashSet;
use thiserror::Error;

/// Executable suffix stripped from process names and appended to module names
pub const EXECUTABLE_SUFFIX: &str = ".exe";

/// Catalog construction error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{0} has no offset chain for either address width")]
    NoOffsetChain(String),

    #[error("Process name {0} is listed more than once")]
    DuplicateProcess(String),
}

/// A supported game and where its death counter lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Name shown to readers of the monitor state
    pub name: String,
    /// Process name without the executable suffix, compared case-sensitively
    pub process_name: String,
    pub offsets32: Option<Vec<Offset>>,
    pub offsets64: Option<Vec<Offset>>,
}

impl TargetDescriptor {
    pub fn new(
        name: impl Into<String>,
        process_name: impl Into<String>,
        offsets32: Option<Vec<Offset>>,
        offsets64: Option<Vec<Offset>>,
    ) -> Self {
        TargetDescriptor {
            name: name.into(),
            process_name: process_name.into(),
            offsets32,
            offsets64,
        }
    }

    /// Offset chain for the given width; an empty chain counts as absent
    pub fn offsets_for(&self, width: AddressWidth) -> Option<&[Offset]> {
        let chain = match width {
            AddressWidth::ThirtyTwoBit => self.offsets32.as_deref(),
            AddressWidth::SixtyFourBit => self.offsets64.as_deref(),
        };
        chain.filter(|offsets| !offsets.is_empty())
    }

    /// Image name of the main module, e.g. `DarkSoulsIII.exe`
    pub fn module_name(&self) -> String {
        format!("{}{}", self.process_name, EXECUTABLE_SUFFIX)
    }

    /// Checks a process name as reported by the platform against this target
    pub fn matches_process(&self, reported_name: &str) -> bool {
        strip_executable_suffix(reported_name) == self.process_name
    }
}

/// Strips a trailing `.exe`, if present
pub fn strip_executable_suffix(name: &str) -> &str {
    name.strip_suffix(EXECUTABLE_SUFFIX).unwrap_or(name)
}

/// Immutable, validated set of targets
#[derive(Debug, Clone)]
pub struct Catalog {
    targets: Vec<TargetDescriptor>,
}

impl Catalog {
    /// Builds a catalog, rejecting targets without any chain and duplicate
    /// process names.
    pub fn new(targets: Vec<TargetDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for target in &targets {
            if target.offsets_for(AddressWidth::ThirtyTwoBit).is_none()
                && target.offsets_for(AddressWidth::SixtyFourBit).is_none()
            {
                return Err(CatalogError::NoOffsetChain(target.name.clone()));
            }
            if !seen.insert(target.process_name.as_str()) {
                return Err(CatalogError::DuplicateProcess(target.process_name.clone()));
            }
        }
        Ok(Catalog { targets })
    }

    /// The games shipped with the monitor
    pub fn builtin() -> Self {
        Catalog {
            targets: builtin_targets(),
        }
    }

    /// First target whose process name matches the reported one
    pub fn find_by_process_name(&self, reported_name: &str) -> Option<&TargetDescriptor> {
        self.targets
            .iter()
            .find(|target| target.matches_process(reported_name))
    }

    pub fn targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

fn builtin_targets() -> Vec<TargetDescriptor> {
    vec![
        TargetDescriptor::new("Dark Souls", "DARKSOULS", Some(vec![0xF78700, 0x5C]), None),
        TargetDescriptor::new(
            "Dark Souls II",
            "DarkSoulsII",
            Some(vec![0x1150414, 0x74, 0xB8, 0x34, 0x4, 0x28C, 0x100]),
            Some(vec![0x16148F0, 0xD0, 0x490, 0x104]),
        ),
        TargetDescriptor::new("Dark Souls III", "DarkSoulsIII", None, Some(vec![0x47572B8, 0x98])),
        TargetDescriptor::new(
            "Dark Souls Remastered",
            "DarkSoulsRemastered",
            None,
            Some(vec![0x1C8A530, 0x98]),
        ),
        TargetDescriptor::new("Sekiro", "sekiro", None, Some(vec![0x3D5AAC0, 0x90])),
    ]
}
