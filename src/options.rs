//! Per-parse configuration

use crate::ids::{IdGenerator, UuidGenerator};

/// Options shared by the ABR and ASL parsers
#[derive(Clone, Copy)]
pub struct ParseOptions<'a> {
    /// Recorded on every preset, e.g. the file path or `memory://abr`
    pub source: &'a str,
    /// Id source for new presets
    pub ids: &'a dyn IdGenerator,
}

impl<'a> ParseOptions<'a> {
    pub fn new(source: &'a str, ids: &'a dyn IdGenerator) -> Self {
        Self { source, ids }
    }
}

impl Default for ParseOptions<'static> {
    fn default() -> Self {
        Self {
            source: "memory",
            ids: &UuidGenerator,
        }
    }
}

impl std::fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
