//! Sutu Assets - Photoshop brush (ABR) and layer style (ASL) preset decoding
//!
//! Parsers take an in-memory buffer and never fail outright: every problem
//! found in the data is reported as a warning next to whatever could be
//! decoded. The [`import`] module adds file loading and frontend payloads.

pub mod abr;
pub mod asl;
pub mod binary;
pub mod descriptor;
pub mod error;
pub mod ids;
pub mod import;
pub mod options;

#[cfg(test)]
mod test_support;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use abr::{AbrParseResult, AbrParser, BrushPreset};
pub use asl::{AslParseResult, AslParser, LayerEffect, LayerStylePreset};
pub use error::{DecodeError, ImportError};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use options::ParseOptions;

/// Initialize logging. `RUST_LOG` overrides `default_filter`.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging(default_filter: &str) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_ok() {
        tracing::debug!("sutu-assets logging initialized");
    }
}

/// Record a parse warning and log it
pub(crate) fn push_warning(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{}", message);
    warnings.push(message);
}
