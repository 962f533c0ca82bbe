//! Command handlers for CLI subcommands
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

mod check;
mod completions;
mod kinds;
mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use kinds::handle_kinds;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use std::path::Path;

/// Fail with `FileNotFound` before handing a path to the loader
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        tracing::error!(path = %path.display(), "file not found");
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
