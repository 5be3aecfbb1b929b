//! Lifecycle action errors

use std::path::Path;

use super::BarclampError;

/// Creates an unknown stage error
pub fn unknown_stage(stage: impl Into<String>) -> BarclampError {
    BarclampError::UnknownStage {
        stage: stage.into(),
    }
}

/// Creates an action failed error, pointing at the captured log when one was written
pub fn failed(
    action: &Path,
    package: impl Into<String>,
    output: impl Into<String>,
    log: Option<&Path>,
) -> BarclampError {
    BarclampError::ActionFailed {
        action: action.display().to_string(),
        package: package.into(),
        output: output.into(),
        log_hint: log
            .map(|path| format!(" (examine {} for more info)", path.display()))
            .unwrap_or_default(),
    }
}
