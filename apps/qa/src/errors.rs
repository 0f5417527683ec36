use thiserror::Error;

/// Errors raised while assembling or rendering the fixture document.
/// Fatal to the render call that raised them; `render` leaves no partial
/// artifact behind on failure.
#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("style role '{0}' is not defined")]
    StyleNotFound(String),

    #[error("style role '{0}' is already defined")]
    DuplicateStyleRole(String),

    #[error("style role '{role}' derives from '{base}', which is not a base role")]
    UnknownBaseRole { role: String, base: String },

    /// The output path could not be written (directory creation or the PDF
    /// save itself failed).
    #[error("render error: {0}")]
    Render(String),
}

/// Errors raised while assembling a check run. Failures *during* a run are
/// never errors — they are folded into per-check results so the run always
/// completes with a summary.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("duplicate check name '{0}'")]
    DuplicateCheckName(String),
}
