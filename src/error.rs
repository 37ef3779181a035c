use thiserror::Error;

/// Errors raised while loading, validating or exporting a sheet
#[derive(Debug, Error)]
pub enum SheetError {
    /// A committed housekeeper number is already held by another row
    #[error("housekeeper number {0} is already in use")]
    DuplicateNumber(String),

    /// The editor's name is required before the sheet can be submitted
    #[error("submitter name is required")]
    MissingSubmitter,

    /// Bulk floor operations need a floor to work on
    #[error("floor number is required")]
    MissingFloor,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetError {
    /// Validation errors are recoverable by the user re-entering a field
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SheetError::DuplicateNumber(_) | SheetError::MissingSubmitter | SheetError::MissingFloor
        )
    }
}

/// Advisory conditions the user may confirm and continue past
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SheetWarning {
    DuplicateName(String),
}

impl std::fmt::Display for SheetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetWarning::DuplicateName(name) => {
                write!(f, "the name {} is entered more than once", name)
            }
        }
    }
}
