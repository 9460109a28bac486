use thiserror::Error;

// Failure taxonomy for a generation run. The pipeline is deterministic and
// synchronous, so none of these are transient; a failed run leaves whatever
// the caller already holds untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    // Sizing, noise or terrace parameters rejected before any sampling.
    #[error("invalid terrain configuration: {0}")]
    Configuration(String),

    // Mesh construction attempted against a grid that does not belong to
    // the current configuration.
    #[error("precondition failed: {0}")]
    Precondition(String),

    // Height lookup outside the populated grid.
    #[error("height lookup ({x}, {y}) outside {size}x{size} grid")]
    IndexOutOfRange { x: u32, y: u32, size: u32 },
}
