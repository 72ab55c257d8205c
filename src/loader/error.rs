//! Error types for module acquisition.

/// Why the render module could not be loaded. All variants are non-fatal to
/// the host: the failure is reported and the process keeps running with no
/// capability installed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("engine creation failed: {0}")]
    EngineCreation(String),
    #[error("component compilation failed: {0}")]
    Compilation(String),
    #[error("instantiation failed: {0}")]
    Instantiation(String),
    #[error("module has no 'render' export")]
    MissingExport,
    #[error("load task failed: {0}")]
    Task(String),
}
