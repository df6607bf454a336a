use thiserror::Error;

/// Failures surfaced by the plotting pipeline.
///
/// Every variant except `CompilationFailed` aborts before any output is
/// written for the failing target. `CompilationFailed` only marks the
/// rendered-document step as failed; markup or tabular files written earlier
/// in the same invocation remain valid.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("option '{option}' has {got} values for {expected} elements")]
    LengthMismatch {
        option: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("no coordinate for node '{0}' and no layout algorithm selected")]
    IncompleteLayout(String),

    #[error("unknown layout algorithm '{0}'")]
    UnknownLayout(String),

    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("unrecognized unit '{0}'")]
    InvalidUnit(String),

    #[error("unsupported output target '{0}'")]
    UnsupportedTarget(String),

    #[error("edge references unknown node '{0}'")]
    UnknownNode(String),

    #[error("graph definition is malformed: {0}")]
    MalformedGraph(String),

    #[error("{program} {status}:\n{log}")]
    CompilationFailed {
        program: String,
        status: String,
        log: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
