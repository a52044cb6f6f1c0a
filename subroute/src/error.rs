use std::fmt::{Debug, Display};
use std::path::PathBuf;

use arcstr::ArcStr;
use thiserror::Error;
use waygeom::Side;

pub type Result<T> = std::result::Result<T, RoutingError>;

/// The error type returned by every fallible routing operation.
///
/// Wraps an [`ErrorSource`] describing what went wrong,
/// along with a stack of [`ErrorContext`]s describing where it went wrong.
pub struct RoutingError {
    pub(crate) source: ErrorSource,
    pub(crate) context: Vec<ErrorContext>,
}

impl RoutingError {
    pub fn source(&self) -> &ErrorSource {
        &self.source
    }

    /// The context entries attached to this error, innermost first.
    pub fn context(&self) -> &[ErrorContext] {
        &self.context
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Display for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Error:\n{}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for item in self.context.iter() {
                writeln!(f, "\twhile {}", item)?;
            }
        }
        Ok(())
    }
}

impl Debug for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for (i, item) in self.context.iter().enumerate() {
                writeln!(f, "\t{}: {:?}", i, item)?;
            }
        }
        Ok(())
    }
}

impl<T> From<T> for RoutingError
where
    T: Into<ErrorSource>,
{
    fn from(value: T) -> Self {
        Self {
            source: value.into(),
            context: Vec::new(),
        }
    }
}

impl RoutingError {
    pub fn new(source: impl Into<ErrorSource>) -> Self {
        Self {
            source: source.into(),
            context: Vec::new(),
        }
    }

    pub fn from_context(source: impl Into<ErrorSource>, ctx: impl Into<ErrorContext>) -> Self {
        Self {
            source: source.into(),
            context: vec![ctx.into()],
        }
    }

    pub fn with_context(mut self, ctx: impl Into<ErrorContext>) -> Self {
        self.context.push(ctx.into());
        self
    }

    #[inline]
    pub fn into_inner(self) -> ErrorSource {
        self.source
    }
}

#[inline]
pub fn with_err_context<T, E, C>(result: std::result::Result<T, E>, ctx: C) -> Result<T>
where
    C: FnOnce() -> ErrorContext,
    E: Into<RoutingError>,
{
    result.map_err(|err| err.into().with_context(ctx()))
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorContext {
    RouteDirect {
        num_pairs: usize,
    },
    RouteIndirect {
        num_pairs: usize,
    },
    SideRoute {
        side: Side,
        num_ports: usize,
    },
    RoutePair {
        start: ArcStr,
        end: ArcStr,
        start_straight: f64,
        end_straight: f64,
    },
    ReadFile(PathBuf),
    Task(ArcStr),
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ErrorContext::*;
        match self {
            RouteDirect { num_pairs } => write!(f, "routing a direct bundle of {num_pairs} pairs"),
            RouteIndirect { num_pairs } => {
                write!(f, "routing an indirect bundle of {num_pairs} pairs")
            }
            SideRoute { side, num_ports } => {
                write!(f, "routing {num_ports} ports to the {side}")
            }
            RoutePair {
                start,
                end,
                start_straight,
                end_straight,
            } => write!(
                f,
                "routing {start} to {end} (start straight {start_straight}, end straight {end_straight})"
            ),
            ReadFile(path) => write!(f, "reading file {path:?}"),
            Task(task) => write!(f, "{task}"),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorSource {
    #[error("port count mismatch: {ports1} start ports but {ports2} end ports")]
    CountMismatch { ports1: usize, ports2: usize },

    #[error("ports in {set} do not share one orientation: found {first} and {other} degrees")]
    MixedOrientation {
        set: &'static str,
        first: f64,
        other: f64,
    },

    #[error("unsupported orientation pair: start {start} degrees, end {end} degrees")]
    UnsupportedConfiguration { start: f64, end: f64 },

    #[error("internal invariant violated (this is a bug): {0}")]
    InvariantViolation(String),

    #[error("cannot route {start} to {end}: {reason}")]
    RoutingFailure {
        start: ArcStr,
        end: ArcStr,
        reason: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("route from {start} reaches {actual} instead of {expected}")]
    PairingMismatch {
        start: ArcStr,
        expected: ArcStr,
        actual: ArcStr,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing TOML: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("error parsing JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),
}

impl ErrorSource {
    /// A short, stable name for the kind of error.
    pub fn kind(&self) -> &'static str {
        use ErrorSource::*;
        match self {
            CountMismatch { .. } => "CountMismatch",
            MixedOrientation { .. } => "MixedOrientation",
            UnsupportedConfiguration { .. } => "UnsupportedConfiguration",
            InvariantViolation(_) => "InvariantViolation",
            RoutingFailure { .. } => "RoutingFailure",
            InvalidInput(_) => "InvalidInput",
            PairingMismatch { .. } => "PairingMismatch",
            Io(_) => "Io",
            TomlParsing(_) => "TomlParsing",
            JsonParsing(_) => "JsonParsing",
        }
    }
}
