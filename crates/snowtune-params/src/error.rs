use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while resolving, decoding, or finalizing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParamsError {
    #[error("Unknown network `{name}`")]
    #[diagnostic(
        code(snowtune::params::unknown_network),
        help("known networks are: mainnet, testnet, local, benchmark")
    )]
    UnknownNetwork { name: String },

    #[error("Invalid parameter `{field}`: {constraint} (got {value})")]
    #[diagnostic(code(snowtune::params::invalid))]
    InvalidParameters {
        field: &'static str,
        constraint: String,
        value: String,
    },

    #[error("Unknown optimization objective `{0}`")]
    #[diagnostic(
        code(snowtune::params::unknown_objective),
        help("valid objectives are: latency, security, throughput")
    )]
    UnknownObjective(String),

    #[error("Parameter encoding error: {0}")]
    #[diagnostic(code(snowtune::params::encoding))]
    Serialization(String),
}

impl ParamsError {
    pub(crate) fn invalid(
        field: &'static str,
        constraint: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        ParamsError::InvalidParameters {
            field,
            constraint: constraint.into(),
            value: value.to_string(),
        }
    }

    /// Wire name of the offending field, when the error is a validation failure.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ParamsError::InvalidParameters { field, .. } => Some(*field),
            _ => None,
        }
    }
}
