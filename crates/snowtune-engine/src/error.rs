use miette::Diagnostic;
use snowtune_params::ParamsError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EngineError {
    #[error("Adversarial ratio {0} is outside [0, 1]")]
    #[diagnostic(
        code(snowtune::engine::invalid_ratio),
        help("pass the adversarial stake as a fraction, e.g. 0.33 for 33%")
    )]
    InvalidRatio(f64),

    #[error("Target epsilon {0} must lie strictly between 0 and 1")]
    #[diagnostic(code(snowtune::engine::invalid_epsilon), help("the canonical target is 1e-9"))]
    InvalidEpsilon(f64),

    #[error("Invalid checker options: {0}")]
    #[diagnostic(code(snowtune::engine::invalid_options))]
    InvalidOptions(String),

    #[error("Parameters not ready for production: {0}")]
    #[diagnostic(code(snowtune::engine::not_production_ready))]
    NotProductionReady(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Params(#[from] ParamsError),
}
