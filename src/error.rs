use crate::resolution::ResolutionFailure;

/// Errors raised while wiring binaries or computing their module maps.
///
/// Every variant aborts the computation that raised it; nothing here is
/// retried or downgraded to a warning.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("could not determine the name of {display_name}: unknown component identifier type: {kind}")]
    UnclassifiableProducer { display_name: String, kind: String },

    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),

    #[error("channel '{name}' is already registered with a different definition")]
    ChannelConflict { name: String },

    #[error("invalid dependency notation '{notation}': {reason}")]
    InvalidDependency { notation: String, reason: String },

    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute { name: String, reason: String },

    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("cannot resolve project root '{path}': {source}")]
    ProjectRoot {
        path: String,
        source: std::io::Error,
    },
}
