/// Errors returned when route parameters cannot produce a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A required parameter is absent or empty.
    #[error("missing required route parameter '{parameter}'")]
    MissingParameter { parameter: &'static str },

    /// The view tag is not one of summary, full, compact, json.
    #[error("unrecognized event view '{view}'")]
    InvalidView { view: String },
}
