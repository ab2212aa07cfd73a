/// Convenience result type used across ananim.
pub type AnimResult<T> = Result<T, AnimError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum AnimError {
    /// Malformed geometry input (wrong point counts, too many vector components).
    #[error("construction error: {0}")]
    Construction(String),

    /// Missing scene key, path segment or node handle.
    #[error("lookup error: {0}")]
    Lookup(String),

    /// Instruction referenced a missing or non-settable attribute.
    #[error("attribute error: {0}")]
    Attribute(String),

    /// Bezier parameter outside `[0, 1]`.
    #[error("bounds error: {0}")]
    Bounds(String),

    /// Search helper given brackets that do not bracket a sign change or minimum.
    #[error("degenerate bracket: {0}")]
    DegenerateBracket(String),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A scheduled instruction failed; names the instruction and its target.
    #[error("instruction {instruction} ({target}) failed: {source}")]
    Instruction {
        /// Instruction type name, e.g. `MoveTo`.
        instruction: String,
        /// Human readable target description.
        target: String,
        /// Underlying failure.
        #[source]
        source: Box<AnimError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimError {
    /// Build a [`AnimError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`AnimError::Lookup`] value.
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// Build a [`AnimError::Attribute`] value.
    pub fn attribute(msg: impl Into<String>) -> Self {
        Self::Attribute(msg.into())
    }

    /// Build a [`AnimError::Bounds`] value.
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`AnimError::DegenerateBracket`] value.
    pub fn degenerate_bracket(msg: impl Into<String>) -> Self {
        Self::DegenerateBracket(msg.into())
    }

    /// Build a [`AnimError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`AnimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Attach instruction context. Errors that already carry context are returned unchanged so
    /// nested instruction trees report the innermost failing leaf.
    pub fn in_instruction(self, instruction: impl Into<String>, target: impl Into<String>) -> Self {
        match self {
            Self::Instruction { .. } => self,
            other => Self::Instruction {
                instruction: instruction.into(),
                target: target.into(),
                source: Box::new(other),
            },
        }
    }

    /// Innermost error, skipping instruction context wrappers.
    pub fn root_cause(&self) -> &AnimError {
        match self {
            Self::Instruction { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
