//! Settings errors.

/// Errors raised while declaring, overriding or updating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A setting with this full name is already declared.
    #[error("setting already declared: {0}")]
    AlreadyDeclared(String),

    /// No setting with this full name exists.
    #[error("unknown setting: {0}")]
    Unknown(String),

    /// The setting does not accept command-line overrides.
    #[error("setting {0} rejects command-line overrides")]
    OverrideRejected(String),

    /// The setting cannot be changed at runtime.
    #[error("setting {0} is immutable")]
    Immutable(String),

    /// An override was not of the form `project_name=value`.
    #[error("malformed override {0:?}, expected project_name=value")]
    MalformedOverride(String),

    /// The value could not be parsed into the setting's type.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// Overrides were already applied to this registry.
    #[error("settings registry already initialized")]
    AlreadyInitialized,
}
