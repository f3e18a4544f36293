/// Failure to turn a [`ProgramSource`](super::ProgramSource) into a program.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// WGSL parse or validation failure. `message` carries the annotated
    /// source diagnostic.
    #[error("shader compilation failed:\n{message}")]
    Compile { message: String },

    /// The stages compiled but cannot form a program for this host.
    #[error("shader link failed: {message}")]
    Link { message: String },
}

impl ProgramError {
    pub(crate) fn link(message: impl Into<String>) -> Self {
        Self::Link {
            message: message.into(),
        }
    }
}
