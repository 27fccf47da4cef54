use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

#[derive(Error, Debug)]
pub enum TransformError {
    /// Missing token or mapping file, malformed mapping entry.
    #[error(transparent)]
    Config(#[from] imt_core::Error),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("{stage} is enabled but no collaborator is registered for it")]
    MissingCollaborator { stage: &'static str },

    #[error("parse error: {message}")]
    Parse { message: String, dump: String },

    #[error("{stage} failed: {message}")]
    Stage {
        stage: &'static str,
        message: String,
        dump: String,
    },

    #[error("code generation failed: {0}")]
    Codegen(#[from] std::io::Error),
}

impl TransformError {
    pub fn stage(stage: &'static str, err: anyhow::Error) -> Self {
        Self::Stage {
            stage,
            message: format!("{err:#}"),
            dump: format!("{err:#?}"),
        }
    }

    /// Structural detail of the failure, when there is any beyond the message.
    pub fn dump(&self) -> Option<&str> {
        match self {
            Self::Parse { dump, .. } | Self::Stage { dump, .. } => Some(dump),
            _ => None,
        }
    }
}
