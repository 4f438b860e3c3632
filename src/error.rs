use std::path::PathBuf;
use thiserror::Error;

pub type PanelResult<T> = Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("no se pudo leer {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    /// Duración de contrato no convertible a entero en modo estricto.
    #[error("licitación {codigo_externo}: campo {campo} no es entero ({valor})")]
    Duracion {
        codigo_externo: String,
        campo: &'static str,
        valor: String,
    },

    #[error("configuración inválida: {0}")]
    Config(String),

    #[error("filtro inválido: {0}")]
    Filtro(String),
}

impl PanelError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn filtro(message: impl Into<String>) -> Self {
        Self::Filtro(message.into())
    }
}
