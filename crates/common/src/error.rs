/// Erros de framing do protocolo de linha.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("linha excede tamanho máximo ({0} bytes)")]
    LineTooLarge(usize),
    #[error("encoding inválido: {0}")]
    InvalidEncoding(String),
}

/// Erros de armazenamento/engine de dados.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("operação contra chave com tipo errado")]
    WrongType,
}

/// Erros de conexão TCP.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("conexão resetada pelo peer")]
    ConnectionReset,
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Erros de parsing/validação de comandos.
///
/// O `Display` destes erros é exatamente o texto que vai para o cliente:
/// o dispatcher responde violações de uso como linhas literais.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown Command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid Integer: {0}")]
    InvalidInteger(String),
}

/// Erro top-level do GaleDB.
#[derive(Debug, thiserror::Error)]
pub enum GaleError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result type alias.
pub type GaleResult<T> = Result<T, GaleError>;

// Conversão implícita de io::Error → GaleError (via ConnectionError)
impl From<std::io::Error> for GaleError {
    fn from(e: std::io::Error) -> Self {
        GaleError::Connection(ConnectionError::Io(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StorageError::WrongType;
        assert_eq!(err.to_string(), "operação contra chave com tipo errado");
    }

    #[test]
    fn command_error_display_is_wire_text() {
        assert_eq!(
            CommandError::Usage("SET <key> <value>").to_string(),
            "Usage: SET <key> <value>"
        );
        assert_eq!(
            CommandError::Unknown("FOOBAR".into()).to_string(),
            "Unknown Command: FOOBAR"
        );
        assert_eq!(
            CommandError::InvalidInteger("abc".into()).to_string(),
            "Invalid Integer: abc"
        );
    }

    #[test]
    fn gale_error_from_protocol() {
        let err: GaleError = ProtocolError::LineTooLarge(100_000).into();
        assert!(matches!(
            err,
            GaleError::Protocol(ProtocolError::LineTooLarge(100_000))
        ));
    }

    #[test]
    fn gale_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken");
        let err: GaleError = io_err.into();
        assert!(matches!(err, GaleError::Connection(ConnectionError::Io(_))));
    }

    #[test]
    fn connection_error_from_protocol() {
        let err: ConnectionError = ProtocolError::InvalidEncoding("utf-8 inválido".into()).into();
        assert!(matches!(err, ConnectionError::Protocol(_)));
    }
}
