use bytes::BytesMut;
use galedb_common::{MAX_LINE_SIZE, ProtocolError};

/// Prompt enviado ao cliente na conexão e após cada resposta.
pub const PROMPT: &str = "> ";

/// Terminador anexado a toda resposta.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Extrai a próxima linha completa do buffer de leitura, consumindo o
/// delimitador. Comandos são delimitados por `\n` ou `\r\n` — o primeiro
/// `\n` fecha a linha, e um `\r` imediatamente anterior pertence ao
/// delimitador. Retorna `Ok(None)` enquanto nenhuma linha completa chegou.
pub fn extract_line(buf: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
    let Some(nl) = buf.iter().position(|&b| b == b'\n') else {
        // Sem delimitador: limitar o quanto um cliente pode acumular
        if buf.len() > MAX_LINE_SIZE {
            return Err(ProtocolError::LineTooLarge(buf.len()));
        }
        return Ok(None);
    };

    let end = if nl > 0 && buf[nl - 1] == b'\r' { nl - 1 } else { nl };
    if end > MAX_LINE_SIZE {
        return Err(ProtocolError::LineTooLarge(end));
    }

    let raw = buf.split_to(nl + 1);
    let line = std::str::from_utf8(&raw[..end])
        .map_err(|e| ProtocolError::InvalidEncoding(e.to_string()))?;
    Ok(Some(line.to_string()))
}

/// Tokeniza uma linha de comando por whitespace.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
