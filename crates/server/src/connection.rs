use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

use galedb_common::{ConnectionError, INITIAL_BUFFER_CAPACITY};
use galedb_protocol::{PROMPT, Reply, extract_line};

/// Wrapper sobre TcpStream com buffer para o protocolo de linha.
pub struct Connection {
    stream: BufWriter<TcpStream>,
    buffer: BytesMut,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream: BufWriter::new(stream),
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Lê a próxima linha de comando. Linhas completas já no buffer são
    /// servidas antes de tocar o socket, então comandos enviados em lote
    /// não ficam esperando outro evento de leitura. Retorna None no EOF.
    pub async fn read_line(&mut self) -> Result<Option<String>, ConnectionError> {
        loop {
            if let Some(line) = extract_line(&mut self.buffer)? {
                return Ok(Some(line));
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;
            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(ConnectionError::ConnectionReset);
            }
        }
    }

    /// Escreve uma resposta com o terminador do protocolo.
    pub async fn write_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        let mut buf = BytesMut::new();
        reply.encode(&mut buf);
        self.stream.write_all(&buf).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Envia o prompt como uma escrita separada da resposta.
    pub async fn write_prompt(&mut self) -> Result<(), ConnectionError> {
        self.stream.write_all(PROMPT.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }
}
