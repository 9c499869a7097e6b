use bytes::{BufMut, BytesMut};

use crate::line::LINE_TERMINATOR;

/// Resposta de uma linha enviada ao cliente.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Mutação bem-sucedida.
    Ok,
    /// Operação booleana que não se aplicou (chave ausente, tipo errado).
    Error,
    Pong,
    /// Valor ausente.
    Null,
    NotExists,
    /// Contagens, comprimentos e TTLs.
    Integer(i64),
    /// Valor único.
    Value(String),
    /// Resultados multi-valor, separados por espaço (pode ser vazio).
    Values(Vec<String>),
    /// Texto literal: usage, comando desconhecido, inteiro inválido.
    Message(String),
}

impl Reply {
    /// Encoda a resposta como uma linha de texto terminada pelo protocolo.
    pub fn encode(&self, dst: &mut BytesMut) {
        match self {
            Reply::Ok => dst.put(&b"OK"[..]),
            Reply::Error => dst.put(&b"ERROR"[..]),
            Reply::Pong => dst.put(&b"PONG"[..]),
            Reply::Null => dst.put(&b"NULL"[..]),
            Reply::NotExists => dst.put(&b"NOT EXISTS"[..]),
            Reply::Integer(n) => dst.put(n.to_string().as_bytes()),
            Reply::Value(v) => dst.put(v.as_bytes()),
            Reply::Values(vs) => dst.put(vs.join(" ").as_bytes()),
            Reply::Message(m) => dst.put(m.as_bytes()),
        }
        dst.put(LINE_TERMINATOR.as_bytes());
    }
}
