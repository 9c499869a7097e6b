use std::collections::{HashMap, HashSet, VecDeque};
use tokio::time::Instant;

/// Tipo do valor armazenado. Uma chave tem exatamente um tipo; operações
/// de outro tipo falham sem mutar o estado.
#[derive(Debug, Clone)]
pub enum Value {
    Str(String),
    List(VecDeque<String>),
    Hash(HashMap<String, String>),
    Set(HashSet<String>),
}

impl Value {
    /// Nome do tipo como reportado pelo comando TYPE.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Hash(_) => "hash",
            Value::Set(_) => "set",
        }
    }
}

/// Entrada no store: valor + expiração opcional.
#[derive(Debug, Clone)]
pub struct Entry {
    pub value: Value,
    pub expires_at: Option<Instant>,
}

impl Entry {
    pub fn new(value: Value, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|t| Instant::now() >= t)
            .unwrap_or(false)
    }
}
