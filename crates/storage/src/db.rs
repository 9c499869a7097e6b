use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::{Duration, Instant};
use tracing::debug;

use galedb_common::StorageError;

use crate::entry::{Entry, Value};

/// Estado compartilhado entre todas as conexões.
struct Shared {
    /// Único lock do processo. Toda operação pública o segura pela duração
    /// inteira — leituras e escritas são tratadas igual, sem distinção
    /// reader/writer, e nenhuma operação atravessa duas aquisições.
    data: Mutex<HashMap<String, Entry>>,
}

/// Handle para o banco de dados in-memory.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn new() -> Self {
        Db {
            shared: Arc::new(Shared {
                data: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn data(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // Nenhuma operação panica com o lock seguro; o mapa permanece
        // consistente, então poisoning é recuperável
        self.shared
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // --- String operations ---

    /// SET incondicional: sobrescreve qualquer tipo e limpa a expiração.
    pub fn set(&self, key: &str, value: &str) {
        let mut data = self.data();
        data.insert(
            key.to_string(),
            Entry::new(Value::Str(value.to_string()), None),
        );
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match &data.get(key)?.value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Remove a chave independente do tipo. Retorna se ela existia.
    pub fn del(&self, key: &str) -> bool {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        data.remove(key).is_some()
    }

    // --- List operations ---

    pub fn lpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        let entry = data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::List(VecDeque::new()), None));

        match &mut entry.value {
            Value::List(list) => {
                // Cada valor entra na cabeça em ordem: o último argumento
                // termina mais próximo da frente
                for v in values {
                    list.push_front(v.clone());
                }
                Ok(list.len())
            }
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn rpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        let entry = data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::List(VecDeque::new()), None));

        match &mut entry.value {
            Value::List(list) => {
                for v in values {
                    list.push_back(v.clone());
                }
                Ok(list.len())
            }
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn lpop(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.list_pop(key, true)
    }

    pub fn rpop(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.list_pop(key, false)
    }

    fn list_pop(&self, key: &str, from_front: bool) -> Result<Option<String>, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);

        let (popped, now_empty) = match data.get_mut(key) {
            None => return Ok(None),
            Some(entry) => match &mut entry.value {
                Value::List(list) => {
                    let v = if from_front {
                        list.pop_front()
                    } else {
                        list.pop_back()
                    };
                    (v, list.is_empty())
                }
                _ => return Err(StorageError::WrongType),
            },
        };

        // Listas nunca persistem vazias
        if now_empty {
            data.remove(key);
        }
        Ok(popped)
    }

    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        let entry = match data.get(key) {
            Some(e) => e,
            None => return Ok(vec![]),
        };

        match &entry.value {
            Value::List(list) => {
                let len = list.len() as i64;
                // Índices negativos contam a partir do fim
                let s = if start < 0 {
                    len.saturating_add(start).max(0)
                } else {
                    start
                };
                let e = if stop < 0 {
                    len.saturating_add(stop).max(0)
                } else {
                    stop
                };

                // Ambos os índices crus negativos e além do início da lista:
                // a translação colapsa ambos em 0, mas o intervalo pedido
                // termina antes do primeiro elemento
                if s == e && start < -len && stop < -len {
                    return Ok(vec![]);
                }
                if s > e || s >= len {
                    return Ok(vec![]);
                }
                let e = e.min(len - 1);
                Ok(list.range(s as usize..=e as usize).cloned().collect())
            }
            _ => Err(StorageError::WrongType),
        }
    }

    // --- Hash operations ---

    pub fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        let entry = data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Hash(HashMap::new()), None));

        match &mut entry.value {
            Value::Hash(map) => {
                map.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(StorageError::WrongType),
        }
    }

    pub fn hget(&self, key: &str, field: &str) -> Option<String> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match &data.get(key)?.value {
            Value::Hash(map) => map.get(field).cloned(),
            _ => None,
        }
    }

    /// Remove um campo. Retorna se ele estava presente.
    pub fn hdel(&self, key: &str, field: &str) -> Result<bool, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get_mut(key) {
            None => Ok(false),
            Some(entry) => match &mut entry.value {
                Value::Hash(map) => Ok(map.remove(field).is_some()),
                _ => Err(StorageError::WrongType),
            },
        }
    }

    /// Mapeamento completo campo → valor; vazio se ausente ou tipo errado.
    pub fn hgetall(&self, key: &str) -> Vec<(String, String)> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get(key).map(|e| &e.value) {
            Some(Value::Hash(map)) => map.iter().map(|(f, v)| (f.clone(), v.clone())).collect(),
            _ => Vec::new(),
        }
    }

    // --- Set operations ---

    /// Insere membros, retornando quantos são novos no conjunto.
    pub fn sadd(&self, key: &str, members: &[String]) -> Result<usize, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        let entry = data
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Value::Set(HashSet::new()), None));

        match &mut entry.value {
            Value::Set(set) => {
                let mut added = 0;
                for m in members {
                    if set.insert(m.clone()) {
                        added += 1;
                    }
                }
                Ok(added)
            }
            _ => Err(StorageError::WrongType),
        }
    }

    /// Remove membros, retornando quantos estavam presentes.
    pub fn srem(&self, key: &str, members: &[String]) -> Result<usize, StorageError> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get_mut(key) {
            None => Ok(0),
            Some(entry) => match &mut entry.value {
                Value::Set(set) => {
                    let mut removed = 0;
                    for m in members {
                        if set.remove(m.as_str()) {
                            removed += 1;
                        }
                    }
                    Ok(removed)
                }
                _ => Err(StorageError::WrongType),
            },
        }
    }

    pub fn sismember(&self, key: &str, member: &str) -> bool {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get(key).map(|e| &e.value) {
            Some(Value::Set(set)) => set.contains(member),
            _ => false,
        }
    }

    pub fn smembers(&self, key: &str) -> Vec<String> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get(key).map(|e| &e.value) {
            Some(Value::Set(set)) => set.iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    // --- Key operations ---

    pub fn exists(&self, key: &str) -> bool {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        data.contains_key(key)
    }

    /// Define a expiração para `now + seconds`, sobrescrevendo a anterior.
    /// Falha se a chave não existe.
    pub fn expire(&self, key: &str, seconds: u64) -> bool {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        match data.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(seconds));
                true
            }
            None => false,
        }
    }

    /// Segundos inteiros restantes até a expiração; -1 se a chave não
    /// expira; -2 se não existe (chave recém-expirada é removida aqui).
    pub fn ttl(&self, key: &str) -> i64 {
        let mut data = self.data();
        let expires_at = match data.get(key) {
            None => return -2,
            Some(entry) => match entry.expires_at {
                None => return -1,
                Some(t) => t,
            },
        };

        let now = Instant::now();
        if now >= expires_at {
            data.remove(key);
            debug!("chave expirada removida: {key}");
            return -2;
        }
        (expires_at - now).as_secs() as i64
    }

    pub fn key_type(&self, key: &str) -> Option<&'static str> {
        let mut data = self.data();
        purge_if_expired(&mut data, key);
        data.get(key).map(|e| e.value.type_name())
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

/// Expiração é estritamente lazy: toda operação purga a chave que vai tocar
/// antes de prosseguir. Não existe varredura em background — chaves
/// expiradas ficam residentes, invisíveis, até o próximo acesso.
fn purge_if_expired(data: &mut HashMap<String, Entry>, key: &str) {
    if let Some(entry) = data.get(key)
        && entry.is_expired()
    {
        data.remove(key);
        debug!("chave expirada removida: {key}");
    }
}
