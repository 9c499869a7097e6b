use tokio::sync::broadcast;
use tracing::debug;

use galedb_common::ConnectionError;
use galedb_protocol::{Command, Reply, tokenize};
use galedb_storage::Db;

use crate::Connection;

/// Loop principal de tratamento de uma conexão.
///
/// Um comando por vez: a próxima linha só é processada depois que a
/// resposta e o prompt do comando atual foram escritos por completo.
pub async fn handle_connection(
    mut conn: Connection,
    db: Db,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<(), ConnectionError> {
    // Prompt inicial antes do primeiro comando
    conn.write_prompt().await?;

    loop {
        let line = tokio::select! {
            result = conn.read_line() => result?,
            _ = shutdown.recv() => {
                return Ok(());
            }
        };

        let line = match line {
            Some(l) => l,
            None => return Ok(()), // EOF
        };

        let tokens = tokenize(&line);
        if tokens.is_empty() {
            // Linhas em branco são ignoradas sem produzir saída
            continue;
        }

        debug!("comando recebido: {tokens:?}");

        let reply = match Command::from_tokens(&tokens) {
            Ok(cmd) => execute_command(&cmd, &db),
            // O Display do erro é a própria linha de resposta
            Err(e) => Reply::Message(e.to_string()),
        };

        conn.write_reply(&reply).await?;
        conn.write_prompt().await?;
    }
}

/// Executa um comando e retorna a Reply correspondente.
///
/// Type mismatch nunca atravessa como falha: cada família mapeia
/// `StorageError::WrongType` para a sentinela da sua convenção de
/// resposta (0 para contagens, NULL para valores, linha vazia para
/// coleções, ERROR para booleanos).
fn execute_command(cmd: &Command, db: &Db) -> Reply {
    match cmd {
        Command::Ping => Reply::Pong,
        Command::Set { key, value } => {
            db.set(key, value);
            Reply::Ok
        }
        Command::Get(key) => match db.get(key) {
            Some(value) => Reply::Value(value),
            None => Reply::Null,
        },
        Command::Del(key) => {
            if db.del(key) {
                Reply::Ok
            } else {
                Reply::Error
            }
        }
        Command::LPush { key, values } => match db.lpush(key, values) {
            Ok(len) => Reply::Integer(len as i64),
            Err(_) => Reply::Integer(0),
        },
        Command::RPush { key, values } => match db.rpush(key, values) {
            Ok(len) => Reply::Integer(len as i64),
            Err(_) => Reply::Integer(0),
        },
        Command::LPop(key) => match db.lpop(key) {
            Ok(Some(value)) => Reply::Value(value),
            _ => Reply::Null,
        },
        Command::RPop(key) => match db.rpop(key) {
            Ok(Some(value)) => Reply::Value(value),
            _ => Reply::Null,
        },
        Command::LRange { key, start, stop } => match db.lrange(key, *start, *stop) {
            Ok(values) => Reply::Values(values),
            Err(_) => Reply::Values(vec![]),
        },
        Command::HSet { key, field, value } => match db.hset(key, field, value) {
            Ok(()) => Reply::Ok,
            Err(_) => Reply::Error,
        },
        Command::HGet { key, field } => match db.hget(key, field) {
            Some(value) => Reply::Value(value),
            None => Reply::Null,
        },
        Command::HDel { key, field } => match db.hdel(key, field) {
            Ok(true) => Reply::Ok,
            _ => Reply::Error,
        },
        Command::HGetAll(key) => {
            let mut flat = Vec::new();
            for (field, value) in db.hgetall(key) {
                flat.push(field);
                flat.push(value);
            }
            Reply::Values(flat)
        }
        Command::SAdd { key, members } => match db.sadd(key, members) {
            Ok(count) => Reply::Integer(count as i64),
            Err(_) => Reply::Integer(0),
        },
        Command::SRem { key, members } => match db.srem(key, members) {
            Ok(count) => Reply::Integer(count as i64),
            Err(_) => Reply::Integer(0),
        },
        Command::SIsMember { key, member } => {
            if db.sismember(key, member) {
                Reply::Ok
            } else {
                Reply::NotExists
            }
        }
        Command::SMembers(key) => Reply::Values(db.smembers(key)),
        Command::Exists(key) => {
            if db.exists(key) {
                Reply::Ok
            } else {
                Reply::NotExists
            }
        }
        Command::Expire { key, seconds } => {
            if db.expire(key, *seconds) {
                Reply::Ok
            } else {
                Reply::Error
            }
        }
        Command::Ttl(key) => Reply::Integer(db.ttl(key)),
        Command::Type(key) => match db.key_type(key) {
            Some(name) => Reply::Value(name.to_string()),
            None => Reply::Null,
        },
    }
}
