use galedb_common::CommandError;

/// Enum com todos os comandos suportados.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ping,
    Set { key: String, value: String },
    Get(String),
    Del(String),
    LPush { key: String, values: Vec<String> },
    RPush { key: String, values: Vec<String> },
    LPop(String),
    RPop(String),
    LRange { key: String, start: i64, stop: i64 },
    HSet { key: String, field: String, value: String },
    HGet { key: String, field: String },
    HDel { key: String, field: String },
    HGetAll(String),
    SAdd { key: String, members: Vec<String> },
    SRem { key: String, members: Vec<String> },
    SIsMember { key: String, member: String },
    SMembers(String),
    Exists(String),
    Expire { key: String, seconds: u64 },
    Ttl(String),
    Type(String),
}

impl Command {
    /// Faz o parse de uma linha já tokenizada em um Command.
    ///
    /// Nomes de comando são case-insensitive. A aridade mínima é validada
    /// aqui, antes de qualquer acesso ao store; argumentos numéricos são
    /// parseados estritamente.
    pub fn from_tokens(tokens: &[String]) -> Result<Command, CommandError> {
        let Some((name, args)) = tokens.split_first() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let cmd = match name.to_uppercase().as_str() {
            "PING" => Command::Ping,
            "SET" => {
                require(args, 2, "SET <key> <value>")?;
                Command::Set {
                    key: args[0].clone(),
                    value: args[1].clone(),
                }
            }
            "GET" => {
                require(args, 1, "GET <key>")?;
                Command::Get(args[0].clone())
            }
            "DEL" => {
                require(args, 1, "DEL <key>")?;
                Command::Del(args[0].clone())
            }
            "LPUSH" => {
                require(args, 2, "LPUSH <key> <value...>")?;
                Command::LPush {
                    key: args[0].clone(),
                    values: args[1..].to_vec(),
                }
            }
            "RPUSH" => {
                require(args, 2, "RPUSH <key> <value...>")?;
                Command::RPush {
                    key: args[0].clone(),
                    values: args[1..].to_vec(),
                }
            }
            "LPOP" => {
                require(args, 1, "LPOP <key>")?;
                Command::LPop(args[0].clone())
            }
            "RPOP" => {
                require(args, 1, "RPOP <key>")?;
                Command::RPop(args[0].clone())
            }
            "LRANGE" => {
                require(args, 3, "LRANGE <key> <start> <stop>")?;
                Command::LRange {
                    key: args[0].clone(),
                    start: parse_i64(&args[1])?,
                    stop: parse_i64(&args[2])?,
                }
            }
            "HSET" => {
                require(args, 3, "HSET <key> <field> <value>")?;
                Command::HSet {
                    key: args[0].clone(),
                    field: args[1].clone(),
                    value: args[2].clone(),
                }
            }
            "HGET" => {
                require(args, 2, "HGET <key> <field>")?;
                Command::HGet {
                    key: args[0].clone(),
                    field: args[1].clone(),
                }
            }
            "HDEL" => {
                require(args, 2, "HDEL <key> <field>")?;
                Command::HDel {
                    key: args[0].clone(),
                    field: args[1].clone(),
                }
            }
            "HGETALL" => {
                require(args, 1, "HGETALL <key>")?;
                Command::HGetAll(args[0].clone())
            }
            "SADD" => {
                require(args, 2, "SADD <key> <member...>")?;
                Command::SAdd {
                    key: args[0].clone(),
                    members: args[1..].to_vec(),
                }
            }
            "SREM" => {
                require(args, 2, "SREM <key> <member...>")?;
                Command::SRem {
                    key: args[0].clone(),
                    members: args[1..].to_vec(),
                }
            }
            "SISMEMBER" => {
                require(args, 2, "SISMEMBER <key> <member>")?;
                Command::SIsMember {
                    key: args[0].clone(),
                    member: args[1].clone(),
                }
            }
            "SMEMBERS" => {
                require(args, 1, "SMEMBERS <key>")?;
                Command::SMembers(args[0].clone())
            }
            "EXISTS" => {
                require(args, 1, "EXISTS <key>")?;
                Command::Exists(args[0].clone())
            }
            "EXPIRE" => {
                require(args, 2, "EXPIRE <key> <seconds>")?;
                Command::Expire {
                    key: args[0].clone(),
                    seconds: parse_u64(&args[1])?,
                }
            }
            "TTL" => {
                require(args, 1, "TTL <key>")?;
                Command::Ttl(args[0].clone())
            }
            "TYPE" => {
                require(args, 1, "TYPE <key>")?;
                Command::Type(args[0].clone())
            }
            // Nome reportado como o cliente digitou
            _ => return Err(CommandError::Unknown(name.clone())),
        };

        Ok(cmd)
    }
}

fn require(args: &[String], min: usize, usage: &'static str) -> Result<(), CommandError> {
    if args.len() < min {
        return Err(CommandError::Usage(usage));
    }
    Ok(())
}

fn parse_i64(token: &str) -> Result<i64, CommandError> {
    token
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidInteger(token.to_string()))
}

// EXPIRE exige seconds >= 0; o parse unsigned rejeita negativos de graça.
fn parse_u64(token: &str) -> Result<u64, CommandError> {
    token
        .parse::<u64>()
        .map_err(|_| CommandError::InvalidInteger(token.to_string()))
}
