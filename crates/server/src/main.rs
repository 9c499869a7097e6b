use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use galedb_common::{DEFAULT_HOST, DEFAULT_PORT, MAX_CONNECTIONS};
use galedb_server::{Connection, handle_connection};
use galedb_storage::Db;

#[derive(Parser, Debug)]
#[command(name = "galedb-server", about = "GaleDB — in-memory multi-type data store")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    #[arg(long, default_value_t = MAX_CONNECTIONS)]
    max_connections: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "galedb_server=info".into()),
        )
        .init();

    let args = Args::parse();

    // Pool fixo de workers: no mínimo 2, senão o paralelismo do hardware
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(2);

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?
        .block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let addr = format!("{}:{}", args.host, args.port);
    let db = Db::new();

    // Falha de bind encerra o processo, sem retry
    let listener = TcpListener::bind(&addr).await?;
    info!("GaleDB escutando em {addr}");

    let semaphore = std::sync::Arc::new(tokio::sync::Semaphore::new(args.max_connections));
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    loop {
        let permit = tokio::select! {
            permit = semaphore.clone().acquire_owned() => permit.unwrap(),
            _ = signal::ctrl_c() => {
                info!("shutdown signal recebido");
                drop(shutdown_tx);
                break;
            }
        };

        let (socket, addr) = tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok(v) => v,
                    Err(e) => {
                        error!("erro ao aceitar conexão: {e}");
                        continue;
                    }
                }
            }
            _ = signal::ctrl_c() => {
                info!("shutdown signal recebido");
                drop(shutdown_tx);
                break;
            }
        };

        info!("nova conexão: {addr}");
        let db = db.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();

        // A task é dona da Connection: ela vive enquanto houver leitura ou
        // escrita pendente desta sessão, e morre junto com o socket
        tokio::spawn(async move {
            let conn = Connection::new(socket);
            if let Err(e) = handle_connection(conn, db, &mut shutdown_rx).await {
                error!("erro na conexão {addr}: {e}");
            }
            info!("conexão encerrada: {addr}");
            drop(permit);
        });
    }

    Ok(())
}
