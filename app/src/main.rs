use app::{
    config::app_config,
    database,
    document,
    modules::carrapato::{
        service::CarrapatoService,
        store::{MongoCarrapatoStore, SeaOrmCarrapatoStore},
    },
    server::controller::{self, AppState},
    utils::errors::ResultExt,
};
use shared::tracer;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

/// resolves once SIGINT or SIGTERM is received
async fn shutdown_signal(mut signals: Signals) {
    let (tx, rx) = oneshot::channel();

    // the signal iterator blocks, so it lives on its own thread
    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let _ = tx.send(sig);
        }
    });

    match rx.await {
        Ok(sig) => info!("[APP] received signal: {}, shutting down", sig),
        Err(_) => std::future::pending::<()>().await,
    }
}

#[tokio::main]
async fn main() {
    let cfg = app_config();

    tracer::init(&cfg.tracer_service_name, cfg.tracer_jaeger_enabled).unwrap_or_exit_process();

    let mongo_client = document::db::create_client(
        &cfg.mongo_connection_string,
        Duration::from_secs(cfg.mongo_server_selection_timeout_secs),
    )
    .await
    .unwrap_or_exit_process();

    let collection = document::db::carrapato_collection(&mongo_client, &cfg.mongo_database_name);
    document::db::ensure_indexes(&collection).await;

    let mongo_store =
        MongoCarrapatoStore::new(mongo_client.database(&cfg.mongo_database_name), collection);

    let db = match &cfg.db_url {
        Some(db_url) => {
            let db = database::db::create_db_conn(db_url)
                .await
                .unwrap_or_exit_process();

            database::db::run_migrations(&db)
                .await
                .unwrap_or_exit_process();

            Some(Arc::new(db))
        }
        None => {
            info!("[DB] DB_URL not set, relational carrapato routes disabled");
            None
        }
    };

    let state = AppState {
        mongo_carrapatos: CarrapatoService::new(Arc::new(mongo_store)),
        relational_carrapatos: db
            .clone()
            .map(|db| CarrapatoService::new(Arc::new(SeaOrmCarrapatoStore::new(db)))),
    };

    let signals = Signals::new([SIGINT, SIGTERM]).unwrap_or_exit_process();

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), cfg.http_port);
    let listener = TcpListener::bind(addr).await.unwrap_or_exit_process();
    info!("[WEB] listening on {}", addr);

    axum::serve(listener, controller::new(state, &cfg.frontend_url))
        .with_graceful_shutdown(shutdown_signal(signals))
        .await
        .unwrap_or_exit_process();

    // connections are left to die with the process when developing
    if cfg.is_development {
        return;
    }

    info!("[MONGO] closing client");
    mongo_client.shutdown().await;

    if let Some(db) = db {
        match Arc::try_unwrap(db) {
            Ok(db) => {
                info!("[DB] closing connections");
                if let Err(e) = db.close().await {
                    error!("[DB] failed to close db connection: {}", e)
                }
            }
            Err(_) => warn!("[DB] connection still in use, leaving it to be dropped"),
        }
    }

    tracer::shutdown().await;
}
