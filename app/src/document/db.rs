use super::carrapato::{CarrapatoDocument, COLLECTION_NAME};
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use std::time::Duration;
use tracing::{info, warn};

/// Creates the process wide mongodb client, the client holds its own
/// connection pool and must be shared instead of recreated per request.
///
/// no connection is opened here, the driver connects lazily on the first
/// operation and fails it after `server_selection_timeout` without a server.
pub async fn create_client(
    connection_string: &str,
    server_selection_timeout: Duration,
) -> mongodb::error::Result<Client> {
    let mut opts = ClientOptions::parse(connection_string).await?;

    opts.app_name = Some(String::from("carrapato-api"));
    opts.server_selection_timeout = Some(server_selection_timeout);

    info!("[MONGO] creating client");
    Client::with_options(opts)
}

pub fn carrapato_collection(
    client: &Client,
    database_name: &str,
) -> Collection<CarrapatoDocument> {
    client
        .database(database_name)
        .collection::<CarrapatoDocument>(COLLECTION_NAME)
}

/// Ensures the unique index on `CodigoSerial` exists.
///
/// the api still serves requests when this fails (eg: the server is not up yet),
/// duplicates are then only prevented by the repository lookup before inserts.
pub async fn ensure_indexes(collection: &Collection<CarrapatoDocument>) {
    let index = IndexModel::builder()
        .keys(doc! { "CodigoSerial": 1 })
        .options(
            IndexOptions::builder()
                .unique(true)
                .name(String::from("codigo_serial_unique"))
                .build(),
        )
        .build();

    match collection.create_index(index, None).await {
        Ok(_) => info!("[MONGO] codigo serial unique index ready"),
        Err(e) => warn!("[MONGO] failed to create codigo serial unique index: {}", e),
    }
}
