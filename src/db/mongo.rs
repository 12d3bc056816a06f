use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

/// Build a pooled client. A failed ping is logged; the client is still returned
/// so that saves fail per request instead of at startup.
pub async fn create_mongo_client(uri: &str, database: &str) -> mongodb::error::Result<Arc<Client>> {
    log::info!("Connecting to MongoDB (database {})", database);

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client.database(database).run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("MongoDB connected"),
        Err(e) => log::warn!("MongoDB ping failed, saving trips may not work: {}", e),
    }

    Ok(Arc::new(client))
}
