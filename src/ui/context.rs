use flume::Sender;

use crate::{audio::source::BlobRegistry, catalog::Catalog, config::AppConfig, event::events::Event};

pub struct AppContext {
    pub catalog: Catalog,
    pub blobs: BlobRegistry,
    pub config: AppConfig,
    pub event_tx: Sender<Event>,
}
