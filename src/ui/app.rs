use flume::{Receiver, Sender};
use ratatui::Frame;
use tracing::info;

use crate::{
    audio::{controller::Player, default_backend, source::BlobRegistry},
    catalog::Catalog,
    config::AppConfig,
    event::events::Event,
    nav::MemoryNavigator,
    store::{LessonStore, StoreEvent, storage::FileStorage},
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::AppState,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::LessonList,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub store_rx: Receiver<StoreEvent>,
    pub path_rx: Receiver<String>,
    pub router: Router,
    pub state: AppState,
    pub ctx: AppContext,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();

        std::fs::create_dir_all(config.data_dir())?;
        let storage = FileStorage::open(config.storage_path());
        let store = LessonStore::open(Box::new(storage));
        info!(
            path = %config.storage_path().display(),
            lessons = store.len(),
            "catalog_loaded"
        );

        let blobs = BlobRegistry::new();
        let player = Player::new(default_backend(&blobs));
        let navigator = MemoryNavigator::new("/");

        let mut catalog = Catalog::new(store, player, Box::new(navigator));
        let store_rx = catalog.subscribe();
        let path_rx = catalog.subscribe_path();
        catalog.navigate(&config.path);

        Ok(Self {
            event_rx,
            event_tx: event_tx.clone(),
            store_rx,
            path_rx,
            router: Router::new(Box::new(LessonList::default())),
            state: AppState::default(),
            ctx: AppContext {
                catalog,
                blobs,
                config,
                event_tx,
            },
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            while !EventHandler::handle_events(self, &mut tui).await? {}
        }

        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}
