use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

use crate::{
    event::events::Event,
    nav::Route,
    store::filter::Selector,
    ui::{
        app::App,
        input::InputHandler,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::{LessonDetail, LessonForm, Login},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        loop {
            let mut progressed = false;

            while let Ok(evt) = app.event_rx.try_recv() {
                Self::handle_action(app, evt).await;
                progressed = true;
            }
            while let Ok(change) = app.store_rx.try_recv() {
                Self::handle_action(app, Event::Store(change)).await;
                progressed = true;
            }
            while let Ok(path) = app.path_rx.try_recv() {
                Self::handle_action(app, Event::PathChanged(path)).await;
                progressed = true;
            }

            if !progressed {
                break;
            }
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::Quit => app.should_quit = true,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Tick => {
                if app.ctx.catalog.poll_player() {
                    Self::handle_action(app, Event::PlaybackEnded).await;
                    return Ok(true);
                }
                return Ok(false);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        let mut follow_up = None;

        match &evt {
            Event::SetQuery(query) => app.ctx.catalog.set_query(query.clone()),
            Event::SetLevel(level) => app.ctx.catalog.set_level(*level),
            Event::SetScript(script) => app.ctx.catalog.set_script(*script),
            Event::ResetFilters => {
                app.ctx.catalog.set_query("");
                app.ctx.catalog.set_level(Selector::All);
                app.ctx.catalog.set_script(Selector::All);
            }
            Event::OpenLesson(id) => app.ctx.catalog.open(id),
            Event::Back => app.ctx.catalog.back(),
            Event::PathChanged(path) => {
                info!(path = path.as_str(), "path_changed");
                Self::sync_route(app);
            }
            Event::Play(id) => Self::play(app, id),
            Event::TogglePlayback => app.ctx.catalog.toggle_playback(),
            Event::ClosePlayer => app.ctx.catalog.close_player(),
            Event::EditLesson(id) => {
                if !app.ctx.catalog.is_admin() {
                    app.state.ui.error("Admin access required");
                } else {
                    match app.ctx.catalog.draft_for(id.as_deref()) {
                        Some(draft) => app.router.set_overlay(Box::new(LessonForm::new(draft))),
                        None => app.state.ui.error("That lesson no longer exists"),
                    }
                }
            }
            Event::SaveLesson(draft) => match app.ctx.catalog.save_draft(draft.clone()) {
                Ok(lesson) => {
                    app.router.clear_overlay();
                    app.state.ui.info(format!("Saved '{}'", lesson.title));
                }
                Err(e) => {
                    warn!(error = %e, "lesson_save_rejected");
                    follow_up = Some(Event::SaveRejected(e.to_string()));
                }
            },
            Event::DeleteLesson(id) => match app.ctx.catalog.remove(id) {
                Ok(Some(lesson)) => {
                    if app.ctx.catalog.route() == Route::Detail(id.clone()) {
                        app.ctx.catalog.back();
                    }
                    app.state.ui.info(format!("Deleted '{}'", lesson.title));
                }
                Ok(None) => {}
                Err(e) => app.state.ui.error(e.to_string()),
            },
            Event::Export => Self::export(app).await,
            Event::OpenLogin => {
                if !app.ctx.catalog.is_admin() {
                    app.router.set_overlay(Box::new(Login::default()));
                }
            }
            Event::Login(secret) => {
                if app.ctx.catalog.unlock(secret) {
                    app.router.clear_overlay();
                    app.state.ui.info("Admin mode unlocked");
                } else {
                    follow_up = Some(Event::LoginRejected);
                }
            }
            Event::Logout => {
                app.ctx.catalog.lock();
                app.router.clear_overlay();
                app.state.ui.info("Admin mode locked");
            }
            Event::Store(_)
            | Event::PlaybackEnded
            | Event::SaveRejected(_)
            | Event::LoginRejected => {}
        }

        app.router.on_event(&evt, &app.ctx).await;
        if let Some(follow_up) = follow_up {
            app.router.on_event(&follow_up, &app.ctx).await;
        }
    }

    fn play(app: &mut App, id: &str) {
        let Some(lesson) = app.ctx.catalog.lesson(id) else {
            return;
        };
        if !lesson.has_audio() {
            app.state.ui.info("This lesson has no audio");
            return;
        }
        let title = lesson.title.clone();

        let was_playing = app.ctx.catalog.player().is_playing()
            && app.ctx.catalog.player().lesson().is_some_and(|l| l.id == id);
        app.ctx.catalog.play(id);

        if !was_playing && !app.ctx.catalog.player().is_playing() {
            app.state.ui.error(format!("Could not play audio for '{title}'"));
        }
    }

    async fn export(app: &mut App) {
        let snapshot = match app.ctx.catalog.export_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                app.state.ui.error(e.to_string());
                return;
            }
        };

        let path = app.ctx.config.export_dir.join(snapshot.file_name);
        match tokio::fs::write(&path, snapshot.contents).await {
            Ok(()) => {
                info!(path = %path.display(), "lessons_exported");
                app.state.ui.info(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "export_failed");
                app.state.ui.error(format!("Export failed: {e}"));
            }
        }
    }

    fn sync_route(app: &mut App) {
        let route = app.ctx.catalog.route();
        if route == app.router.top_route() {
            return;
        }

        app.router.pop_to_root();
        if let Route::Detail(id) = route {
            app.router.push(Box::new(LessonDetail::new(id)));
        }
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if let KeyCode::Char('c') = evt.code {
            if evt.modifiers == KeyModifiers::CONTROL {
                app.should_quit = true;
                return;
            }
        }

        app.state.ui.status = None;

        let action = app.router.handle_input(evt, &app.state, &app.ctx).await;

        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(action) = InputHandler::handle_key(evt) {
            Self::dispatch_action(app, action).await;
        }
    }

    async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::Back => Self::handle_action(app, Event::Back).await,
            Action::CloseOverlay => app.router.clear_overlay(),
            Action::TogglePlayback => Self::handle_action(app, Event::TogglePlayback).await,
            Action::ClosePlayer => Self::handle_action(app, Event::ClosePlayer).await,
            Action::ToggleAdmin => {
                let evt = if app.ctx.catalog.is_admin() {
                    Event::Logout
                } else {
                    Event::OpenLogin
                };
                Self::handle_action(app, evt).await;
            }
            Action::None => {}
        }
    }
}
