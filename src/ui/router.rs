use crate::event::events::Event;
use crate::nav::Route;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::Clear;

pub struct Router {
    pub stack: Vec<Box<dyn View>>,
    pub overlay: Option<Box<dyn View>>,
}

impl Router {
    pub fn new(initial_view: Box<dyn View>) -> Self {
        Self {
            stack: vec![initial_view],
            overlay: None,
        }
    }

    pub fn push(&mut self, view: Box<dyn View>) {
        self.stack.push(view);
    }

    pub fn pop_to_root(&mut self) {
        self.stack.truncate(1);
    }

    pub fn top_route(&self) -> Route {
        self.stack.last().map(|v| v.route()).unwrap_or_default()
    }

    pub fn set_overlay(&mut self, view: Box<dyn View>) {
        self.overlay = Some(view);
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state, ctx);
        }

        if let Some(overlay) = &mut self.overlay {
            let popup = centered(area, 80, 90);
            f.render_widget(Clear, popup);
            overlay.render(f, popup, state, ctx);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(overlay) = &mut self.overlay {
            overlay.handle_input(key, state, ctx).await
        } else if let Some(view) = self.stack.last_mut() {
            view.handle_input(key, state, ctx).await
        } else {
            None
        }
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        for view in &mut self.stack {
            view.on_event(event, ctx).await;
        }

        if let Some(overlay) = &mut self.overlay {
            overlay.on_event(event, ctx).await;
        }
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
