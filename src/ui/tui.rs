use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::Result;

use crossterm::event::EventStream;
use flume::{Receiver, Sender};
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::{
    cursor,
    event::{
        DisableFocusChange, EnableFocusChange, Event as CrosstermEvent, KeyEvent, KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend as Backend, crossterm};
use tracing::warn;

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub enum TerminalEvent {
    Init,
    Quit,
    Tick,
    FocusGained,
    FocusLost,
    Key(KeyEvent),
    Resize(u16, u16),
}

pub struct Tui {
    pub terminal: ratatui::Terminal<Backend<std::io::Stdout>>,
    pub event_rx: Receiver<TerminalEvent>,
    pub event_tx: Sender<TerminalEvent>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(Backend::new(std::io::stdout()))?;
        let (event_tx, event_rx) = flume::unbounded();

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
        })
    }

    pub fn start(&mut self) {
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick_interval = tokio::time::interval(TICK_RATE);
            loop {
                let tick_delay = tick_interval.tick();
                let crossterm_event = reader.next().fuse();

                tokio::select! {
                    _ = tick_delay => {
                        if event_tx.send_async(TerminalEvent::Tick).await.is_err() {
                            break;
                        }
                    }
                    maybe_event = crossterm_event => {
                        let evt = match maybe_event {
                            Some(Ok(evt)) => evt,
                            Some(Err(_)) => continue,
                            None => {
                                let _ = event_tx.send_async(TerminalEvent::Quit).await;
                                break;
                            }
                        };
                        let forwarded = match evt {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Some(TerminalEvent::Key(key))
                            }
                            CrosstermEvent::Resize(x, y) => Some(TerminalEvent::Resize(x, y)),
                            CrosstermEvent::FocusLost => Some(TerminalEvent::FocusLost),
                            CrosstermEvent::FocusGained => Some(TerminalEvent::FocusGained),
                            _ => None,
                        };
                        if let Some(evt) = forwarded {
                            let _ = event_tx.send_async(evt).await;
                        }
                    }
                }
            }
        });
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableFocusChange,
            cursor::Hide
        )?;
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(std::io::stdout(), DisableFocusChange)?;
            Self::restore()?;
        }
        Ok(())
    }

    pub fn restore() -> Result<()> {
        crossterm::execute!(std::io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Option<TerminalEvent> {
        self.event_rx.recv_async().await.ok()
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend<std::io::Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            warn!(error = %e, "terminal_restore_failed");
        }
    }
}
