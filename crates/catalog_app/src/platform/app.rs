use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::Arc;

use catalog_core::{update, AppState, Msg};
use catalog_engine::{CatalogEvent, CatalogStore, FileCatalogStore, LedgerStore, Subscription};
use catalog_logging::{catalog_info, catalog_warn};

use super::effects::EffectRunner;
use super::history::History;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

/// Whether the command loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Host side of the catalog: owns the state, the address bar and the store
/// subscription, and feeds every input through `update`.
pub struct App {
    state: AppState,
    history: History,
    store: Arc<FileCatalogStore>,
    runner: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    events: mpsc::Receiver<CatalogEvent>,
    subscription: Option<Subscription>,
}

impl App {
    pub fn new(
        store: Arc<FileCatalogStore>,
        ledger: LedgerStore,
        base_path: &str,
        initial_query: &str,
        content_top: u32,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (event_tx, events) = mpsc::channel();
        let subscription = store.subscribe(event_tx);
        let stored = ledger.load_or_empty();
        let runner = EffectRunner::new(store.clone(), ledger, content_top, msg_tx.clone());

        let app = Self {
            state: AppState::new(),
            history: History::new(base_path, initial_query),
            store,
            runner,
            msg_tx,
            msg_rx,
            events,
            subscription: Some(subscription),
        };
        let _ = app
            .msg_tx
            .send(Msg::UrlHydrated(app.history.current_query().to_string()));
        let _ = app.msg_tx.send(Msg::LedgerLoaded(stored));
        app
    }

    /// Applies queued messages and store events until both channels are empty.
    /// Returns whether anything visible changed.
    pub fn pump(&mut self, out: &mut impl Write) -> io::Result<bool> {
        let mut changed = false;
        loop {
            if let Ok(msg) = self.msg_rx.try_recv() {
                changed |= self.dispatch(msg, out)?;
            } else if let Ok(event) = self.events.try_recv() {
                changed |= self.dispatch(event_to_msg(event), out)?;
            } else {
                return Ok(changed);
            }
        }
    }

    pub fn dispatch(&mut self, msg: Msg, out: &mut impl Write) -> io::Result<bool> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects, &mut self.history, out)?;
        Ok(dirty)
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Dispatch(msg) => {
                let _ = self.msg_tx.send(msg);
            }
            Command::Visit(query) => {
                let query = self.history.visit(&query).to_string();
                let _ = self.msg_tx.send(Msg::Navigated(query));
            }
            Command::Back => match self.history.back() {
                Some(query) => {
                    let _ = self.msg_tx.send(Msg::Navigated(query.to_string()));
                }
                None => writeln!(out, "(no earlier entry)")?,
            },
            Command::Forward => match self.history.forward() {
                Some(query) => {
                    let _ = self.msg_tx.send(Msg::Navigated(query.to_string()));
                }
                None => writeln!(out, "(no later entry)")?,
            },
            Command::Reload => {
                if let Err(err) = self.store.reload() {
                    writeln!(out, "reload failed: {err}")?;
                }
            }
            Command::Show => {
                self.render(out)?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        if self.pump(out)? {
            self.render(out)?;
        }
        Ok(Flow::Continue)
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let address = self.history.current_url();
        write!(out, "{}", render::render(&self.state.view(), &address))
    }

    /// Drops the store subscription.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            catalog_info!("Catalog subscription closed");
        }
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        self.pump(out)?;
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            match commands::parse_command(&line) {
                Ok(command) => {
                    if self.handle(command, out)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    catalog_warn!("Rejected command {:?}: {}", line, err);
                    writeln!(out, "{err}")?;
                }
            }
            out.flush()?;
        }
        self.shutdown();
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn event_to_msg(event: CatalogEvent) -> Msg {
    match event {
        CatalogEvent::Snapshot(items) => Msg::CollectionRefreshed(items),
        CatalogEvent::Failed(message) => Msg::CollectionFailed(message),
    }
}
