use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::config::Config;
use crate::ui::key_router::{KeyRouter, KeySubscription};
use crate::ui::keybindings::{shortcuts_for_context, Command, ShortcutContext};
use crate::ui::page::HomePage;
use crate::ui::stepper::{steps_from_config, Stepper};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::timer::{Timer, TimerTick};

pub struct App {
    refresh_rate: Duration,
    mouse: bool,
    page: HomePage,
    router: KeyRouter,
    /// App-wide shortcuts (quit, help, focus)
    general_keys: Option<KeySubscription>,
    tick_rx: UnboundedReceiver<TimerTick>,
    should_quit: bool,
    /// Set whenever state changed since the last draw
    dirty: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let stepper = Stepper::new(steps_from_config(&config.wizard.steps))?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let timer = Timer::new(config.tick_interval(), tick_tx);
        let mut page = HomePage::new(config.wizard.heading.clone(), stepper, timer);

        let router = KeyRouter::new();
        let general_keys =
            router.subscribe("app", shortcuts_for_context(ShortcutContext::General));
        page.mount(&router);

        Ok(Self {
            refresh_rate: config.refresh_rate(),
            mouse: config.ui.mouse,
            page,
            router,
            general_keys: Some(general_keys),
            tick_rx,
            should_quit: false,
            dirty: true,
        })
    }

    pub fn page(&self) -> &HomePage {
        &self.page
    }

    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run the event loop until quit.
    ///
    /// Must be called from within a tokio runtime so the timer can schedule
    /// its interval.
    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let guard = TerminalGuard::new(self.mouse)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        tracing::info!("wizard started");

        while !self.should_quit {
            if self.dirty {
                self.draw(&mut terminal)?;
            }

            // Handle events
            if event::poll(self.refresh_rate)? {
                let event = event::read()?;
                self.handle_event(&event);
            }

            self.drain_ticks();
        }

        self.shutdown();
        drop(guard);

        Ok(())
    }

    /// Render the page and clear the dirty flag
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| self.page.render(f))?;
        self.dirty = false;
        Ok(())
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let command = self.router.dispatch(key);

        // Help overlay swallows the next key, except quit
        if self.page.help_visible() && command != Some(Command::Quit) {
            self.dirty |= self.page.close_help();
            return;
        }

        match command {
            Some(Command::Quit) => {
                self.should_quit = true;
            }
            Some(command) => {
                tracing::trace!(?command, "key command");
                self.dirty |= self.page.apply(command);
            }
            None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self.page.help_visible() {
            self.dirty |= self.page.close_help();
            return;
        }
        self.dirty |= self.page.click(mouse.column, mouse.row);
    }

    /// Apply every tick that arrived since the last loop iteration, in order
    pub fn drain_ticks(&mut self) {
        while let Ok(tick) = self.tick_rx.try_recv() {
            self.dirty |= self.page.handle_tick(tick);
        }
    }

    /// Tear down listeners and the timer interval
    pub fn shutdown(&mut self) {
        self.page.unmount();
        self.general_keys = None;
        tracing::info!(
            listeners = self.router.listener_count(),
            "wizard stopped"
        );
    }
}
