//! Home page: the stepper and the timer composed into one view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::controls::Control;
use crate::ui::help::HelpDialog;
use crate::ui::key_router::KeyRouter;
use crate::ui::keybindings::Command;
use crate::ui::stepper::Stepper;
use crate::ui::timer::{Timer, TimerTick};

const PAGE_WIDTH: u16 = 72;

pub struct HomePage {
    heading: String,
    stepper: Stepper,
    timer: Timer,
    help: HelpDialog,
    focus: Option<Control>,
    /// Control areas from the last render, for mouse hit testing
    hit_areas: Vec<(Control, Rect)>,
}

impl HomePage {
    pub fn new(heading: impl Into<String>, stepper: Stepper, timer: Timer) -> Self {
        let mut page = Self {
            heading: heading.into(),
            stepper,
            timer,
            help: HelpDialog::new(),
            focus: None,
            hit_areas: Vec::new(),
        };
        page.focus = page.first_enabled_from(0);
        page
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn focus(&self) -> Option<Control> {
        self.focus
    }

    pub fn help_visible(&self) -> bool {
        self.help.visible
    }

    /// Where a control was drawn on the last render
    pub fn hit_area(&self, control: Control) -> Option<Rect> {
        self.hit_areas
            .iter()
            .find(|(c, _)| *c == control)
            .map(|(_, rect)| *rect)
    }

    /// Attach both components' shortcuts
    pub fn mount(&mut self, router: &KeyRouter) {
        self.stepper.mount(router);
        self.timer.mount(router);
        tracing::info!(steps = self.stepper.len(), "page mounted");
    }

    /// Detach shortcuts and cancel the timer interval
    pub fn unmount(&mut self) {
        self.stepper.unmount();
        self.timer.unmount();
        tracing::info!("page unmounted");
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::Previous | Control::Next => self.stepper.is_enabled(control),
            Control::Start | Control::Pause | Control::Reset => self.timer.is_enabled(control),
        }
    }

    fn hint(&self, control: Control) -> Option<&'static str> {
        self.stepper
            .hint(control)
            .or_else(|| self.timer.hint(control))
    }

    /// Apply a command, returning whether anything visible changed
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = match command {
            // Owned by the app loop
            Command::Quit => false,
            Command::ToggleHelp => {
                self.help.toggle();
                true
            }
            Command::FocusNext => self.move_focus(true),
            Command::FocusPrev => self.move_focus(false),
            Command::Activate => match self.focus {
                Some(control) if self.is_enabled(control) => self.apply(control.command()),
                _ => false,
            },
            Command::Stepper(action) => self.stepper.apply(action),
            Command::Timer(action) => self.timer.apply(action),
        };

        if changed {
            self.repair_focus();
        }
        changed
    }

    /// Dismiss the help overlay if it is open
    pub fn close_help(&mut self) -> bool {
        if self.help.visible {
            self.help.hide();
            return true;
        }
        false
    }

    /// Press the control under the given screen cell, if any
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let position = Position::new(column, row);
        let Some(control) = self
            .hit_areas
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(control, _)| *control)
        else {
            return false;
        };

        if !self.is_enabled(control) {
            return false;
        }
        let focus_moved = self.focus != Some(control);
        self.focus = Some(control);
        self.apply(control.command()) || focus_moved
    }

    pub fn handle_tick(&mut self, tick: TimerTick) -> bool {
        self.timer.handle_tick(tick)
    }

    fn move_focus(&mut self, forward: bool) -> bool {
        let controls = Control::all();
        let len = controls.len();
        let start = self
            .focus
            .and_then(|c| controls.iter().position(|x| *x == c))
            .unwrap_or(if forward { len - 1 } else { 0 });

        for offset in 1..=len {
            let i = if forward {
                (start + offset) % len
            } else {
                (start + len - offset) % len
            };
            if self.is_enabled(controls[i]) {
                let changed = self.focus != Some(controls[i]);
                self.focus = Some(controls[i]);
                return changed;
            }
        }
        false
    }

    fn first_enabled_from(&self, start: usize) -> Option<Control> {
        let controls = Control::all();
        (0..controls.len())
            .map(|offset| controls[(start + offset) % controls.len()])
            .find(|c| self.is_enabled(*c))
    }

    /// Keep focus on an enabled control after a state change
    fn repair_focus(&mut self) {
        match self.focus {
            Some(control) if self.is_enabled(control) => {}
            Some(control) => {
                let index = Control::all()
                    .iter()
                    .position(|c| *c == control)
                    .unwrap_or(0);
                self.focus = self.first_enabled_from(index + 1);
            }
            None => self.focus = self.first_enabled_from(0),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let full = frame.area();
        let width = PAGE_WIDTH.min(full.width);
        let area = Rect {
            x: full.x + (full.width - width) / 2,
            width,
            ..full
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Heading
                Constraint::Length(1), // Spacer
                Constraint::Min(14),   // Stepper
                Constraint::Length(1), // Spacer
                Constraint::Length(7), // Timer panel
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let heading = Paragraph::new(Line::from(Span::styled(
            self.heading.as_str(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(heading, chunks[1]);

        let mut hits = self.stepper.render(frame, chunks[3], self.focus);

        let timer_block = Block::default()
            .title(" Timer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let timer_inner = timer_block.inner(chunks[5]);
        frame.render_widget(timer_block, chunks[5]);
        hits.extend(self.timer.render(frame, timer_inner, self.focus));

        let mut footer = vec![];
        if let Some(hint) = self.focus.and_then(|c| self.hint(c)) {
            footer.push(Span::styled(hint, Style::default().fg(Color::White)));
            footer.push(Span::raw("  "));
        }
        footer.extend([
            Span::styled("Ctrl+←/→", Style::default().fg(Color::Yellow)),
            Span::raw(" step  "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" focus  "),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::raw(" help  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            chunks[6],
        );

        self.hit_areas = hits;
        self.help.render(frame);
    }
}
