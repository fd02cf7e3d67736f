//! End-to-end tests driving the app through its event handlers.
//!
//! These render into ratatui's `TestBackend`, so no terminal is needed.
//!
//! ```bash
//! cargo test --test wizard_integration
//! ```

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, style::Color, Terminal};
use std::time::Duration;

use wizard::app::App;
use wizard::config::{Config, StepConfig};
use wizard::ui::controls::Control;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn abc_config() -> Config {
    let mut config = Config::default();
    config.wizard.steps = vec![
        StepConfig::text("A"),
        StepConfig::text("B"),
        StepConfig::text("C"),
    ];
    config
}

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 30)).unwrap()
}

fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_event(&Event::Key(KeyEvent::new(code, modifiers)));
}

fn click(app: &mut App, column: u16, row: u16) {
    app.handle_event(&Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }));
}

/// Click the middle of a control as drawn on the last frame
fn click_control(app: &mut App, control: Control) {
    let rect = app
        .page()
        .hit_area(control)
        .unwrap_or_else(|| panic!("{:?} was not drawn", control));
    click(app, rect.x + rect.width / 2, rect.y + rect.height / 2);
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn current_title(app: &App) -> String {
    app.page().stepper().current_step().title.clone()
}

// ─── Stepper ─────────────────────────────────────────────────────────────────

#[test]
fn test_walks_forward_and_back_through_steps() {
    let mut app = App::new(&abc_config()).unwrap();
    assert_eq!(current_title(&app), "A");

    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    assert_eq!(current_title(&app), "B");
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    assert_eq!(current_title(&app), "C");

    // Already at the last step
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    assert_eq!(current_title(&app), "C");

    press(&mut app, KeyCode::Left, KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Left, KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Left, KeyModifiers::CONTROL);
    assert_eq!(current_title(&app), "A");
}

#[test]
fn test_click_and_shortcut_reach_the_same_step() {
    let mut by_key = App::new(&abc_config()).unwrap();
    press(&mut by_key, KeyCode::Right, KeyModifiers::CONTROL);

    let mut by_mouse = App::new(&abc_config()).unwrap();
    let mut term = terminal();
    by_mouse.draw(&mut term).unwrap();
    click_control(&mut by_mouse, Control::Next);

    assert_eq!(
        by_key.page().stepper().current_index(),
        by_mouse.page().stepper().current_index()
    );
    assert_eq!(current_title(&by_mouse), "B");
    assert!(by_mouse.is_dirty());
}

#[test]
fn test_click_on_disabled_previous_is_ignored() {
    let mut app = App::new(&abc_config()).unwrap();
    let mut term = terminal();
    app.draw(&mut term).unwrap();

    click_control(&mut app, Control::Previous);
    assert_eq!(app.page().stepper().current_index(), 0);
    assert!(!app.is_dirty());
}

#[test]
fn test_previous_is_drawn_disabled_on_first_step() {
    let mut app = App::new(&abc_config()).unwrap();
    let mut term = terminal();
    app.draw(&mut term).unwrap();

    let label_fg = |app: &App, term: &Terminal<TestBackend>| {
        let rect = app.page().hit_area(Control::Previous).unwrap();
        let row = rect.y + rect.height / 2;
        let buffer = term.backend().buffer();
        (rect.x..rect.x + rect.width)
            .find(|&x| buffer[(x, row)].symbol() == "P")
            .map(|x| buffer[(x, row)].fg)
            .unwrap()
    };
    assert_eq!(label_fg(&app, &term), Color::DarkGray);

    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    app.draw(&mut term).unwrap();
    assert_ne!(label_fg(&app, &term), Color::DarkGray);
}

#[test]
fn test_rendered_page_shows_titles_and_finish_label() {
    let mut app = App::new(&abc_config()).unwrap();
    let mut term = terminal();
    app.draw(&mut term).unwrap();

    let first = screen(&term);
    assert!(first.contains("Multi-Step Wizard"));
    assert!(first.contains("Content for A"));
    assert!(first.contains("Next"));
    assert!(!first.contains("Finish"));
    assert!(first.contains("Timer: 0s"));

    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    app.draw(&mut term).unwrap();

    let last = screen(&term);
    assert!(last.contains("Content for C"));
    assert!(last.contains("Finish"));
}

#[test]
fn test_default_steps_end_with_summary() {
    let mut app = App::new(&Config::default()).unwrap();
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);

    let mut term = terminal();
    app.draw(&mut term).unwrap();
    let text = screen(&term);
    assert!(text.contains("Step 3: Confirmation"));
    assert!(text.contains("Review your information before submission."));
}

#[test]
fn test_tab_and_enter_press_focused_control() {
    let mut app = App::new(&abc_config()).unwrap();
    assert_eq!(app.page().focus(), Some(Control::Next));

    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(current_title(&app), "B");

    // Previous is enabled now; Shift+Tab from Next wraps back onto it
    press(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(app.page().focus(), Some(Control::Previous));
    press(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
    assert_eq!(current_title(&app), "A");
}

// ─── Timer ───────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_timer_ticks_reach_the_page() {
    let mut app = App::new(&abc_config()).unwrap();
    press(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);
    assert!(app.page().timer().is_running());

    tokio::time::sleep(Duration::from_millis(2500)).await;
    app.drain_ticks();
    assert_eq!(app.page().timer().elapsed_seconds(), 2);

    press(&mut app, KeyCode::Char('p'), KeyModifiers::NONE);
    tokio::time::sleep(Duration::from_secs(5)).await;
    app.drain_ticks();
    assert_eq!(app.page().timer().elapsed_seconds(), 2);

    press(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
    assert_eq!(app.page().timer().elapsed_seconds(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_timer_click_and_shortcut_agree() {
    let mut by_key = App::new(&abc_config()).unwrap();
    press(&mut by_key, KeyCode::Char('s'), KeyModifiers::NONE);

    let mut by_mouse = App::new(&abc_config()).unwrap();
    let mut term = terminal();
    by_mouse.draw(&mut term).unwrap();
    click_control(&mut by_mouse, Control::Start);

    assert_eq!(by_key.page().timer().state(), by_mouse.page().timer().state());
    assert!(by_mouse.page().timer().is_running());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    by_key.drain_ticks();
    by_mouse.drain_ticks();
    assert_eq!(by_key.page().timer().elapsed_seconds(), 1);
    assert_eq!(by_mouse.page().timer().elapsed_seconds(), 1);

    // Pause is enabled now and sits where it was drawn
    by_mouse.draw(&mut term).unwrap();
    click_control(&mut by_mouse, Control::Pause);
    press(&mut by_key, KeyCode::Char('p'), KeyModifiers::NONE);
    assert_eq!(by_key.page().timer().state(), by_mouse.page().timer().state());
    assert!(!by_mouse.page().timer().is_running());
}

#[tokio::test(start_paused = true)]
async fn test_timer_keeps_counting_across_step_changes() {
    let mut app = App::new(&abc_config()).unwrap();
    press(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    tokio::time::sleep(Duration::from_secs(1)).await;
    app.drain_ticks();

    assert_eq!(current_title(&app), "B");
    assert_eq!(app.page().timer().elapsed_seconds(), 2);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_keys_and_ticks() {
    let mut app = App::new(&abc_config()).unwrap();
    press(&mut app, KeyCode::Char('s'), KeyModifiers::NONE);

    app.shutdown();
    assert_eq!(app.router().listener_count(), 0);

    tokio::time::sleep(Duration::from_secs(3)).await;
    app.drain_ticks();
    assert_eq!(app.page().timer().elapsed_seconds(), 0);

    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    assert_eq!(current_title(&app), "A");
}

#[test]
fn test_quit_leaves_state_untouched() {
    let mut app = App::new(&abc_config()).unwrap();
    press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
    assert!(app.should_quit());
    assert_eq!(current_title(&app), "B");
}
