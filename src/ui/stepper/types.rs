//! Type definitions for the stepper

use std::fmt;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::config::{StepConfig, StepKind};

/// Navigation requested of the stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperAction {
    Advance,
    Retreat,
}

/// Renderable body of a step
pub trait StepBody: fmt::Debug {
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// One titled unit of content in the wizard sequence
#[derive(Debug)]
pub struct Step {
    pub title: String,
    pub body: Box<dyn StepBody>,
}

impl Step {
    pub fn new(title: impl Into<String>, body: impl StepBody + 'static) -> Self {
        Self {
            title: title.into(),
            body: Box::new(body),
        }
    }

    /// A step whose body is the placeholder "Content for {title}"
    pub fn placeholder(title: impl Into<String>) -> Self {
        let title = title.into();
        let body = TextBody::new(format!("Content for {}", title));
        Self::new(title, body)
    }
}

/// Build steps from their configured definitions.
///
/// Summary steps list every title in the sequence, including their own.
pub fn steps_from_config(configs: &[StepConfig]) -> Vec<Step> {
    let titles: Vec<String> = configs.iter().map(|c| c.title.clone()).collect();

    configs
        .iter()
        .map(|config| match config.kind {
            StepKind::Text => match config.body {
                Some(ref body) => Step::new(config.title.clone(), TextBody::new(body.clone())),
                None => Step::placeholder(config.title.clone()),
            },
            StepKind::Summary => {
                let mut summary = SummaryBody::new(titles.clone());
                if let Some(ref body) = config.body {
                    summary = summary.with_message(body.clone());
                }
                Step::new(config.title.clone(), summary)
            }
        })
        .collect()
}

/// Free text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBody {
    text: String,
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl StepBody for TextBody {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.text.as_str())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Review of the whole sequence before submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBody {
    message: String,
    titles: Vec<String>,
}

impl SummaryBody {
    pub fn new(titles: Vec<String>) -> Self {
        Self {
            message: "Review your information before submission.".to_string(),
            titles,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = message;
        self
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Summary",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
        ];
        for (i, title) in self.titles.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::Cyan)),
                Span::raw(title.clone()),
            ]));
        }
        lines
    }
}

impl StepBody for SummaryBody {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
