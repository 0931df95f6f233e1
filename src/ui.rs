use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use taja::drill::Drill;
use taja::session::Stage;
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(&self.drill, area, buf),
            AppState::Results => render_results(&self.drill, area, buf),
        }
    }
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::PositionDrill => "position drill",
        Stage::WordDrill => "word drill",
        Stage::Completed => "done",
    }
}

fn render_typing(drill: &Drill, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    if drill.is_paused() {
        // Paused state - any input resumes
        let paused_message = Paragraph::new(Span::styled(
            "PAUSED - press any key to resume",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        paused_message.render(area, buf);
        return;
    }

    // The unit strip is the widest line on screen; keep the block on one
    // line where the terminal allows it (Hangul units are double-width).
    let units: String = drill.target_units().iter().collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let unit_occupied_lines =
        ((units.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1);

    let block_height = 5 + unit_occupied_lines;
    let top = area.height.saturating_sub(block_height) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(1), // progress
                Constraint::Length(1), // current item
                Constraint::Length(unit_occupied_lines),
                Constraint::Length(1), // input buffer
                Constraint::Length(1), // miss flash
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let (done, total) = drill.progress();
    let progress = Paragraph::new(Span::styled(
        format!(
            "{} / {}  ·  {}  ·  {}",
            done,
            total,
            drill.config.category,
            stage_label(drill.stage)
        ),
        dim_bold_style,
    ))
    .alignment(Alignment::Center);
    progress.render(chunks[1], buf);

    let mut item_spans = vec![Span::styled(drill.current_item().to_string(), bold_style)];
    if let Some(next) = drill.next_item() {
        item_spans.push(Span::styled(format!("   next: {next}"), dim_bold_style));
    }
    Paragraph::new(Line::from(item_spans))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    // Phonetic units with the highlight cursor: typed units green, the
    // current one underlined, the rest dim
    let cursor = drill.cursor();
    let unit_spans: Vec<Span> = drill
        .target_units()
        .iter()
        .enumerate()
        .map(|(idx, unit)| {
            let style = if idx < cursor {
                green_bold_style
            } else if idx == cursor {
                underlined_dim_bold_style
            } else {
                dim_bold_style
            };
            Span::styled(unit.to_string(), style)
        })
        .collect();
    Paragraph::new(Line::from(unit_spans))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let input_line = if drill.input.is_empty() {
        Span::styled("…", dim_bold_style)
    } else {
        Span::styled(drill.input.clone(), bold_style)
    };
    Paragraph::new(input_line)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if drill.miss_flash() {
        Paragraph::new(Span::styled("✗", red_bold_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}

fn render_results(drill: &Drill, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let magenta_style = Style::default().fg(Color::Magenta);

    let Some(result) = drill.result() else {
        Paragraph::new(Span::styled("no results yet", dim_bold_style))
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };

    let lines = vec![
        Line::from(Span::styled("session complete", bold_style)),
        Line::from(""),
        Line::from(Span::styled(
            format!("accuracy   {:>6.0}%", result.accuracy_percent),
            magenta_style,
        )),
        Line::from(Span::styled(
            format!("speed      {:>6.0} units/min", result.speed),
            magenta_style,
        )),
        Line::from(Span::styled(
            format!("wpm        {:>6.0}", result.words_per_minute),
            magenta_style,
        )),
        Line::from(Span::styled(
            format!("elapsed    {:>6.1}s", result.elapsed_seconds),
            magenta_style,
        )),
        Line::from(Span::styled(
            format!("keypresses {:>6}", result.total_key_presses),
            magenta_style,
        )),
        Line::from(""),
        Line::from(Span::styled("(r)etry / (esc)ape", dim_bold_style)),
    ];

    let block_height = lines.len() as u16;
    let top = area.height.saturating_sub(block_height) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([Constraint::Length(top), Constraint::Min(block_height)].as_ref())
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}
