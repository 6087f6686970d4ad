use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use skeptik::catalog::{Truth, Variant};
use skeptik::celebration::CelebrationAnimation;
use skeptik::quiz::{QuizSession, Stage};
use skeptik::session::{Choice, Tier};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let logo_lines = self.logo.as_deref().map_or(0, |l| l.lines().count()) as u16;
        let header_height = logo_lines + 3;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(header_height),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(self, chunks[0], buf);

        match self.session.stage() {
            Stage::Consent => render_consent(chunks[1], buf),
            Stage::Age => render_age(&self.session, chunks[1], buf),
            Stage::Rejected => render_rejected(chunks[1], buf),
            Stage::VariantSelect => render_variant_select(chunks[1], buf),
            Stage::Quiz => render_quiz(self, chunks[1], buf),
            Stage::Scored => render_results(&self.session, chunks[1], buf),
        }

        render_footer(chunks[2], buf);

        // Balloons draw on top of whatever screen is up
        if self.celebration.is_active {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn hint() -> Style {
    Style::default()
        .add_modifier(Modifier::ITALIC)
        .add_modifier(Modifier::DIM)
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(logo) = app.logo.as_deref() {
        for logo_line in logo.lines() {
            lines.push(Line::from(Span::styled(logo_line.to_string(), dim())));
        }
    }

    lines.push(Line::from(Span::styled(
        "🧠 Fake News Detection Challenge",
        bold(),
    )));
    lines.push(Line::from(Span::styled(
        "Can you spot misinformation? Decide whether news headlines are real or fake.",
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn choice_label(choice: Choice) -> &'static str {
    match choice {
        Choice::Yes => "Yes",
        Choice::No => "No",
        Choice::Unset => "",
    }
}

fn render_consent(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled("🔐 Participation", bold())),
        Line::from(""),
        Line::from("Do you agree to take this quiz anonymously?"),
        Line::from(""),
        Line::from(Span::styled("(y) Yes    (n) No", dim())),
        Line::from(""),
        Line::from(Span::styled(
            "Takes 2-5 minutes · No names or emails collected · Educational use only",
            hint(),
        )),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_age(session: &QuizSession, area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Participation: {}", choice_label(session.consent())),
            dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("🎂 Age Confirmation", bold())),
        Line::from(""),
        Line::from("Are you 13 years or older?"),
        Line::from(""),
        Line::from(Span::styled("(y) Yes    (n) No", dim())),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_rejected(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Sorry — this experience is only available to users aged 13 or older.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("(r) start over / (esc) quit", hint())),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_variant_select(area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("🧪 Choose a Test Version", bold())),
        Line::from(""),
        Line::from("Select one:"),
        Line::from(""),
    ];

    for (i, variant) in Variant::ALL.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("({}) {}", i + 1, variant),
            dim(),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_quiz(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let [first, second] = session.label_order();
    let count = session.item_count();

    let mut lines = vec![
        Line::from(Span::styled("📰 Headline Challenge", bold())),
        Line::from(Span::styled("Label each headline as REAL or FAKE", hint())),
        Line::from(""),
    ];

    // Marker, item number, headline, and the two label cells
    let label_cell_width = "[Real] [Fake]".len() + 2;
    let headline_width = (area.width as usize).saturating_sub(6 + label_cell_width);

    let visible = (area.height as usize).saturating_sub(lines.len() + 1).max(1);
    let max_start = count.saturating_sub(visible);
    let start = app.cursor.saturating_sub(visible / 2).min(max_start);

    for (pos, item) in session.presented().skip(start).take(visible) {
        let selected = pos == app.cursor;
        let marker = if selected { "❯ " } else { "  " };
        let answer = session.answer_at(pos);

        let label_span = |truth: Truth| -> Span {
            let text = format!("[{}]", truth);
            match answer {
                Some(picked) if picked == truth => Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                _ => Span::styled(text, dim()),
            }
        };

        let headline = format!(
            "{:<width$}",
            truncate_to_width(&item.text, headline_width),
            width = headline_width
        );

        lines.push(Line::from(vec![
            Span::styled(
                marker,
                if selected {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
            Span::styled(format!("{:>2}. ", pos + 1), dim()),
            if selected {
                Span::styled(headline, bold())
            } else {
                Span::from(headline)
            },
            label_span(first),
            Span::from(" "),
            label_span(second),
        ]));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "answered {}/{} · (↑/↓) move · (1) {} · (2) {} · (enter) submit · (esc) quit",
            session.answered_count(),
            count,
            first,
            second
        ),
        hint(),
    )));

    Paragraph::new(lines).render(area, buf);
}

pub(crate) fn tier_message(tier: Tier) -> (&'static str, Color) {
    match tier {
        Tier::Excellent => (
            "🎉 Excellent! You’re highly resistant to misinformation.",
            Color::Green,
        ),
        Tier::Good => ("👍 Good job! Some room for improvement.", Color::Cyan),
        Tier::Vulnerable => (
            "⚠️ You may be vulnerable to misinformation.",
            Color::Yellow,
        ),
    }
}

fn render_results(session: &QuizSession, area: Rect, buf: &mut Buffer) {
    let Some(card) = session.scorecard() else {
        return;
    };
    let (message, color) = tier_message(card.tier);

    let lines = vec![
        Line::from(Span::styled("📊 Your Results", bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {} / {}", card.score, card.total),
            bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Fake headlines caught: {}/{} · Real headlines recognized: {}/{}",
                card.fake_caught, card.fake_total, card.real_spotted, card.real_total
            ),
            dim(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This result is for educational purposes only.",
            hint(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(r) new session / (esc) quit",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn render_footer(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled("🛠️ Made by Ali Kahoot · For ages 13+", dim()))
        .alignment(Alignment::Center)
        .render(area, buf);
}

/// Render celebration balloons on top of the current screen
fn render_celebration(celebration: &CelebrationAnimation, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for balloon in &celebration.balloons {
        if balloon.x < 0.0 || balloon.y < 0.0 {
            continue;
        }
        let x = balloon.x as u16;
        let y = balloon.y as u16;

        if x < area.width && y < area.height {
            let color = colors[balloon.color_index % colors.len()];

            // Fade with age
            let alpha = 1.0 - (balloon.age / balloon.max_age);
            let style = if alpha > 0.7 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&balloon.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
