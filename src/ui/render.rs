use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::api::FeedApi;
use crate::domain::fishing::{CASTING_TEXT, STARVED_HINT, STARVED_TEXT};
use crate::storage::traits::KvStore;
use crate::ui::app::{App, RandomPanel, LOAD_FAILED_TEXT, LOAD_MORE_TEXT};
use crate::ui::intent::{CardZone, LayoutMap};
use crate::ui::modal::ModalPhase;

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;
/// Rows per card: title line plus author/date line.
const CARD_HEIGHT: u16 = 2;

const ACCENT: Style = Style::new().fg(Color::Cyan);
const DIM: Style = Style::new().fg(Color::DarkGray);
const FAILURE: Style = Style::new().fg(Color::Red);

pub fn draw<A: FeedApi, K: KvStore>(frame: &mut Frame, app: &mut App<A, K>) {
    let area = frame.area();
    let mut layout = LayoutMap::default();

    // Too small to host the widget's regions: draw nothing this frame.
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        app.set_layout(layout);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    draw_stats(frame, app, chunks[0]);
    draw_random(frame, app, chunks[1], &mut layout);
    draw_cards(frame, app, chunks[2], &mut layout);
    draw_footer(frame, app, chunks[3], &mut layout);
    draw_modal(frame, app, area, &mut layout);

    app.set_layout(layout);
}

fn draw_stats<A: FeedApi, K: KvStore>(frame: &mut Frame, app: &App<A, K>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("朋友圈");

    let mut lines = Vec::new();
    match app.stats() {
        Some(stats) => {
            lines.push(Line::from(format!(
                "订阅:{} 活跃:{} 总文章数:{}",
                stats.friends_num, stats.active_num, stats.article_num
            )));
            lines.push(Line::from(Span::styled(
                format!("更新时间:{}", stats.last_updated_time),
                DIM,
            )));
        }
        None if app.load_failed() => {
            lines.push(Line::from(Span::styled(LOAD_FAILED_TEXT, FAILURE)));
        }
        None => {
            lines.push(Line::from(Span::styled(
                format!("共 {} 篇文章", app.articles().len()),
                DIM,
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_random<A: FeedApi, K: KvStore>(
    frame: &mut Frame,
    app: &App<A, K>,
    area: Rect,
    layout: &mut LayoutMap,
) {
    let title = if app.fishing_enabled() {
        "随机钓鱼 · r 重新钓鱼"
    } else {
        "随机文章 · r 换一篇"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    // The whole header row acts as the refresh control.
    layout.random_header = Some(Rect::new(area.x, area.y, area.width, 1));

    let mut lines = Vec::new();
    match app.random() {
        RandomPanel::Idle => {
            lines.push(Line::from(Span::styled("……", DIM)));
        }
        RandomPanel::Casting { level_tag, .. } => {
            let tag = level_tag.clone().unwrap_or_default();
            lines.push(Line::from(format!("{} {}", CASTING_TEXT, tag)));
        }
        RandomPanel::Starved { level_tag } => {
            let tag = level_tag.clone().unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("{}{}", STARVED_TEXT, tag),
                FAILURE,
            )));
            lines.push(Line::from(Span::styled(STARVED_HINT, DIM)));
        }
        RandomPanel::Caught { tip, article_index } => {
            if let Some(article) = app.article(*article_index) {
                lines.push(Line::from(*tip));
                lines.push(Line::from(Span::styled(
                    format!("🐟 {}", article.author),
                    ACCENT,
                )));
                lines.push(Line::from(Span::styled(
                    format!("《{}》", article.title),
                    Style::new().add_modifier(Modifier::BOLD),
                )));
                if inner.height >= 3 {
                    layout.random_author =
                        Some(Rect::new(inner.x, inner.y + 1, inner.width, 1));
                    layout.random_title =
                        Some(Rect::new(inner.x, inner.y + 2, inner.width, 1));
                }
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_cards<A: FeedApi, K: KvStore>(
    frame: &mut Frame,
    app: &App<A, K>,
    area: Rect,
    layout: &mut LayoutMap,
) {
    let block = Block::default().borders(Borders::ALL).title("文章");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < CARD_HEIGHT || app.cards().is_empty() {
        return;
    }

    let capacity = (inner.height / CARD_HEIGHT) as usize;
    let max_offset = app.cards().len().saturating_sub(capacity);
    let offset = app
        .selected()
        .saturating_sub(capacity.saturating_sub(1))
        .min(max_offset);

    for (slot, (card_index, card)) in app
        .cards()
        .iter()
        .enumerate()
        .skip(offset)
        .take(capacity)
        .enumerate()
    {
        let y = inner.y + (slot as u16) * CARD_HEIGHT;
        let title_rect = Rect::new(inner.x, y, inner.width, 1);
        let author_rect = Rect::new(inner.x, y + 1, inner.width, 1);
        let selected = card_index == app.selected();

        if card.revealed {
            let article = match app.article(card.article_index) {
                Some(article) => article,
                None => continue,
            };

            let title_style = if selected {
                ACCENT.add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            let marker = if selected { "▸ " } else { "  " };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{}{}", marker, article.title),
                    title_style,
                ))),
                title_rect,
            );

            let mut meta = format!("    {} 🗓️{}", article.author, article.created_date());
            if let Some(host) = card.avatar_host() {
                meta.push_str(&format!(" · {}", host));
            }
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(meta, DIM))),
                author_rect,
            );

            layout.cards.push(CardZone {
                index: card.article_index,
                title: title_rect,
                author: author_rect,
            });
        } else {
            // Skeleton placeholder; not interactive.
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("  ░░░░░░░░░░░░░░░░░░", DIM))),
                title_rect,
            );
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("    ░░░░░░ ░░░░", DIM))),
                author_rect,
            );
        }
    }
}

fn draw_footer<A: FeedApi, K: KvStore>(
    frame: &mut Frame,
    app: &App<A, K>,
    area: Rect,
    layout: &mut LayoutMap,
) {
    if app.load_failed() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(LOAD_FAILED_TEXT, FAILURE))),
            area,
        );
        return;
    }

    if app.load_more_visible() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("[ {} (m) ]", LOAD_MORE_TEXT),
                ACCENT,
            ))),
            area,
        );
        layout.load_more = Some(area);
        return;
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "q 退出 · j/k 选择 · Enter 打开 · a 作者 · r 钓鱼",
            DIM,
        ))),
        area,
    );
}

fn draw_modal<A: FeedApi, K: KvStore>(
    frame: &mut Frame,
    app: &App<A, K>,
    area: Rect,
    layout: &mut LayoutMap,
) {
    let modal = match app.modal() {
        Some(modal) => modal,
        None => return,
    };

    let rect = centered_rect(60, 60, area);
    frame.render_widget(Clear, rect);

    // The closing transition dims the overlay before removal.
    let closing = matches!(modal.phase, ModalPhase::Closing { .. });
    let body = if closing { DIM } else { Style::new() };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.author.clone())
        .style(body);

    let mut lines = vec![
        Line::from(Span::styled(format!("◉ {}", modal.avatar), DIM)),
        Line::from(Span::styled(modal.origin.clone(), ACCENT)),
        Line::from(""),
    ];
    for article in &modal.articles {
        lines.push(Line::from(format!("• {}", article.title)));
        lines.push(Line::from(Span::styled(
            format!("  📅{}", article.created_date()),
            DIM,
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        rect,
    );
    layout.modal = Some(rect);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100 - percent_x - (100 - percent_x) / 2),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100 - percent_y - (100 - percent_y) / 2),
        ])
        .split(horizontal[1]);
    vertical[1]
}
