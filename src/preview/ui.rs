// UI rendering logic
//
// Every frame is drawn from the style descriptors alone: the renderer reads
// controller state through `Page`, asks `style` what it means and paints it.
// While drawing it records the hit map the next mouse event is resolved
// against.

use super::app::PreviewApp;
use super::layout::Variant;
use crate::logging::{LogEntry, LogLevel};
use crate::site::{self, hero, Link, NavEntry, Node, Product};
use crate::style::{self, Hamburger, NavSurface};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;
const ELEVATED_BG: Color = Color::Rgb(18, 22, 34);

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut PreviewApp) {
    let area = f.area();
    app.set_width(area.width);
    app.hits.clear();

    // - Nav bar (3 lines fixed)
    // - Hero (fills remaining space)
    // - Log strip (1 line)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // Hero first: nav overlays are painted (and hit-tested) above it
    render_hero(f, chunks[1], app);

    match app.variant {
        Variant::Desktop => render_desktop_nav(f, chunks[0], area, app),
        Variant::Mobile => render_mobile_nav(f, chunks[0], area, app),
    }

    render_log_strip(f, chunks[2], app);
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn bar_block(scrolled: bool) -> Block<'static> {
    match style::nav_surface(scrolled) {
        NavSurface::Elevated => Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .style(Style::default().bg(ELEVATED_BG)),
        NavSurface::Transparent => Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(MUTED)),
    }
}

/// Paint `text` at `(x, y)` inside `bounds`, returning the occupied rect
fn put(f: &mut Frame, bounds: Rect, x: u16, y: u16, text: &str, style: Style) -> Rect {
    let rect = Rect::new(x, y, text_width(text), 1).intersection(bounds);
    f.render_widget(Paragraph::new(Span::styled(text.to_string(), style)), rect);
    rect
}

// ─────────────────────────────────────────────────────────────────────────────
// Desktop
// ─────────────────────────────────────────────────────────────────────────────

fn render_desktop_nav(f: &mut Frame, area: Rect, screen: Rect, app: &mut PreviewApp) {
    let block = bar_block(app.page.is_scrolled());
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.hits.push(area, Node::NavBar);

    let row = inner.y + inner.height.saturating_sub(1) / 2;
    let mut x = inner.x + 1;

    let brand = put(
        f,
        inner,
        x,
        row,
        site::BRAND,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );
    app.hits.push(brand, Node::Logo);
    x = x.saturating_add(brand.width + 4);

    let flyout = style::flyout(app.page.dropdown().is_open());
    let mut trigger = Rect::default();

    for entry in site::NAV_ENTRIES {
        match entry {
            NavEntry::Link(link) => {
                let link_style = if link == Link::Contact {
                    Style::default().fg(Color::Black).bg(ACCENT)
                } else {
                    Style::default()
                };
                let label = format!(" {} ", link.label());
                let rect = put(f, inner, x, row, &label, link_style);
                app.hits.push(rect, Node::Link(link));
                x = x.saturating_add(rect.width + 2);
            }
            NavEntry::Products => {
                let chevron = if flyout.chevron_flipped { "▴" } else { "▾" };
                let label = format!(" {} {} ", site::PRODUCTS_LABEL, chevron);
                let trigger_style = if flyout.visible {
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                trigger = put(f, inner, x, row, &label, trigger_style);
                // The container spans down to the flyout so the pointer can cross the border
                let container = Rect::new(
                    trigger.x,
                    trigger.y,
                    trigger.width,
                    area.bottom().saturating_sub(trigger.y),
                );
                app.hits.push(container, Node::ProductsMenu);
                app.hits.push(trigger, Node::ProductsTrigger);
                x = x.saturating_add(trigger.width + 2);
            }
        }
    }

    if flyout.visible {
        render_flyout(f, trigger, area.bottom(), screen, app);
    }
}

fn render_flyout(f: &mut Frame, trigger: Rect, top: u16, screen: Rect, app: &mut PreviewApp) {
    let content_width = Product::ALL
        .iter()
        .map(|p| text_width(p.label()).max(text_width(p.description())))
        .max()
        .unwrap_or(0);
    let rows = u16::try_from(Product::ALL.len() * 2).unwrap_or(u16::MAX);
    let panel = Rect::new(
        trigger.x.saturating_sub(1),
        top,
        content_width.saturating_add(4),
        rows.saturating_add(2),
    )
    .intersection(screen);

    f.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(ELEVATED_BG));
    let inner = block.inner(panel);
    f.render_widget(block, panel);
    app.hits.push(panel, Node::ProductsPanel);

    for (index, product) in Product::ALL.iter().enumerate() {
        let y = inner.y + u16::try_from(index * 2).unwrap_or(u16::MAX);
        let entry = Rect::new(inner.x, y, inner.width, 2).intersection(inner);
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", product.label()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", product.description()),
                Style::default().fg(MUTED),
            )),
        ];
        f.render_widget(Paragraph::new(lines), entry);
        app.hits.push(entry, Node::ProductEntry(*product));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mobile
// ─────────────────────────────────────────────────────────────────────────────

fn render_mobile_nav(f: &mut Frame, area: Rect, screen: Rect, app: &mut PreviewApp) {
    let block = bar_block(app.page.is_scrolled());
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.hits.push(area, Node::NavBar);

    let row = inner.y + inner.height.saturating_sub(1) / 2;
    let brand = put(
        f,
        inner,
        inner.x + 1,
        row,
        site::BRAND,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );
    app.hits.push(brand, Node::Logo);

    let menu = app.page.menu().state();
    let glyph = match style::hamburger(menu.panel_open) {
        Hamburger::Bars => " ≡ ",
        Hamburger::Cross => " ✕ ",
    };
    let x = inner.right().saturating_sub(text_width(glyph) + 1);
    let button = put(f, inner, x, row, glyph, Style::default().fg(ACCENT));
    app.hits.push(button, Node::Hamburger);

    if menu.panel_open {
        render_mobile_panel(f, area.bottom(), screen, menu.submenu_open, app);
    }
}

/// One row of the mobile panel
enum PanelRow {
    Link(Link),
    Products,
    Product(Product),
}

fn render_mobile_panel(
    f: &mut Frame,
    top: u16,
    screen: Rect,
    submenu_open: bool,
    app: &mut PreviewApp,
) {
    let submenu = style::submenu(submenu_open);

    let mut rows = Vec::new();
    for entry in site::NAV_ENTRIES {
        match entry {
            NavEntry::Link(link) => rows.push(PanelRow::Link(link)),
            NavEntry::Products => {
                rows.push(PanelRow::Products);
                if submenu.expanded {
                    rows.extend(Product::ALL.iter().map(|&p| PanelRow::Product(p)));
                }
            }
        }
    }

    let height = u16::try_from(rows.len()).unwrap_or(u16::MAX).saturating_add(2);
    let panel = Rect::new(screen.x, top, screen.width, height).intersection(screen);
    f.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(ELEVATED_BG));
    let inner = block.inner(panel);
    f.render_widget(block, panel);
    app.hits.push(panel, Node::MobilePanel);

    // Container for the nested entries goes in first so the entries sit above it
    let product_rows: Vec<u16> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches!(row, PanelRow::Product(_)))
        .filter_map(|(index, _)| u16::try_from(index).ok())
        .collect();
    if let (Some(first), Some(last)) = (product_rows.first(), product_rows.last()) {
        let nested = Rect::new(inner.x, inner.y + first, inner.width, last - first + 1);
        app.hits.push(nested.intersection(inner), Node::MobileSubmenu);
    }

    for (index, row) in rows.iter().enumerate() {
        let y = inner.y + u16::try_from(index).unwrap_or(u16::MAX);
        let line = Rect::new(inner.x, y, inner.width, 1).intersection(inner);
        let (text, row_style, node) = match row {
            PanelRow::Link(link) => (
                format!(" {}", link.label()),
                Style::default(),
                Node::MobileLink(*link),
            ),
            PanelRow::Products => {
                let chevron = if submenu.chevron_flipped { "▴" } else { "▾" };
                (
                    format!(" {} {}", site::PRODUCTS_LABEL, chevron),
                    Style::default().add_modifier(Modifier::BOLD),
                    Node::MobileProducts,
                )
            }
            PanelRow::Product(product) => (
                format!("   {}  {}", product.label(), product.description()),
                Style::default().fg(MUTED),
                Node::MobileProductEntry(*product),
            ),
        };
        f.render_widget(Paragraph::new(Span::styled(text, row_style)), line);
        app.hits.push(line, node);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hero
// ─────────────────────────────────────────────────────────────────────────────

fn render_hero(f: &mut Frame, area: Rect, app: &mut PreviewApp) {
    app.hits.push(area, Node::Hero);

    let row_height = f64::from(app.geometry().row_height);
    let parallax = app.page.parallax();
    let scroll_rows = i32::from(app.scroll_rows());
    // Background shifts down by translate_y while the page scrolls up
    let parallax_rows = (parallax.translate_y / row_height).round() as i32;
    let backdrop_shift = (scroll_rows - parallax_rows).max(0);
    render_backdrop(f, area, backdrop_shift, parallax.scale);

    let elements: [(i32, &str, Style); 4] = [
        (1, hero::EYEBROW, Style::default().fg(ACCENT)),
        (3, hero::HEADLINE[0], Style::default().add_modifier(Modifier::BOLD)),
        (4, hero::HEADLINE[1], Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        (6, hero::BODY, Style::default().fg(Color::Gray)),
    ];

    for (index, (offset, text, text_style)) in elements.iter().enumerate() {
        if !app.page.reveal_style(index).shown {
            continue;
        }
        if let Some(y) = hero_row(area, *offset - scroll_rows) {
            let line = Rect::new(area.x, y, area.width, 1);
            f.render_widget(
                Paragraph::new(Span::styled(text.to_string(), *text_style))
                    .alignment(Alignment::Center),
                line,
            );
        }
    }

    let actions_index = elements.len();
    if app.page.reveal_style(actions_index).shown {
        if let Some(y) = hero_row(area, 8 - scroll_rows) {
            render_actions(f, area, y, app);
        }
    }
}

/// Screen row for a hero-relative row, if it is visible
fn hero_row(area: Rect, relative: i32) -> Option<u16> {
    let y = i32::from(area.y) + relative;
    if y >= i32::from(area.y) && y < i32::from(area.bottom()) {
        u16::try_from(y).ok()
    } else {
        None
    }
}

fn render_backdrop(f: &mut Frame, area: Rect, shift: i32, scale: f64) {
    // Wider spacing reads as a zoomed-in backdrop
    let spacing = ((6.0 * scale).round() as usize).max(2);
    let lines: Vec<Line> = (0..area.height)
        .map(|row| {
            let phase = (i64::from(row) + i64::from(shift)).rem_euclid(spacing as i64) as usize;
            let pattern: String = (0..area.width)
                .map(|col| {
                    if (usize::from(col) + phase) % spacing == 0 {
                        '·'
                    } else {
                        ' '
                    }
                })
                .collect();
            Line::from(Span::styled(pattern, Style::default().fg(MUTED)))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_actions(f: &mut Frame, area: Rect, y: u16, app: &mut PreviewApp) {
    let primary = format!("[ {} ]", hero::PRIMARY_ACTION);
    let secondary = format!("[ {} ]", hero::SECONDARY_ACTION);
    let gap = 3;
    let total = text_width(&primary) + gap + text_width(&secondary);
    let x = area.x + area.width.saturating_sub(total) / 2;

    let first = put(
        f,
        area,
        x,
        y,
        &primary,
        Style::default().fg(Color::Black).bg(ACCENT),
    );
    app.hits.push(first, Node::HeroPrimary);

    let second = put(
        f,
        area,
        x.saturating_add(first.width + gap),
        y,
        &secondary,
        Style::default().fg(ACCENT),
    );
    app.hits.push(second, Node::HeroSecondary);
}

// ─────────────────────────────────────────────────────────────────────────────
// Log strip
// ─────────────────────────────────────────────────────────────────────────────

fn render_log_strip(f: &mut Frame, area: Rect, app: &PreviewApp) {
    let hint = " q quit · r remount · t toggle ";
    let mut spans = match app.log_buffer.latest() {
        Some(entry) => format_log_entry(&entry),
        None => vec![Span::styled(" no log output yet", Style::default().fg(MUTED))],
    };

    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    let pad = usize::from(area.width).saturating_sub(used + hint.width());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(hint, Style::default().fg(MUTED)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn format_log_entry(entry: &LogEntry) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {} ", entry.timestamp.format("%H:%M:%S%.3f")),
            Style::default().fg(MUTED),
        ),
        Span::styled(format!("{:5} ", entry.level.as_str()), log_level_style(&entry.level)),
        Span::raw(entry.message.clone()),
    ]
}

fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Debug => Style::default().fg(Color::Blue),
        LogLevel::Trace => Style::default().fg(MUTED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut PreviewApp, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
    }

    fn node_of_kind(app: &PreviewApp, width: u16, height: u16, wanted: Node) -> Option<(u16, u16)> {
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .find(|&(x, y)| app.hits.hit(x, y) == wanted)
    }

    #[test]
    fn hidden_flyout_records_no_entries() {
        let mut app = PreviewApp::new(&Config::default(), LogBuffer::new());
        render(&mut app, 120, 30);

        assert_eq!(app.variant, Variant::Desktop);
        assert!(node_of_kind(&app, 120, 30, Node::ProductsTrigger).is_some());
        assert!(node_of_kind(&app, 120, 30, Node::ProductEntry(Product::IcDesign)).is_none());
    }

    #[test]
    fn hovering_trigger_renders_flyout_entries() {
        let mut app = PreviewApp::new(&Config::default(), LogBuffer::new());
        render(&mut app, 120, 30);
        let (x, y) = node_of_kind(&app, 120, 30, Node::ProductsTrigger).unwrap();

        app.pointer_moved(x, y);
        render(&mut app, 120, 30);

        let (ex, ey) =
            node_of_kind(&app, 120, 30, Node::ProductEntry(Product::LabEquipment)).unwrap();
        // Moving down into the flyout keeps it open
        app.pointer_moved(ex, ey);
        assert!(app.page.dropdown().is_open());
    }

    #[test]
    fn narrow_terminal_renders_mobile_panel() {
        let mut app = PreviewApp::new(&Config::default(), LogBuffer::new());
        render(&mut app, 60, 30);
        assert_eq!(app.variant, Variant::Mobile);

        let (x, y) = node_of_kind(&app, 60, 30, Node::Hamburger).unwrap();
        app.pointer_pressed(x, y);
        render(&mut app, 60, 30);
        let (px, py) = node_of_kind(&app, 60, 30, Node::MobileProducts).unwrap();
        app.pointer_pressed(px, py);
        render(&mut app, 60, 30);

        let (lx, ly) =
            node_of_kind(&app, 60, 30, Node::MobileProductEntry(Product::IcDesign)).unwrap();
        app.pointer_pressed(lx, ly);

        let menu = app.page.menu().state();
        assert!(!menu.panel_open);
        assert!(!menu.submenu_open);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = PreviewApp::new(&Config::default(), LogBuffer::new());
        app.page.interact(crate::page::Interaction::PointerEnter);
        app.page.advance_to(std::time::Duration::from_secs(5));
        render(&mut app, 12, 6);
        render(&mut app, 200, 6);
    }
}
