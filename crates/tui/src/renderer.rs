use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::i18n::{self, TextKey};
use folio_protocol::{Placement, ShellCommand, ThemeMode, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::page::{Flow, TerminalPage};

/// Terminals narrower than this get the collapsible menu instead of the
/// full link bar.
const NARROW_COLUMNS: u16 = 80;

fn theme_to_color(token: ThemeToken, mode: ThemeMode) -> Color {
    let dark = mode == ThemeMode::Dark;
    match token {
        ThemeToken::Background | ThemeToken::HeaderBackground => {
            if dark { Color::Rgb(17, 24, 39) } else { Color::Rgb(249, 250, 251) }
        }
        ThemeToken::Surface | ThemeToken::HeaderScrolledBackground => {
            if dark { Color::Rgb(31, 41, 55) } else { Color::White }
        }
        ThemeToken::Border => {
            if dark { Color::Rgb(55, 65, 81) } else { Color::Rgb(229, 231, 235) }
        }
        ThemeToken::TextPrimary | ThemeToken::SectionTitle => {
            if dark { Color::White } else { Color::Rgb(17, 24, 39) }
        }
        ThemeToken::TextSecondary | ThemeToken::NavLink | ThemeToken::ToggleIcon => {
            if dark { Color::Rgb(209, 213, 219) } else { Color::Rgb(55, 65, 81) }
        }
        ThemeToken::TextMuted => {
            if dark { Color::Rgb(156, 163, 175) } else { Color::Rgb(75, 85, 99) }
        }
        ThemeToken::Brand
        | ThemeToken::NavLinkActive
        | ThemeToken::NavLinkHover
        | ThemeToken::SectionRule => {
            if dark { Color::Rgb(96, 165, 250) } else { Color::Rgb(37, 99, 235) }
        }
        ThemeToken::ToggleIconSun => Color::Rgb(251, 191, 36),
        ThemeToken::AccentFill => Color::Rgb(37, 99, 235),
        ThemeToken::AccentText => Color::White,
        ThemeToken::StatusSuccessBackground => Color::Rgb(20, 83, 45),
        ThemeToken::StatusSuccessText => Color::Rgb(134, 239, 172),
        ThemeToken::StatusErrorBackground => Color::Rgb(127, 29, 29),
        ThemeToken::StatusErrorText => Color::Rgb(252, 165, 165),
    }
}

/// Header bar spans and, when the menu is open, the panel lines.
fn shell_lines(
    commands: &[ShellCommand],
    mode: ThemeMode,
    narrow: bool,
) -> (Vec<Span<'static>>, Vec<Line<'static>>) {
    let mut bar = Vec::new();
    let mut panel = Vec::new();
    let mut link_number = 0;
    for cmd in commands {
        match cmd {
            ShellCommand::Brand { color, .. } => {
                bar.push(Span::styled(
                    " SLS ",
                    Style::default()
                        .fg(theme_to_color(*color, mode))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            ShellCommand::NavLink {
                label,
                active,
                color,
                placement,
                ..
            } => {
                let mut style = Style::default().fg(theme_to_color(*color, mode));
                if *active {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                match placement {
                    Placement::Bar => {
                        link_number += 1;
                        if !narrow {
                            bar.push(Span::styled(format!(" {link_number}:{label} "), style));
                        }
                    }
                    Placement::Panel => {
                        let marker = if *active { "▸ " } else { "  " };
                        panel.push(Line::from(Span::styled(format!("{marker}{label}"), style)));
                    }
                }
            }
            ShellCommand::ThemeToggle { current, color, .. } => {
                // Shows the mode a press switches to.
                let icon = match current {
                    ThemeMode::Dark => "☀",
                    ThemeMode::Light => "☾",
                };
                bar.push(Span::styled(
                    format!(" {icon} "),
                    Style::default().fg(theme_to_color(*color, mode)),
                ));
            }
            ShellCommand::LocaleToggle { badge, .. } => {
                bar.push(Span::styled(
                    format!(" {badge} "),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            ShellCommand::ResumeLink {
                label, placement, ..
            } => {
                let style = Style::default()
                    .fg(theme_to_color(ThemeToken::AccentText, mode))
                    .bg(theme_to_color(ThemeToken::AccentFill, mode));
                match placement {
                    Placement::Bar if !narrow => {
                        bar.push(Span::styled(format!(" {label} "), style));
                    }
                    Placement::Bar => {}
                    Placement::Panel => panel.push(Line::from(Span::styled(
                        format!("  {label} "),
                        style,
                    ))),
                }
            }
            ShellCommand::MenuButton { open, .. } => {
                if narrow {
                    bar.push(Span::raw(if *open { " ✕ " } else { " ≡ " }));
                }
            }
            ShellCommand::BeginHeader { .. }
            | ShellCommand::BeginPanel
            | ShellCommand::EndPanel
            | ShellCommand::EndHeader => {}
        }
    }
    (bar, panel)
}

fn draw(frame: &mut Frame, page: &TerminalPage) {
    let area = frame.area();
    let portfolio = page.portfolio();
    let mode = portfolio.theme();
    let locale = portfolio.locale();
    let narrow = area.width < NARROW_COLUMNS;
    let commands = portfolio.shell_commands();

    let header_bg = commands.iter().find_map(|cmd| match cmd {
        ShellCommand::BeginHeader { background, .. } => Some(*background),
        _ => None,
    });
    let header_style = Style::default().bg(theme_to_color(
        header_bg.unwrap_or(ThemeToken::HeaderBackground),
        mode,
    ));
    let page_style = Style::default()
        .fg(theme_to_color(ThemeToken::TextSecondary, mode))
        .bg(theme_to_color(ThemeToken::Background, mode));

    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    // Body: every block's lines padded to its height, scrolled as one document.
    let mut lines: Vec<Line> = Vec::new();
    for block in page.blocks() {
        for (i, text) in block.lines.iter().enumerate() {
            let style = match i {
                0 => Style::default()
                    .fg(theme_to_color(ThemeToken::SectionTitle, mode))
                    .add_modifier(Modifier::BOLD),
                1 => Style::default().fg(theme_to_color(ThemeToken::SectionRule, mode)),
                _ => Style::default(),
            };
            lines.push(Line::styled(text.clone(), style));
        }
        let padding = (block.height as usize).saturating_sub(block.lines.len());
        lines.extend(std::iter::repeat_n(Line::default(), padding));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .style(page_style)
            .scroll((page.scroll() as u16, 0)),
        body_area,
    );

    let (bar, panel) = shell_lines(&commands, mode, narrow);
    frame.render_widget(Paragraph::new(Line::from(bar)).style(header_style), header_area);

    if !panel.is_empty() {
        let height = (panel.len() as u16 + 2).min(body_area.height);
        let panel_area = Rect::new(body_area.x, body_area.y, body_area.width, height);
        frame.render_widget(Clear, panel_area);
        frame.render_widget(
            Paragraph::new(panel).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", i18n::text(locale, TextKey::MenuToggle)))
                    .style(header_style.fg(theme_to_color(ThemeToken::TextPrimary, mode))),
            ),
            panel_area,
        );
    }

    let active = i18n::section_label(locale, portfolio.active_section());
    let mut status = format!(
        " {active} | j/k scroll | 1-7 jump | t theme | l {} | m menu | r resume | q quit ",
        locale.toggled().badge()
    );
    if let Some(notice) = page.notice() {
        status.push_str(&format!("| {notice} "));
    }
    frame.render_widget(
        Paragraph::new(status).style(
            Style::default()
                .fg(theme_to_color(ThemeToken::TextMuted, mode))
                .bg(theme_to_color(ThemeToken::Surface, mode)),
        ),
        status_area,
    );
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    page: &mut TerminalPage,
) -> Result<()> {
    let started = Instant::now();
    loop {
        let size = terminal.size()?;
        // Header and status line take one row each.
        page.resize(size.width, size.height.saturating_sub(2));
        page.refresh(started.elapsed().as_secs_f64() * 1000.0);
        terminal.draw(|frame| draw(frame, page))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if page.handle_key(key.code) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => page.scroll_by(3.0),
                    MouseEventKind::ScrollUp => page.scroll_by(-3.0),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

/// Run the interactive loop until the user quits.
pub fn run_tui(mut page: TerminalPage) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut page);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::state::MemorySettings;
    use folio_core::{Portfolio, SiteConfig};

    fn commands(menu_open: bool) -> Vec<ShellCommand> {
        let mut portfolio = Portfolio::new(SiteConfig::default(), Box::new(MemorySettings::new()));
        if menu_open {
            portfolio.dispatch(folio_core::navigation::NavIntent::ToggleMenu);
        }
        portfolio.shell_commands()
    }

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wide_bar_lists_numbered_links() {
        let (bar, panel) = shell_lines(&commands(false), ThemeMode::Light, false);
        let bar = text(&bar);
        assert!(bar.contains("1:Inicio"));
        assert!(bar.contains("7:Contacto"));
        assert!(bar.contains(" ES "));
        assert!(!bar.contains('≡'));
        assert!(panel.is_empty());
    }

    #[test]
    fn narrow_bar_collapses_into_panel() {
        let (bar, panel) = shell_lines(&commands(true), ThemeMode::Dark, true);
        let bar = text(&bar);
        assert!(!bar.contains("Inicio"));
        assert!(bar.contains('✕'));
        assert!(bar.contains('☀'));
        // Seven links plus the resume link.
        assert_eq!(panel.len(), 8);
    }
}
