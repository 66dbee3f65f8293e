use egui::{Button, RichText};
use folio_core::navigation::NavIntent;
use folio_protocol::{Placement, SectionId, ShellCommand, ThemeMode, ThemeToken};

use crate::theme::{self, FONT_NAV};

fn link_text(label: &str, color: ThemeToken, active: bool, mode: ThemeMode) -> RichText {
    let text = RichText::new(label)
        .size(FONT_NAV)
        .color(theme::resolve(color, mode));
    if active { text.strong().underline() } else { text }
}

fn accent_button(label: &str, mode: ThemeMode) -> Button<'static> {
    Button::new(
        RichText::new(label.to_owned())
            .size(FONT_NAV)
            .color(theme::resolve(ThemeToken::AccentText, mode)),
    )
    .fill(theme::resolve(ThemeToken::AccentFill, mode))
}

/// Header background for a shell command list.
pub fn header_fill(commands: &[ShellCommand], mode: ThemeMode) -> egui::Color32 {
    let token = commands
        .iter()
        .find_map(|cmd| match cmd {
            ShellCommand::BeginHeader { background, .. } => Some(*background),
            _ => None,
        })
        .unwrap_or(ThemeToken::HeaderBackground);
    theme::resolve(token, mode)
}

/// Draw the header described by `commands` and return what the user
/// clicked this frame.
///
/// When `narrow` the bar keeps only the brand, the toggles and the menu
/// button; links and the resume button move to the panel, which the
/// command list only contains while the menu is open.
pub fn render_shell(
    ui: &mut egui::Ui,
    commands: &[ShellCommand],
    mode: ThemeMode,
    narrow: bool,
) -> Vec<NavIntent> {
    let mut intents = Vec::new();
    let split = commands
        .iter()
        .position(|c| matches!(c, ShellCommand::BeginPanel))
        .unwrap_or(commands.len());
    let (bar, panel) = commands.split_at(split);

    ui.horizontal(|ui| {
        for cmd in bar {
            match cmd {
                ShellCommand::Brand { href, color } => {
                    let text = RichText::new("SLS")
                        .size(theme::FONT_TITLE * 0.8)
                        .strong()
                        .color(theme::resolve(*color, mode));
                    if ui.add(Button::new(text).frame(false)).clicked() {
                        let target = SectionId::from_anchor(href).unwrap_or(SectionId::Home);
                        intents.push(NavIntent::JumpTo(target));
                    }
                }
                ShellCommand::NavLink {
                    section,
                    label,
                    active,
                    color,
                    placement: Placement::Bar,
                    ..
                } if !narrow => {
                    let text = link_text(label, *color, *active, mode);
                    if ui.add(Button::new(text).frame(false)).clicked() {
                        intents.push(NavIntent::JumpTo(*section));
                    }
                }
                ShellCommand::ThemeToggle {
                    current,
                    aria_label,
                    color,
                } => {
                    let icon = match current {
                        ThemeMode::Dark => "☀",
                        ThemeMode::Light => "🌙",
                    };
                    let text = RichText::new(icon).color(theme::resolve(*color, mode));
                    if ui
                        .add(Button::new(text).frame(false))
                        .on_hover_text(aria_label.as_str())
                        .clicked()
                    {
                        intents.push(NavIntent::ToggleTheme);
                    }
                }
                ShellCommand::LocaleToggle {
                    badge, aria_label, ..
                } => {
                    if ui
                        .button(RichText::new(badge.as_str()).strong())
                        .on_hover_text(aria_label.as_str())
                        .clicked()
                    {
                        intents.push(NavIntent::ToggleLocale);
                    }
                }
                ShellCommand::ResumeLink {
                    label,
                    placement: Placement::Bar,
                    ..
                } if !narrow => {
                    if ui.add(accent_button(label, mode)).clicked() {
                        intents.push(NavIntent::OpenResume);
                    }
                }
                ShellCommand::MenuButton { open, aria_label } if narrow => {
                    let icon = if *open { "✕" } else { "☰" };
                    if ui
                        .button(icon)
                        .on_hover_text(aria_label.as_str())
                        .clicked()
                    {
                        intents.push(NavIntent::ToggleMenu);
                    }
                }
                _ => {}
            }
        }
    });

    if narrow && !panel.is_empty() {
        ui.separator();
        ui.vertical(|ui| {
            for cmd in panel {
                match cmd {
                    ShellCommand::NavLink {
                        section,
                        label,
                        active,
                        color,
                        ..
                    } => {
                        let text = link_text(label, *color, *active, mode);
                        if ui.add(Button::new(text).frame(false)).clicked() {
                            intents.push(NavIntent::JumpTo(*section));
                        }
                    }
                    ShellCommand::ResumeLink { label, .. } => {
                        if ui.add(accent_button(label, mode)).clicked() {
                            intents.push(NavIntent::OpenResume);
                        }
                    }
                    _ => {}
                }
            }
        });
    }

    intents
}
