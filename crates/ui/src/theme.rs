use folio_protocol::{ThemeMode, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

// Tailwind gray/blue scale.
const GRAY_50: ResolvedColor = ResolvedColor::rgb(0xf9, 0xfa, 0xfb);
const GRAY_200: ResolvedColor = ResolvedColor::rgb(0xe5, 0xe7, 0xeb);
const GRAY_300: ResolvedColor = ResolvedColor::rgb(0xd1, 0xd5, 0xdb);
const GRAY_400: ResolvedColor = ResolvedColor::rgb(0x9c, 0xa3, 0xaf);
const GRAY_600: ResolvedColor = ResolvedColor::rgb(0x4b, 0x55, 0x63);
const GRAY_700: ResolvedColor = ResolvedColor::rgb(0x37, 0x41, 0x51);
const GRAY_800: ResolvedColor = ResolvedColor::rgb(0x1f, 0x29, 0x37);
const GRAY_900: ResolvedColor = ResolvedColor::rgb(0x11, 0x18, 0x27);
const BLUE_400: ResolvedColor = ResolvedColor::rgb(0x60, 0xa5, 0xfa);
const BLUE_500: ResolvedColor = ResolvedColor::rgb(0x3b, 0x82, 0xf6);
const BLUE_600: ResolvedColor = ResolvedColor::rgb(0x25, 0x63, 0xeb);
const AMBER_400: ResolvedColor = ResolvedColor::rgb(0xfb, 0xbf, 0x24);

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => GRAY_900,
        Surface => GRAY_800,
        Border => GRAY_700,

        TextPrimary => ResolvedColor::rgb(0xff, 0xff, 0xff),
        TextSecondary => GRAY_300,
        TextMuted => GRAY_400,

        HeaderBackground => ResolvedColor::rgba(0, 0, 0, 0),
        HeaderScrolledBackground => ResolvedColor::rgba(0x11, 0x18, 0x27, 230), // gray-900/90
        Brand => BLUE_400,
        NavLink => GRAY_300,
        NavLinkActive => BLUE_400,
        NavLinkHover => BLUE_400,
        ToggleIcon => GRAY_300,
        ToggleIconSun => AMBER_400,

        AccentFill => BLUE_600,
        AccentText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        SectionTitle => ResolvedColor::rgb(0xff, 0xff, 0xff),
        SectionRule => BLUE_500,

        StatusSuccessBackground => ResolvedColor::rgba(0x14, 0x53, 0x2d, 128), // green-900/50
        StatusSuccessText => ResolvedColor::rgb(0x86, 0xef, 0xac),
        StatusErrorBackground => ResolvedColor::rgba(0x7f, 0x1d, 0x1d, 128), // red-900/50
        StatusErrorText => ResolvedColor::rgb(0xfc, 0xa5, 0xa5),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => GRAY_50,
        Surface => ResolvedColor::rgb(0xff, 0xff, 0xff),
        Border => GRAY_200,

        TextPrimary => GRAY_900,
        TextSecondary => GRAY_700,
        TextMuted => GRAY_600,

        HeaderBackground => ResolvedColor::rgba(0, 0, 0, 0),
        HeaderScrolledBackground => ResolvedColor::rgba(0xff, 0xff, 0xff, 230), // white/90
        Brand => BLUE_600,
        NavLink => GRAY_800,
        NavLinkActive => BLUE_600,
        NavLinkHover => BLUE_600,
        ToggleIcon => GRAY_700,
        ToggleIconSun => AMBER_400,

        AccentFill => BLUE_600,
        AccentText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        SectionTitle => GRAY_900,
        SectionRule => BLUE_600,

        StatusSuccessBackground => ResolvedColor::rgb(0xdc, 0xfc, 0xe7),
        StatusSuccessText => ResolvedColor::rgb(0x16, 0x65, 0x34),
        StatusErrorBackground => ResolvedColor::rgb(0xfe, 0xe2, 0xe2),
        StatusErrorText => ResolvedColor::rgb(0x99, 0x1b, 0x1b),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_DISPLAY: f32 = 36.0;
pub const FONT_TITLE: f32 = 28.0;
pub const FONT_BODY: f32 = 16.0;
pub const FONT_NAV: f32 = 14.0;
pub const FONT_CAPTION: f32 = 12.0;

/// Viewports narrower than this get the collapsible menu.
pub const NARROW_BREAKPOINT: f32 = 768.0;

// ── egui visual presets ────────────────────────────────────────────────────

pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    match mode {
        ThemeMode::Dark => folio_dark_visuals(),
        ThemeMode::Light => folio_light_visuals(),
    }
}

fn folio_dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = GRAY_900.to_color32();
    v.window_fill = GRAY_800.to_color32();
    v.extreme_bg_color = GRAY_900.to_color32();
    v.faint_bg_color = GRAY_800.to_color32();
    v.widgets.inactive.bg_fill = GRAY_800.to_color32();
    v.widgets.hovered.bg_fill = GRAY_700.to_color32();
    v.widgets.active.bg_fill = BLUE_600.to_color32();
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x60, 0xa5, 0xfa, 60);
    v.selection.stroke = egui::Stroke::new(1.0, BLUE_400.to_color32());
    v.hyperlink_color = BLUE_400.to_color32();
    apply_corners(&mut v);
    v
}

fn folio_light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = GRAY_50.to_color32();
    v.window_fill = egui::Color32::WHITE;
    v.extreme_bg_color = egui::Color32::WHITE;
    v.faint_bg_color = GRAY_200.to_color32();
    v.widgets.inactive.bg_fill = GRAY_200.to_color32();
    v.widgets.hovered.bg_fill = GRAY_300.to_color32();
    v.widgets.active.bg_fill = BLUE_600.to_color32();
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0x25, 0x63, 0xeb, 50);
    v.selection.stroke = egui::Stroke::new(1.0, BLUE_600.to_color32());
    v.hyperlink_color = BLUE_600.to_color32();
    apply_corners(&mut v);
    v
}

fn apply_corners(v: &mut egui::Visuals) {
    v.window_corner_radius = egui::CornerRadius::same(8);
    v.menu_corner_radius = egui::CornerRadius::same(8);
    v.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    v.widgets.active.corner_radius = egui::CornerRadius::same(6);
    v.widgets.open.corner_radius = egui::CornerRadius::same(6);
}

/// Apply the page's typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_NAV),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    ctx.set_style(style);
}
