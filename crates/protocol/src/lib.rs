pub mod commands;
pub mod locale;
pub mod section;
pub mod theme;
pub mod types;

pub use commands::{Placement, ShellCommand};
pub use locale::Locale;
pub use section::SectionId;
pub use theme::{ThemeMode, ThemeToken};
pub use types::Rect;
