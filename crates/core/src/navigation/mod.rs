pub mod registry;
pub mod resolver;
pub mod shell;

pub use registry::{Section, SectionRegistry};
pub use resolver::ActiveSectionResolver;
pub use shell::{NavContext, NavEffect, NavIntent, NavigationShell};
