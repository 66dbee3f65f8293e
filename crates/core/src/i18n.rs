//! Bilingual string tables.
//!
//! Lookups are pure and synchronous; callers resolve text on every render
//! from the current [`Locale`] instead of caching translated strings.

use folio_protocol::{Locale, SectionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Resume,
    ResumeDownload,
    LanguageToggle,
    MenuToggle,
    ContactInfo,
    ContactFormTitle,
    ContactName,
    ContactEmail,
    ContactSubject,
    ContactMessage,
    ContactNamePlaceholder,
    ContactEmailPlaceholder,
    ContactSubjectPlaceholder,
    ContactMessagePlaceholder,
    ContactSend,
    ContactSending,
    ContactSuccess,
    ContactError,
    ContactInvalid,
    Availability,
    FooterAbout,
    FooterQuickLinks,
    FooterRights,
    FooterMadeWith,
}

fn pick(locale: Locale, es: &'static str, en: &'static str) -> &'static str {
    match locale {
        Locale::Primary => es,
        Locale::Secondary => en,
    }
}

pub fn text(locale: Locale, key: TextKey) -> &'static str {
    use TextKey::*;
    let (es, en) = match key {
        Resume => ("Curriculum", "Resume"),
        ResumeDownload => ("Descargar Curriculum", "Download Resume"),
        LanguageToggle => ("Cambiar idioma", "Change language"),
        MenuToggle => ("Abrir o cerrar menú", "Toggle menu"),
        ContactInfo => ("Información de Contacto", "Contact Information"),
        ContactFormTitle => ("Envíame un mensaje", "Send Me a Message"),
        ContactName => ("Tu Nombre", "Your Name"),
        ContactEmail => ("Tu Correo", "Your Email"),
        ContactSubject => ("Asunto", "Subject"),
        ContactMessage => ("Mensaje", "Message"),
        ContactNamePlaceholder => ("Introduce tu nombre", "Enter your name"),
        ContactEmailPlaceholder => ("Introduce tu E-mail", "Enter your E-mail"),
        ContactSubjectPlaceholder => ("Introduce el asunto", "Enter the subject"),
        ContactMessagePlaceholder => (
            "Me gustaría hablar contigo sobre...",
            "I would like to talk to you about...",
        ),
        ContactSend => ("Enviar Mensaje", "Send Message"),
        ContactSending => ("Enviando...", "Sending..."),
        ContactSuccess => (
            "¡Mensaje enviado correctamente! Te responderé pronto.",
            "Message sent successfully! I'll get back to you soon.",
        ),
        ContactError => (
            "No se pudo enviar el mensaje. Por favor, inténtalo de nuevo más tarde.",
            "Failed to send message. Please try again later.",
        ),
        ContactInvalid => (
            "Revisa los campos del formulario.",
            "Please check the form fields.",
        ),
        Availability => (
            "Actualmente disponible para trabajo freelance y abierto a nuevas oportunidades laborales.",
            "I'm currently available for freelance work and open to discussing new job opportunities.",
        ),
        FooterAbout => (
            "Desarrollador web y diseñador apasionado creando experiencias digitales excepcionales con código limpio y soluciones creativas.",
            "A passionate web developer and designer creating exceptional digital experiences with clean code and creative solutions.",
        ),
        FooterQuickLinks => ("Enlaces Rápidos", "Quick Links"),
        FooterRights => ("Todos los derechos reservados.", "All rights reserved."),
        FooterMadeWith => (
            "Diseñado y desarrollado por SLS",
            "Designed and developed by SLS",
        ),
    };
    pick(locale, es, en)
}

/// Navigation label for a section.
pub fn section_label(locale: Locale, section: SectionId) -> &'static str {
    let (es, en) = match section {
        SectionId::Home => ("Inicio", "Home"),
        SectionId::About => ("Sobre mi", "About"),
        SectionId::Skills => ("Habilidades", "Skills"),
        SectionId::Projects => ("Proyectos", "Projects"),
        SectionId::Experience => ("Experiencia", "Experience"),
        SectionId::Education => ("Educación", "Education"),
        SectionId::Contact => ("Contacto", "Contact"),
    };
    pick(locale, es, en)
}

/// Heading shown at the top of a section.
pub fn section_title(locale: Locale, section: SectionId) -> &'static str {
    let (es, en) = match section {
        SectionId::Home => ("Desarrollador Web", "Web Developer"),
        SectionId::About => ("Sobre mí", "About Me"),
        SectionId::Skills => ("Habilidades", "Skills"),
        SectionId::Projects => ("Mis Proyectos", "My Projects"),
        SectionId::Experience => ("Experiencia", "Experience"),
        SectionId::Education => ("Educación", "Education"),
        SectionId::Contact => ("Contacto", "Get In Touch"),
    };
    pick(locale, es, en)
}

/// One-paragraph summary for a section body.
pub fn section_summary(locale: Locale, section: SectionId) -> &'static str {
    let (es, en) = match section {
        SectionId::Home => (
            "Desarrollador Web, Diseñador UI/UX y Mantenimiento Electrónico.",
            "Web Developer, UI/UX Designer and Electronic Maintenance.",
        ),
        SectionId::About => (
            "Desarrollador Web & Diseñador UI/UX con base en Granada, España.",
            "Web Developer & UI/UX Designer based in Granada, Spain.",
        ),
        SectionId::Skills => (
            "Tecnologías y herramientas con las que trabajo a diario.",
            "Technologies and tools I work with every day.",
        ),
        SectionId::Projects => (
            "Una selección de proyectos recientes.",
            "A selection of recent projects.",
        ),
        SectionId::Experience => (
            "Trayectoria profesional y responsabilidades.",
            "Professional background and responsibilities.",
        ),
        SectionId::Education => (
            "Formación académica y certificaciones.",
            "Academic background and certifications.",
        ),
        SectionId::Contact => (
            "Puedes contactarme a través de los siguientes canales o enviarme un mensaje directamente.",
            "Feel free to reach out through the following channels or send me a message directly.",
        ),
    };
    pick(locale, es, en)
}

/// Footer copyright line for `year`.
pub fn copyright(locale: Locale, year: i32) -> String {
    match locale {
        Locale::Primary => format!(
            "© {year} Portfolio de Simón Lavdorenko Shyn. {}",
            text(locale, TextKey::FooterRights)
        ),
        Locale::Secondary => format!(
            "© {year} Simón Lavdorenko Shyn's Portfolio. {}",
            text(locale, TextKey::FooterRights)
        ),
    }
}

/// Accessible label for the theme switch, naming the mode it switches to.
pub fn theme_toggle_label(current: folio_protocol::ThemeMode) -> String {
    format!("Switch to {} mode", current.toggled())
}
