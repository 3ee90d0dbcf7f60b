use std::fs;

use paperkit::{
    I18n,
    lang::{EmbeddedSource, Locale},
    tr,
};

/// The files a plugin would ship.
fn bundled() -> EmbeddedSource {
    EmbeddedSource::new()
        .with(
            "messages.en_us.lang",
            "# Default messages\n\
             greeting = Hello, {0}!\n\
             farewell = Goodbye\n\
             only.default = Default only\n\
             quote = It''s {0}''s turn",
        )
        .with("messages.de.lang", "greeting = Hallo, {0}!\nfarewell = Tschüss")
        .with("messages.de_at.lang", "farewell = Servus")
}

fn enabled(mut i18n: I18n) -> I18n {
    i18n.enable();
    i18n
}

// ===== CASCADE =====

#[test]
fn test_default_bundle_answers_by_default() {
    let i18n = enabled(I18n::new("messages", bundled()).unwrap());

    assert_eq!(i18n.current_locale(), &Locale::default());
    assert_eq!(i18n.tr("farewell", &[]), "Goodbye");
    assert_eq!(tr!(i18n, "greeting", "Alex"), "Hello, Alex!");
}

#[test]
fn test_locale_bundle_falls_back_to_default() {
    let mut i18n = enabled(I18n::new("messages", bundled()).unwrap());
    i18n.set_locale(Some("de_AT"));

    assert_eq!(i18n.current_locale().to_string(), "de_AT");
    assert_eq!(i18n.tr("farewell", &[]), "Servus");
    assert_eq!(tr!(i18n, "greeting", "Alex"), "Hallo, Alex!");
    assert_eq!(i18n.tr("only.default", &[]), "Default only");
}

#[test]
fn test_unknown_key_returns_key() {
    let i18n = enabled(I18n::new("messages", bundled()).unwrap());
    assert_eq!(i18n.tr("no.such.key", &[]), "no.such.key");
    assert_eq!(tr!(i18n, "no.such.key", 1), "no.such.key");
}

#[test]
fn test_unknown_locale_uses_default() {
    let mut i18n = enabled(I18n::new("messages", bundled()).unwrap());
    i18n.set_locale(Some("fr_FR"));

    assert_eq!(i18n.current_locale().language(), "fr");
    assert_eq!(i18n.tr("farewell", &[]), "Goodbye");
}

#[test]
fn test_blank_locale_keeps_current() {
    let mut i18n = enabled(I18n::new("messages", bundled()).unwrap());
    i18n.set_locale(Some("de"));
    i18n.set_locale(Some("  "));
    i18n.set_locale(None);

    assert_eq!(i18n.current_locale().to_string(), "de");
    assert_eq!(i18n.tr("farewell", &[]), "Tschüss");
}

#[test]
fn test_disabled_context_returns_keys() {
    let i18n = I18n::new("messages", bundled()).unwrap();
    assert!(!i18n.is_enabled());
    assert_eq!(tr!(i18n, "greeting", "Alex"), "greeting");
}

// ===== OVERRIDES =====

#[test]
fn test_override_file_wins_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("messages.de.lang"),
        "farewell = Auf Wiedersehen\n",
    )
    .unwrap();

    let mut i18n =
        enabled(I18n::new("messages", bundled()).unwrap().with_data_dir(dir.path()));
    i18n.set_locale(Some("de"));
    assert_eq!(i18n.tr("farewell", &[]), "Auf Wiedersehen");
    // Keys missing from the override come from the bundled files
    assert_eq!(tr!(i18n, "greeting", "Alex"), "Hallo, Alex!");

    fs::write(dir.path().join("messages.de.lang"), "farewell = Ciao\n").unwrap();
    i18n.set_locale(None);
    assert_eq!(i18n.tr("farewell", &[]), "Ciao");
}

#[test]
fn test_missing_override_dir_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut i18n = enabled(
        I18n::new("messages", bundled())
            .unwrap()
            .with_data_dir(dir.path().join("missing")),
    );
    i18n.set_locale(Some("de"));
    assert_eq!(i18n.tr("farewell", &[]), "Tschüss");
}

#[test]
fn test_missing_default_bundle_fails() {
    let err = I18n::new("messages", EmbeddedSource::new().with("messages.de.lang", "a = b"))
        .unwrap_err();
    assert_eq!(err.module(), "lang");
}
