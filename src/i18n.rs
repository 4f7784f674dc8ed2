// ==========================================
// PIAR Portal - internationalization
// ==========================================
// rust-i18n, locales/es-CO.yml (fallback) and locales/en.yml
// Note: the rust_i18n::i18n! macro is invoked in lib.rs
// ==========================================

/// Current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Switch locale ("es-CO" or "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Translate a message without arguments
///
/// # Example
/// ```no_run
/// use piar_portal::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Translate a message with `%{name}` placeholders
///
/// # Example
/// ```no_run
/// use piar_portal::i18n::t_with_args;
/// let msg = t_with_args("errors.validation.required_field", &[("field", "email")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
