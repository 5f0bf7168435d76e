//! Registration source generation.
//!
//! Templates ship inside the crate and are filled by plain placeholder
//! replacement: worker URL, scope, and the auto-update flag. Nothing else in
//! a template is interpreted, so output is a pure function of the options.

use crate::constants::{PLACEHOLDER_AUTO_UPDATE, PLACEHOLDER_SCOPE, PLACEHOLDER_SW_URL};
use crate::options::ResolvedOptions;

/// Which template family to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterMode {
    /// Final emitted code
    Build,
    /// Served unbundled by a dev server; never registers a worker
    Dev,
}

/// Which template to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// ES module exporting `registerSW(options)`
    Register,
    /// ES module exporting the resolved registration settings
    RegisterType,
    /// Classic, non-module script that registers on page load
    Script,
}

fn template(mode: RegisterMode, kind: TemplateKind) -> &'static str {
    match (mode, kind) {
        (RegisterMode::Build, TemplateKind::Register) => include_str!("../client/build/register.js"),
        (RegisterMode::Build, TemplateKind::RegisterType) => {
            include_str!("../client/build/register-type.js")
        }
        (RegisterMode::Build, TemplateKind::Script) => include_str!("../client/build/script.js"),
        (RegisterMode::Dev, TemplateKind::Register) => include_str!("../client/dev/register.js"),
        (RegisterMode::Dev, TemplateKind::RegisterType) => {
            include_str!("../client/dev/register-type.js")
        }
        (RegisterMode::Dev, TemplateKind::Script) => include_str!("../client/dev/script.js"),
    }
}

/// Render the `kind` template of `mode` for the resolved options.
pub fn generate(options: &ResolvedOptions, mode: RegisterMode, kind: TemplateKind) -> String {
    render(
        template(mode, kind),
        &options.sw_url(),
        &options.scope,
        options.register_type.is_auto_update(),
    )
}

/// Substitute every placeholder occurrence in `template`.
///
/// The auto-update flag is replaced first; its placeholder shares a prefix
/// with the worker URL placeholder. URL and scope land inside single-quoted
/// JS strings that may be inlined into a `<script>` element, so both are
/// escaped with [`escape_js_string`].
pub fn render(template: &str, sw_url: &str, scope: &str, auto_update: bool) -> String {
    template
        .replace(PLACEHOLDER_AUTO_UPDATE, if auto_update { "true" } else { "false" })
        .replace(PLACEHOLDER_SW_URL, &escape_js_string(sw_url))
        .replace(PLACEHOLDER_SCOPE, &escape_js_string(scope))
}

/// Escape `value` for a single-quoted JS string inside inline HTML.
///
/// `<` becomes `\x3c` so `</script>` cannot close the element early.
pub fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\x3c"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
