//! Manifest link and registration snippet injection.

use crate::constants::REGISTER_SCRIPT_ID;
use crate::error::{PwaError, Result};
use crate::options::{InjectRegister, ResolvedOptions};
use crate::register::{RegisterMode, TemplateKind, generate};

const HEAD_CLOSE: &str = "</head>";

/// Markup inserted before `</head>` for the given injection mode.
///
/// `register` should already be settled; an unsettled `Auto` is rendered
/// like `Script`.
pub fn head_markup(options: &ResolvedOptions, register: InjectRegister) -> String {
    let mut markup = String::new();

    if let Some(href) = options.manifest_url() {
        markup.push_str(&format!(
            r#"<link rel="manifest" href="{}""#,
            escape_attr(&href)
        ));
        if options.use_credentials {
            markup.push_str(r#" crossorigin="use-credentials""#);
        }
        markup.push_str(">\n");
    }

    if register != InjectRegister::Null {
        let script = generate(options, RegisterMode::Build, TemplateKind::Script);
        markup.push_str(&format!(
            "<script id=\"{}\">\n{}</script>\n",
            REGISTER_SCRIPT_ID, script
        ));
    }

    markup
}

/// Insert PWA markup right before the first closing head tag of `html`.
///
/// The rest of the document is copied unchanged. Fails with
/// [`PwaError::HtmlStructure`] when `document` has no `</head>`.
pub fn inject(
    html: &str,
    options: &ResolvedOptions,
    register: InjectRegister,
    document: &str,
) -> Result<String> {
    let at = find_head_close(html).ok_or_else(|| PwaError::html_structure(document))?;
    let markup = head_markup(options, register);

    let mut out = String::with_capacity(html.len() + markup.len());
    out.push_str(&html[..at]);
    out.push_str(&markup);
    out.push_str(&html[at..]);
    Ok(out)
}

/// Byte offset of the first `</head>`, ignoring ASCII case.
fn find_head_close(html: &str) -> Option<usize> {
    html.as_bytes()
        .windows(HEAD_CLOSE.len())
        .position(|window| window.eq_ignore_ascii_case(HEAD_CLOSE.as_bytes()))
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
