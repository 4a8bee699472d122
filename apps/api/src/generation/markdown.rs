//! Renders model output (markdown) to HTML for display.

use pulldown_cmark::{html, Event, Options, Parser};

/// Converts markdown to HTML. Raw HTML in the source is escaped and shown as text,
/// so model output can never inject markup into the page.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
