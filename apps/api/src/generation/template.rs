//! Named-placeholder prompt templates.
//!
//! Placeholders are written `{name}`. Rendering is a single left-to-right pass, so
//! braces inside substituted values are never interpreted as placeholders.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template '{template}' is missing required field '{field}'")]
    MissingField {
        template: &'static str,
        field: &'static str,
    },
}

/// An immutable prompt pattern with a fixed set of required fields.
#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub placeholders: &'static [&'static str],
    pub body: &'static str,
}

impl PromptTemplate {
    /// Fills every placeholder from `fields`. Extra fields are ignored.
    /// Field values are inserted verbatim.
    pub fn render(&self, fields: &[(&str, &str)]) -> Result<String, TemplateError> {
        for &field in self.placeholders {
            if !fields.iter().any(|(name, _)| *name == field) {
                return Err(TemplateError::MissingField {
                    template: self.name,
                    field,
                });
            }
        }

        let mut rendered = String::with_capacity(
            self.body.len() + fields.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.body;

        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let substituted = after.find('}').and_then(|close| {
                let name = &after[..close];
                if !self.placeholders.iter().any(|p| *p == name) {
                    return None;
                }
                lookup(fields, name).map(|value| (value, close))
            });

            match substituted {
                Some((value, close)) => {
                    rendered.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    rendered.push('{');
                    rest = after;
                }
            }
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

fn lookup<'a>(fields: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| *value)
}
