use std::fmt;
use std::path::Path;

pub const CONTENT_TOKEN: &str = "{{content}}";
pub const TITLE_TOKEN: &str = "{{title}}";
pub const SCRIPT_TOKEN: &str = "{{script}}";

const HEAD_CLOSE: &str = "</head>";

/// Template used when no template path is given.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{{title}}</title>
  </head>
  <body>
    <div id="content">{{content}}</div>
    <script>{{script}}</script>
  </body>
</html>
"#;

#[derive(Debug)]
pub enum TemplateError {
    Io(std::io::Error),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<std::io::Error> for TemplateError {
    fn from(value: std::io::Error) -> Self {
        TemplateError::Io(value)
    }
}

/// An HTML page template with literal substitution tokens. A token absent
/// from the template text is silently skipped.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    /// Loads the template at `path`, or the built-in default when no path
    /// is given. An unreadable user template is fatal to the caller.
    pub fn load(path: Option<&Path>) -> Result<Self, TemplateError> {
        let text = match path {
            Some(p) => std::fs::read_to_string(p)?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        Ok(Self { text })
    }

    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitutes the page tokens and injects `css_links` immediately
    /// before the closing `</head>` tag. Each substitution is independent.
    pub fn fill(&self, content: &str, title: &str, script: &str, css_links: &str) -> String {
        let mut html = self
            .text
            .replace(CONTENT_TOKEN, content)
            .replace(TITLE_TOKEN, title)
            .replace(SCRIPT_TOKEN, script);

        if !css_links.is_empty() {
            html = html.replace(HEAD_CLOSE, &format!("{css_links}\n{HEAD_CLOSE}"));
        }

        html
    }
}
