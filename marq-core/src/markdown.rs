use pulldown_cmark::{Options, Parser, html};

/// Renders Markdown text to an HTML fragment.
pub fn render(source: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(source, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings() {
        let html = render("# Hello");
        assert!(html.contains("<h1>Hello</h1>"));
    }

    #[test]
    fn renders_tables() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
