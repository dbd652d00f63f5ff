use std::io;
use std::path::Path;

const LISTING_TOKEN: &str = "{{listing}}";

/// Fixed page the root listing is substituted into.
const LISTING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>Directory Listing</title>
    <style>
      body {
        font-family: Arial, sans-serif;
        margin: 0;
        padding: 20px;
        background-color: #e9ecef;
        color: #343a40;
        display: flex;
        justify-content: center;
        align-items: center;
        flex-direction: column;
      }
      h3 {
        color: #495057;
        margin-bottom: 20px;
      }
      ul {
        list-style-type: none;
        padding: 0;
        background-color: #fff;
        border-radius: 8px;
        box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
        width: 80%;
        max-width: 600px;
        text-align: left;
      }
      li {
        margin: 10px 0;
        padding: 10px;
        border-bottom: 1px solid #dee2e6;
      }
      li:last-child {
        border-bottom: none;
      }
      a {
        text-decoration: none;
        color: #007bff;
        font-weight: bold;
      }
      a:hover {
        text-decoration: underline;
      }
      strong {
        color: #343a40;
      }
    </style>
  </head>
  <body>
    <h3>Available Files</h3>
    {{listing}}
  </body>
</html>
"#;

/// Renders the root listing page for `dir`.
pub fn listing_page(dir: &Path) -> io::Result<String> {
    let listing = directory_listing(dir, Path::new(""))?;
    Ok(LISTING_PAGE.replace(LISTING_TOKEN, &listing))
}

/// Nested `<ul>` of subdirectories and `.html` files. Directories label a
/// nested list; only `.html` files are linked, with hrefs relative to the
/// serve root.
fn directory_listing(dir: &Path, base: &Path) -> io::Result<String> {
    let mut listing = String::from("<ul>");

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = base.join(&name);

        if path.is_dir() {
            listing.push_str(&format!(
                "<li><strong>{}/</strong>",
                html_escape::encode_text(&name)
            ));
            listing.push_str(&directory_listing(&path, &relative)?);
            listing.push_str("</li>");
        } else if name.ends_with(".html") {
            listing.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                html_escape::encode_quoted_attribute(&relative.to_string_lossy()),
                html_escape::encode_text(&name)
            ));
        }
    }

    listing.push_str("</ul>");
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_html_files_nested_under_directory_labels() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("sub/page.html"), "<html></html>").unwrap();
        std::fs::write(dir.path().join("sub/style.css"), "body {}").unwrap();

        let page = listing_page(dir.path()).unwrap();

        assert!(page.contains("<a href=\"index.html\">index.html</a>"));
        assert!(page.contains("<strong>sub/</strong>"));
        assert!(page.contains("<a href=\"sub/page.html\">page.html</a>"));
        assert!(!page.contains("style.css"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(listing_page(&dir.path().join("gone")).is_err());
    }
}
