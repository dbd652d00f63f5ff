use std::fmt;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use crate::assets;
use crate::discovery::files_with_suffix;
use crate::markdown;
use crate::template::Template;

pub const MARKDOWN_SUFFIX: &str = ".md";
pub const CSS_SUFFIX: &str = ".css";

#[derive(Debug)]
pub enum ConvertError {
    Read(std::io::Error),
    Write(std::io::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Read(e) => write!(f, "read error: {}", e),
            ConvertError::Write(e) => write!(f, "write error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {}

/// One configured render pipeline: the page template, the candidate
/// stylesheets, and the script fragment substituted into `{{script}}`.
pub struct Converter {
    template: Template,
    css: Vec<PathBuf>,
    script: String,
}

impl Converter {
    pub fn new(template: Template, css: Vec<PathBuf>, script: String) -> Self {
        Self {
            template,
            css,
            script,
        }
    }

    /// Destination for `source` mirrored under `output_root`, with `.md`
    /// replaced by `.html`. Falls back to the bare file name when `source`
    /// does not sit under `input_root`.
    pub fn dest_for(input_root: &Path, output_root: &Path, source: &Path) -> PathBuf {
        let relative = source
            .strip_prefix(input_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(source.file_name().unwrap_or_default()));

        output_root.join(relative).with_extension("html")
    }

    /// Converts one Markdown file into `dest`, creating parent directories
    /// as needed.
    pub fn convert_file(&self, source: &Path, dest: &Path) -> Result<(), ConvertError> {
        let text = std::fs::read_to_string(source).map_err(ConvertError::Read)?;
        let content = markdown::render(&text);

        let title = dest
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let links = self.css_links_for(source);
        let html = self.template.fill(&content, &title, &self.script, &links);

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(ConvertError::Write)?;
        }
        std::fs::write(dest, html).map_err(ConvertError::Write)?;

        Ok(())
    }

    /// Runs the whole pipeline: single-file or batch conversion, then the
    /// stylesheet copy. Per-file conversion failures are logged and do not
    /// abort the remaining files.
    pub fn run(&self, input: &Path, output: &Path, single: bool) -> std::io::Result<()> {
        if single {
            // The input path is the Markdown file itself
            let dest = output
                .join(input.file_name().unwrap_or_default())
                .with_extension("html");
            self.convert_logged(input, &dest);

            let css_root = input.parent().unwrap_or_else(|| Path::new("."));
            assets::copy_by_suffix(css_root, output, CSS_SUFFIX)?;
        } else {
            for source in files_with_suffix(input, MARKDOWN_SUFFIX) {
                let dest = Self::dest_for(input, output, &source);
                self.convert_logged(&source, &dest);
            }

            assets::copy_by_suffix(input, output, CSS_SUFFIX)?;
        }

        Ok(())
    }

    fn convert_logged(&self, source: &Path, dest: &Path) {
        match self.convert_file(source, dest) {
            Ok(()) => println!("{}", format!("Converted: {}", dest.display()).green()),
            Err(e) => eprintln!(
                "{}",
                format!("Failed to convert {}: {}", source.display(), e).red()
            ),
        }
    }

    /// `<link>` tags for stylesheets sitting in the same directory as
    /// `source`, newline-joined. Directory-exact: a stylesheet anywhere
    /// else in the tree is skipped. The href is the bare file name since
    /// the copied asset lands beside the generated page.
    fn css_links_for(&self, source: &Path) -> String {
        self.css
            .iter()
            .filter(|css| css.parent() == source.parent())
            .filter_map(|css| css.file_name())
            .map(|name| {
                format!(
                    "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">",
                    name.to_string_lossy()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
