pub mod assets;
pub mod config;
pub mod convert;
pub mod discovery;
pub mod markdown;
pub mod template;

// Re-export main types
pub use config::{FileConfig, Options};
pub use convert::{ConvertError, Converter};
pub use template::{Template, TemplateError};
