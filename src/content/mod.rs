//! Content module - content entries, the content store and markdown rendering

mod entry;
mod frontmatter;
mod markdown;
pub mod store;

pub use entry::ContentEntry;
pub use frontmatter::FrontMatter;
pub use markdown::{highlight_theme_for, MarkdownRenderer, Rendered, TocEntry};
pub(crate) use markdown::html_escape;
pub use store::{ContentStore, FsContentStore, StoreError};
