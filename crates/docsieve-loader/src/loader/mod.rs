mod jsonl;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

pub use jsonl::JsonlLoader;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
pub use text::TextLoader;
