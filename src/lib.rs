//! 日付見出しと作業時間付きのタスク行からなるテキスト形式のworklogを扱うライブラリ。
//!
//! `parse`でテキストを`Entry`の列に変換し、`to_text`で同じテキスト形式に戻す。

pub mod console;
pub mod datetime;
pub mod duration;
pub mod editor;
pub mod entry;
pub mod error;
pub mod filter_command;
pub mod fmt_command;
pub mod header;
pub mod html;
pub mod invoice;
pub mod invoice_command;
pub mod invoice_config;
pub mod logger;
pub mod open_command;
pub mod parser;
pub mod push_command;
pub mod serializer;
pub mod source;
pub mod store;
pub mod summary_command;

pub use entry::{Entry, Task};
pub use error::WorklogError;
pub use header::{HeaderFormat, DEFAULT_HEADER_FORMAT};
pub use parser::parse;
pub use serializer::to_text;
