use std::io::Write;

use anyhow::{Context, Result};

use crate::entry::Entry;
use crate::header::HeaderFormat;
use crate::serializer::to_text;

/// Entryを出力するためのtrait。
pub trait ConsolePresenter {
    /// Entryを表示する。
    ///
    /// # Arguments
    ///
    /// * `entries` - 表示するEntry
    fn show_entries(&mut self, entries: &[Entry]) -> Result<()>;
}

/// Entryをworklogのテキスト形式で表示する。
pub struct ConsoleText<'a, W: Write> {
    writer: &'a mut W,
    header: &'a HeaderFormat,
}

impl<'a, W: Write> ConsoleText<'a, W> {
    /// 新しい`ConsoleText`を返す。
    pub fn new(writer: &'a mut W, header: &'a HeaderFormat) -> Self {
        Self { writer, header }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleText<'a, W> {
    fn show_entries(&mut self, entries: &[Entry]) -> Result<()> {
        to_text(&mut *self.writer, entries, self.header).context("Failed to format to text")
    }
}

/// EntryをJSONで表示する。
pub struct ConsoleJson<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleJson<'a, W> {
    /// 新しい`ConsoleJson`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleJson<'a, W> {
    fn show_entries(&mut self, entries: &[Entry]) -> Result<()> {
        serde_json::to_writer_pretty(&mut *self.writer, entries).context("Failed to serialize")?;
        writeln!(self.writer).context("Failed to write")?;
        Ok(())
    }
}

/// EntryをCSVで表示する。
///
/// 1行に1タスクを出力し、列は`day`, `hours`, `description`。
pub struct ConsoleCsv<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleCsv<'a, W> {
    /// 新しい`ConsoleCsv`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleCsv<'a, W> {
    fn show_entries(&mut self, entries: &[Entry]) -> Result<()> {
        let mut csv = csv::Writer::from_writer(&mut *self.writer);
        csv.write_record(["day", "hours", "description"])
            .context("Failed to write header")?;

        for entry in entries {
            let day = entry.day.format("%-d/%m/%Y").to_string();
            for task in &entry.tasks {
                let hours = (task.duration.num_milliseconds() as f64 / 3_600_000.0).to_string();
                csv.write_record([day.as_str(), hours.as_str(), task.description.as_str()])
                    .with_context(|| format!("Failed to write entry: {}", entry.day))?;
            }
        }

        csv.flush().context("Failed to flush")?;
        Ok(())
    }
}
