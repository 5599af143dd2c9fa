use std::io::BufRead;
use std::mem;

use chrono::{Duration, NaiveDate};
use log::debug;

use crate::duration;
use crate::entry::{Entry, Task};
use crate::error::WorklogError;
use crate::header::HeaderFormat;

/// worklogを解析し、日毎の`Entry`の列を返す。
///
/// 内容の誤りはエラーにせず、説明文として取り込む。エラーになるのは読み込みに失敗した場合のみ。
/// UTF-8として不正なバイト列は置換文字に変換する。
///
/// # Arguments
///
/// * `reader` - worklogの読み込み元
/// * `header` - 日付見出しの書式
///
/// # Examples
///
/// ```
/// use worklog::{parse, HeaderFormat};
///
/// let text = "# 2 Jan 2006 Monday\n1h Task one\n";
/// let entries = parse(text.as_bytes(), &HeaderFormat::default()).unwrap();
/// assert_eq!(entries.len(), 1);
/// ```
pub fn parse<R: BufRead>(mut reader: R, header: &HeaderFormat) -> Result<Vec<Entry>, WorklogError> {
    let mut state = ParseState::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(WorklogError::Read)?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        state.consume(line.trim(), header);
    }

    debug!("Parsed {} entries", state.entries.len());
    Ok(state.entries)
}

/// 解析中のタスクの位置。
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Cursor {
    /// まだどのEntryにも入っていない`pending`。
    #[default]
    Pending,
    /// `entries[entry].tasks[task]`。
    Attached { entry: usize, task: usize },
}

#[derive(Debug, Default)]
struct ParseState {
    entries: Vec<Entry>,
    /// 最初の見出しより前は`None`。
    current_entry: Option<usize>,
    pending: Task,
    cursor: Cursor,
}

impl ParseState {
    fn consume(&mut self, line: &str, header: &HeaderFormat) {
        if line.is_empty() {
            return;
        }

        if let Some(day) = header.parse(line) {
            self.start_entry(day);
            return;
        }

        let (word, rest) = first_word(line);
        let chunk = match duration::parse(word) {
            Ok(duration) => {
                self.start_task(duration);
                rest.trim()
            }
            Err(_) => line,
        };
        self.current_task().append_description(chunk);
    }

    fn start_entry(&mut self, day: NaiveDate) {
        self.attach_pending();
        self.entries.push(Entry::new(day));
        self.current_entry = Some(self.entries.len() - 1);
        self.cursor = Cursor::Pending;
    }

    fn start_task(&mut self, duration: Duration) {
        self.attach_pending();
        match self.current_entry {
            Some(entry) => {
                let tasks = &mut self.entries[entry].tasks;
                tasks.push(Task::new(duration));
                self.cursor = Cursor::Attached {
                    entry,
                    task: tasks.len() - 1,
                };
            }
            // 見出しより前のタスクは行き先がないので捨てられる。
            None => {
                self.pending = Task::new(duration);
                self.cursor = Cursor::Pending;
            }
        }
    }

    // 見出しの直後に書かれた説明は、そのEntryにまだタスクがない場合だけ追加する。
    fn attach_pending(&mut self) {
        let pending = mem::take(&mut self.pending);
        let Some(entry) = self.current_entry.map(|index| &mut self.entries[index]) else {
            return;
        };
        if !pending.description.is_empty() && entry.tasks.is_empty() {
            entry.tasks.push(pending);
        }
    }

    fn current_task(&mut self) -> &mut Task {
        match self.cursor {
            Cursor::Pending => &mut self.pending,
            Cursor::Attached { entry, task } => &mut self.entries[entry].tasks[task],
        }
    }
}

/// 最初の空白までの単語と、残りを返す。
fn first_word(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(end) => line.split_at(end),
        None => (line, ""),
    }
}
