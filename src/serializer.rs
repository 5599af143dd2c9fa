use std::io::Write;

use chrono::Duration;

use crate::entry::Entry;
use crate::error::WorklogError;
use crate::header::HeaderFormat;

/// `Entry`の列をworklogのテキスト形式で書き出す。
///
/// 作業時間の合計がゼロの日は出力しない。作業時間は時間単位に切り捨てて出力する。
///
/// # Arguments
///
/// * `writer` - 書き出し先
/// * `entries` - 書き出すEntry
/// * `header` - 日付見出しの書式
pub fn to_text<W: Write>(
    mut writer: W,
    entries: &[Entry],
    header: &HeaderFormat,
) -> Result<(), WorklogError> {
    for entry in entries
        .iter()
        .filter(|entry| entry.total_duration() != Duration::zero())
    {
        writeln!(writer, "{}", header.format(entry.day))
            .map_err(WorklogError::write("entry info"))?;

        for task in &entry.tasks {
            let hours = task.duration.num_hours();
            let mut lines = task.lines();
            let first = lines.next().unwrap_or_default();
            writeln!(writer, "{}h {}", hours, first.trim())
                .map_err(WorklogError::write("task info"))?;

            // 2桁以上の時間は説明の開始位置を1つずらす。
            let indent = if hours > 9 { "    " } else { "   " };
            for line in lines {
                writeln!(writer, "{}{}", indent, line.trim())
                    .map_err(WorklogError::write("task info"))?;
            }
        }

        writeln!(writer).map_err(WorklogError::write("entry separator"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use chrono::{Duration, NaiveDate};
    use rstest::rstest;

    use super::to_text;
    use crate::entry::{Entry, Task};
    use crate::error::WorklogError;
    use crate::header::HeaderFormat;
    use crate::parser::parse;

    fn entry(d: u32, tasks: &[(Duration, &str)]) -> Entry {
        Entry {
            day: NaiveDate::from_ymd_opt(2006, 1, d).unwrap(),
            tasks: tasks
                .iter()
                .map(|(duration, description)| Task {
                    duration: *duration,
                    description: description.to_string(),
                })
                .collect(),
        }
    }

    fn render(entries: &[Entry]) -> String {
        let mut writer = Vec::new();
        to_text(&mut writer, entries, &HeaderFormat::default()).unwrap();
        String::from_utf8(writer).unwrap()
    }

    #[rstest]
    #[case::no_entry(&[], "")]
    #[case::single(
        &[entry(2, &[(Duration::hours(1), "Task one")])],
        "# 2 Jan 2006 Monday\n1h Task one\n\n",
    )]
    #[case::multi_line(
        &[entry(2, &[(Duration::hours(1), "Task one\ncontinued text")])],
        "# 2 Jan 2006 Monday\n1h Task one\n   continued text\n\n",
    )]
    #[case::wide_hours(
        &[entry(2, &[(Duration::hours(12), "Long day\n  second")])],
        "# 2 Jan 2006 Monday\n12h Long day\n    second\n\n",
    )]
    #[case::truncated_hours(
        &[entry(2, &[(Duration::minutes(150), "a"), (Duration::minutes(30), "b")])],
        "# 2 Jan 2006 Monday\n2h a\n0h b\n\n",
    )]
    #[case::bare_duration(
        &[entry(2, &[(Duration::hours(3), "")])],
        "# 2 Jan 2006 Monday\n3h \n\n",
    )]
    #[case::skip_empty_day(
        &[
            entry(2, &[]),
            entry(3, &[(Duration::zero(), "day off")]),
            entry(4, &[(Duration::hours(2), "Task two")]),
        ],
        "# 4 Jan 2006 Wednesday\n2h Task two\n\n",
    )]
    fn test_to_text(#[case] entries: &[Entry], #[case] expected: &str) {
        assert_eq!(render(entries), expected);
    }

    #[test]
    fn test_to_text_custom_header() {
        let header = HeaderFormat::new("## %Y-%m-%d").unwrap();
        let mut writer = Vec::new();

        to_text(
            &mut writer,
            &[entry(2, &[(Duration::hours(1), "a")])],
            &header,
        )
        .unwrap();

        assert_eq!(String::from_utf8(writer).unwrap(), "## 2006-01-02\n1h a\n\n");
    }

    #[test]
    fn test_round_trip() {
        let text = "# 2 Jan 2006 Monday\n1h Task one\n  continued text\n30m Fixed bug; wrote test\n\n\
                    # 3 Jan 2006 Tuesday\nday off\n\n\
                    # 4 Jan 2006 Wednesday\n11h Task two\n";
        let header = HeaderFormat::default();
        let first = parse(text.as_bytes(), &header).unwrap();

        let rendered = render(&first);
        let second = parse(rendered.as_bytes(), &header).unwrap();

        let summary = |entries: &[Entry]| {
            entries
                .iter()
                .filter(|entry| entry.total_duration() != Duration::zero())
                .flat_map(|entry| {
                    entry.tasks.iter().map(move |task| {
                        (
                            entry.day,
                            task.duration.num_hours(),
                            task.lines().next().unwrap_or_default().to_string(),
                        )
                    })
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&second), summary(&first));
        assert_eq!(render(&second), rendered);
    }

    /// 常に書き込みに失敗するwriter。
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_to_text_write_error() {
        let entries = [entry(2, &[(Duration::hours(1), "a")])];

        let result = to_text(FailingWriter, &entries, &HeaderFormat::default());

        assert!(matches!(
            result,
            Err(WorklogError::Write {
                context: "entry info",
                ..
            })
        ));
    }
}
