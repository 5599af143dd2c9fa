use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::datetime;
use crate::editor::Editor;
use crate::header::HeaderFormat;
use crate::source::WorklogLocation;

/// `open`サブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct OpenArgs {
    #[clap(
        long = "editor",
        env = "EDITOR",
        default_value = "vim",
        help = "Editor used to open the worklog"
    )]
    pub editor: String,
}

pub struct OpenCommand<'a, E: Editor> {
    editor: &'a E,
    header: &'a HeaderFormat,
}

impl<'a, E: Editor> OpenCommand<'a, E> {
    /// 新しい`OpenCommand`を返す。
    ///
    /// # Arguments
    /// * `editor` - worklogを編集するエディタ
    /// * `header` - 日付見出しの書式
    pub fn new(editor: &'a E, header: &'a HeaderFormat) -> Self {
        Self { editor, header }
    }

    /// `open`サブコマンドの処理を行う。
    ///
    /// 今日の日付見出しがなければworklogの末尾に追加し、エディタで開く。
    /// worklogはローカルのファイルである必要がある。
    pub fn run(&self, location: &WorklogLocation) -> Result<()> {
        let path = match location {
            WorklogLocation::Path(path) => path,
            WorklogLocation::Url(url) => bail!("cannot open a remote worklog: {}", url),
        };

        ensure_todays_header(path, self.header).context("Failed to ensure today's header")?;
        self.editor.edit(path).context("Failed to edit worklog")?;

        Ok(())
    }
}

/// 今日の日付見出しがworklogになければ末尾に追加する。
fn ensure_todays_header(path: &Path, header: &HeaderFormat) -> Result<()> {
    let today = header.format(datetime::today()).to_string();
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("open {:?} file", path.display().to_string()))?;

    for line in BufReader::new(&file).lines() {
        let line = line.context("read worklog")?;
        if line.trim_end() == today {
            info!("Today's header found");
            return Ok(());
        }
    }

    info!("Adding header {:?}", today);
    write!(file, "\n{}\n", today).context("write header")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use mockall::predicate;

    use super::{ensure_todays_header, OpenCommand};
    use crate::datetime::mock_datetime;
    use crate::editor::MockEditor;
    use crate::header::HeaderFormat;
    use crate::source::WorklogLocation;

    fn set_today() {
        mock_datetime::set_mock_date(NaiveDate::from_ymd_opt(2006, 1, 3).unwrap());
    }

    #[test]
    fn test_ensure_todays_header_appends() {
        set_today();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.txt");
        fs::write(&path, "# 2 Jan 2006 Monday\n1h Task one\n").unwrap();

        ensure_todays_header(&path, &HeaderFormat::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# 2 Jan 2006 Monday\n1h Task one\n\n# 3 Jan 2006 Tuesday\n"
        );
    }

    #[test]
    fn test_ensure_todays_header_exists() {
        set_today();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.txt");
        let content = "# 3 Jan 2006 Tuesday\n1h Task one";
        fs::write(&path, content).unwrap();

        ensure_todays_header(&path, &HeaderFormat::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_ensure_todays_header_creates_file() {
        set_today();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.txt");

        ensure_todays_header(&path, &HeaderFormat::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\n# 3 Jan 2006 Tuesday\n"
        );
    }

    #[test]
    fn test_open_command() {
        set_today();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worklog.txt");
        let mut editor = MockEditor::new();
        editor
            .expect_edit()
            .with(predicate::eq(path.clone()))
            .times(1)
            .returning(|_| Ok(()));
        let header = HeaderFormat::default();

        let command = OpenCommand::new(&editor, &header);
        let result = command.run(&WorklogLocation::Path(path.clone()));

        assert!(result.is_ok());
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains("# 3 Jan 2006 Tuesday"));
    }

    #[test]
    fn test_open_command_remote() {
        let mut editor = MockEditor::new();
        editor.expect_edit().times(0);
        let header = HeaderFormat::default();

        let command = OpenCommand::new(&editor, &header);
        let result = command.run(&WorklogLocation::Url("https://example.com/log".to_string()));

        assert!(result.is_err());
    }
}
