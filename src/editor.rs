use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use log::info;
#[cfg(test)]
use mockall::automock;

/// worklogのファイルを編集するためのtrait。
#[cfg_attr(test, automock)]
pub trait Editor {
    /// ファイルを開き、編集が終わるまで待つ。
    fn edit(&self, path: &Path) -> Result<()>;
}

/// 外部コマンドのエディタ。
pub struct CommandEditor {
    program: String,
}

impl CommandEditor {
    /// 新しい`CommandEditor`を返す。
    ///
    /// # Arguments
    ///
    /// * `program` - 起動するエディタのコマンド
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Editor for CommandEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        info!("Opening {} with {}", path.display(), self.program);
        let status = Command::new(&self.program)
            .arg(path)
            .status()
            .with_context(|| format!("Failed to run {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {}", self.program, status);
        }

        Ok(())
    }
}
