use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::duration;
use crate::entry;
use crate::header::HeaderFormat;
use crate::parser::parse;

/// 1日あたりの作業時間。
const HOURS_PER_DAY: i64 = 8;

pub struct SummaryCommand<'a> {
    header: &'a HeaderFormat,
}

impl<'a> SummaryCommand<'a> {
    /// 新しい`SummaryCommand`を返す。
    ///
    /// # Arguments
    /// * `header` - 日付見出しの書式
    pub fn new(header: &'a HeaderFormat) -> Self {
        Self { header }
    }

    /// `summary`サブコマンドの処理を行う。
    ///
    /// 全Entryの合計作業時間と、それを8時間で割った日数(切り捨て)を出力する。
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<()> {
        let entries = parse(input, self.header).context("Failed to parse worklog")?;
        let total = entry::total_duration(&entries);

        writeln!(output, "total {}", duration::format(total)).context("Failed to write total")?;
        writeln!(output, "days {}", total.num_hours() / HOURS_PER_DAY)
            .context("Failed to write days")?;

        Ok(())
    }
}
