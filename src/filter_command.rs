use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Month};
use log::info;

use crate::header::HeaderFormat;
use crate::parser::parse;
use crate::serializer::to_text;

/// `filter`サブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct FilterArgs {
    #[clap(
        help = "Month name, e.g. January or Jan",
        parse(try_from_str = parse_month),
    )]
    month: Month,
}

pub struct FilterCommand<'a> {
    header: &'a HeaderFormat,
}

impl<'a> FilterCommand<'a> {
    /// 新しい`FilterCommand`を返す。
    ///
    /// # Arguments
    /// * `header` - 日付見出しの書式
    pub fn new(header: &'a HeaderFormat) -> Self {
        Self { header }
    }

    /// `filter`サブコマンドの処理を行う。
    ///
    /// 指定された月のEntryだけをworklogのテキスト形式で出力する。年は区別しない。
    pub fn run<R: BufRead, W: Write>(&self, args: FilterArgs, input: R, output: &mut W) -> Result<()> {
        let entries = parse(input, self.header).context("Failed to parse worklog")?;
        let month = args.month.number_from_month();
        let filtered: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.day.month() == month)
            .collect();
        info!("{} entries in {}", filtered.len(), args.month.name());

        to_text(output, &filtered, self.header).context("Failed to format to text")
    }
}

/// 月の名前をパースする。
fn parse_month(s: &str) -> Result<Month> {
    s.parse::<Month>()
        .map_err(|_| anyhow!("invalid month: {:?}", s))
}
