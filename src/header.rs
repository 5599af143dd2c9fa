use std::fmt::Display;

use anyhow::{bail, Result};
use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::NaiveDate;

/// 日付見出しのデフォルトの書式。`# 2 Jan 2006 Monday`の形になる。
pub const DEFAULT_HEADER_FORMAT: &str = "# %-d %b %Y %A";

/// 日付見出し行の書式。
///
/// chronoのstrftime形式で表し、解析と出力の両方で利用する。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderFormat {
    pattern: String,
}

impl HeaderFormat {
    /// 新しい`HeaderFormat`を返す。
    ///
    /// chronoが解釈できない書式の場合はエラーを返す。
    ///
    /// # Arguments
    ///
    /// * `pattern` - strftime形式の書式
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            bail!("invalid header format: {:?}", pattern);
        }

        Ok(Self { pattern })
    }

    /// 行全体が見出しであれば、その日付を返す。
    ///
    /// 曜日は書式に合う名前であることだけを確認し、日付との整合性は問わない。
    pub fn parse(&self, line: &str) -> Option<NaiveDate> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, line, StrftimeItems::new(&self.pattern)).ok()?;
        without_weekday(&parsed).ok()?.to_naive_date().ok()
    }

    /// 日付の見出し行を返す。
    pub fn format(&self, day: NaiveDate) -> impl Display + '_ {
        day.format(&self.pattern)
    }
}

/// 曜日以外の日付の要素だけを持つ`Parsed`を返す。
fn without_weekday(parsed: &Parsed) -> ParseResult<Parsed> {
    let mut date = Parsed::new();
    if let Some(year) = parsed.year() {
        date.set_year(year.into())?;
    }
    if let Some(year_div_100) = parsed.year_div_100() {
        date.set_year_div_100(year_div_100.into())?;
    }
    if let Some(year_mod_100) = parsed.year_mod_100() {
        date.set_year_mod_100(year_mod_100.into())?;
    }
    if let Some(month) = parsed.month() {
        date.set_month(month.into())?;
    }
    if let Some(day) = parsed.day() {
        date.set_day(day.into())?;
    }
    if let Some(ordinal) = parsed.ordinal() {
        date.set_ordinal(ordinal.into())?;
    }
    Ok(date)
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_HEADER_FORMAT.to_string(),
        }
    }
}
