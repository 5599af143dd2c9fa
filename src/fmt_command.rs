use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use log::info;

use crate::console::{ConsoleCsv, ConsoleJson, ConsolePresenter, ConsoleText};
use crate::header::HeaderFormat;
use crate::html::ConsoleHtml;
use crate::parser::parse;

/// 出力形式。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

/// `fmt`サブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct FmtArgs {
    #[clap(
        default_value = "txt",
        help = "Output format: txt, json, csv or html",
        parse(try_from_str = parse_format),
    )]
    format: OutputFormat,
}

pub struct FmtCommand<'a> {
    header: &'a HeaderFormat,
}

impl<'a> FmtCommand<'a> {
    /// 新しい`FmtCommand`を返す。
    ///
    /// # Arguments
    /// * `header` - 日付見出しの書式
    pub fn new(header: &'a HeaderFormat) -> Self {
        Self { header }
    }

    /// `fmt`サブコマンドの処理を行う。
    ///
    /// worklogを解析し、指定された形式で出力する。
    pub fn run<R: BufRead, W: Write>(&self, args: FmtArgs, input: R, output: &mut W) -> Result<()> {
        let entries = parse(input, self.header).context("Failed to parse worklog")?;
        info!("Formatting {} entries as {:?}", entries.len(), args.format);

        match args.format {
            OutputFormat::Text => ConsoleText::new(output, self.header).show_entries(&entries),
            OutputFormat::Json => ConsoleJson::new(output).show_entries(&entries),
            OutputFormat::Csv => ConsoleCsv::new(output).show_entries(&entries),
            OutputFormat::Html => ConsoleHtml::new(output)?.show_entries(&entries),
        }
    }
}

/// 出力形式をパースする。
fn parse_format(s: &str) -> Result<OutputFormat> {
    let format = match s {
        "text" | "txt" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "html" => OutputFormat::Html,
        _ => bail!("valid formats are text, json, csv, html"),
    };
    Ok(format)
}
