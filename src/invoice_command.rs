use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::header::HeaderFormat;
use crate::invoice::Invoice;
use crate::invoice_config::{InvoiceConfig, EXAMPLE_CONFIG};
use crate::parser::parse;

/// `invoice`サブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct InvoiceArgs {
    #[clap(
        short = 'c',
        long = "config",
        default_value = "config.txt",
        help = "Path to the configuration file"
    )]
    config: PathBuf,

    #[clap(short = 'o', long = "output", help = "Output file. Stdout if not given")]
    output: Option<PathBuf>,

    #[clap(short = 'g', long = "generate", help = "Generate an example configuration file")]
    pub generate: bool,
}

pub struct InvoiceCommand<'a> {
    header: &'a HeaderFormat,
}

impl<'a> InvoiceCommand<'a> {
    /// 新しい`InvoiceCommand`を返す。
    ///
    /// # Arguments
    /// * `header` - 日付見出しの書式
    pub fn new(header: &'a HeaderFormat) -> Self {
        Self { header }
    }

    /// 設定ファイルの例を出力する。
    pub fn example<W: Write>(output: &mut W) -> Result<()> {
        output
            .write_all(EXAMPLE_CONFIG.as_bytes())
            .context("Failed to write example configuration")
    }

    /// `invoice`サブコマンドの処理を行う。
    ///
    /// 設定ファイルとworklogから請求書のHTMLを作成し、ファイルまたは`output`に書き出す。
    pub fn run<R: BufRead, W: Write>(&self, args: InvoiceArgs, input: R, output: &mut W) -> Result<()> {
        if args.generate {
            return Self::example(output);
        }

        let file = File::open(&args.config)
            .with_context(|| format!("cannot open {:?}", args.config.display().to_string()))?;
        let config = InvoiceConfig::from_reader(BufReader::new(file))
            .context("cannot read configuration")?;

        let entries = parse(input, self.header).context("Failed to parse worklog")?;
        let invoice = Invoice::from_log(config, &entries).context("cannot interpret log")?;
        let html = invoice.render()?;

        match args.output {
            Some(path) => {
                fs::write(&path, html)
                    .with_context(|| format!("cannot write to {:?}", path.display().to_string()))?;
                info!("Invoice written to {}", path.display());
            }
            None => output
                .write_all(html.as_bytes())
                .context("cannot write to stdout")?,
        }

        Ok(())
    }
}
