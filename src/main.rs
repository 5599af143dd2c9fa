use std::io::{self, BufRead, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};

use worklog::editor::CommandEditor;
use worklog::filter_command::{FilterArgs, FilterCommand};
use worklog::fmt_command::{FmtArgs, FmtCommand};
use worklog::invoice_command::{InvoiceArgs, InvoiceCommand};
use worklog::open_command::{OpenArgs, OpenCommand};
use worklog::push_command::{PushArgs, PushCommand};
use worklog::source::WorklogLocation;
use worklog::summary_command::SummaryCommand;
use worklog::{logger, HeaderFormat, DEFAULT_HEADER_FORMAT};

/// テキスト形式のworklogを扱うためのCLIアプリケーション。
///
/// worklogは標準入力がパイプの場合はそこから、それ以外は`--worklog`で指定した場所から読み込む。
///
/// # Examples
/// ```
/// $ cargo run -- fmt json
/// $ cat worklog.txt | cargo run -- filter January
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(
        long = "worklog",
        env = "WORKLOG",
        help = "Worklog file path or URL [default: $HOME/worklog.txt]"
    )]
    worklog: Option<String>,

    #[clap(
        long = "header",
        env = "WORKLOG_HEADER",
        help = "Date header format in strftime syntax [default: \"# %-d %b %Y %A\"]"
    )]
    header: Option<String>,

    #[clap(
        short = 'v',
        long = "verbose",
        parse(from_occurrences),
        help = "Increase log verbosity"
    )]
    verbose: u64,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Format the worklog as text, json, csv or html
    Fmt(FmtArgs),
    /// Show only entries of the given month
    Filter(FilterArgs),
    /// Show the total duration
    Summary,
    /// Upload the formatted worklog to a remote storage
    Push(PushArgs),
    /// Add today's header and open the worklog in an editor
    Open(OpenArgs),
    /// Render an invoice from the worklog
    Invoice(InvoiceArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(args.verbose)?;

    let header = HeaderFormat::new(args.header.as_deref().unwrap_or(DEFAULT_HEADER_FORMAT))?;
    let location = WorklogLocation::resolve(args.worklog.as_deref())?;
    let mut output = io::stdout().lock();

    match args.subcommand {
        SubCommands::Open(open) => {
            let editor = CommandEditor::new(open.editor);
            OpenCommand::new(&editor, &header).run(&location)?;
        }
        SubCommands::Invoice(invoice) if invoice.generate => {
            InvoiceCommand::example(&mut output)?;
        }
        SubCommands::Fmt(fmt) => {
            let input = read_input(&location).await?;
            FmtCommand::new(&header).run(fmt, input, &mut output)?;
        }
        SubCommands::Filter(filter) => {
            let input = read_input(&location).await?;
            FilterCommand::new(&header).run(filter, input, &mut output)?;
        }
        SubCommands::Summary => {
            let input = read_input(&location).await?;
            SummaryCommand::new(&header).run(input, &mut output)?;
        }
        SubCommands::Push(push) => {
            let input = read_input(&location).await?;
            PushCommand::new(&header).run(push, input).await?;
        }
        SubCommands::Invoice(invoice) => {
            let input = read_input(&location).await?;
            InvoiceCommand::new(&header).run(invoice, input, &mut output)?;
        }
    }

    Ok(())
}

/// worklogの読み込み元を返す。
///
/// 標準入力がパイプの場合は標準入力を、それ以外は`location`を利用する。
async fn read_input(location: &WorklogLocation) -> Result<Box<dyn BufRead>> {
    if io::stdin().is_terminal() {
        location.open().await
    } else {
        Ok(Box::new(io::stdin().lock()))
    }
}
