use std::io::BufRead;

use anyhow::{Context, Result};
use log::info;

use crate::header::HeaderFormat;
use crate::parser::parse;
use crate::serializer::to_text;
use crate::store::WorklogStore;

/// `push`サブコマンドの引数。
#[derive(Debug, clap::Args)]
pub struct PushArgs {
    #[clap(long = "url", help = "Worklog storage URL")]
    url: String,

    #[clap(long = "token", default_value = "", help = "Worklog storage write token")]
    token: String,
}

pub struct PushCommand<'a> {
    header: &'a HeaderFormat,
}

impl<'a> PushCommand<'a> {
    /// 新しい`PushCommand`を返す。
    ///
    /// # Arguments
    /// * `header` - 日付見出しの書式
    pub fn new(header: &'a HeaderFormat) -> Self {
        Self { header }
    }

    /// `push`サブコマンドの処理を行う。
    ///
    /// worklogを整形し直したテキストをリモートのストレージに保存する。
    pub async fn run<R: BufRead>(&self, args: PushArgs, input: R) -> Result<()> {
        let entries = parse(input, self.header).context("Failed to parse worklog")?;
        let mut body = Vec::new();
        to_text(&mut body, &entries, self.header).context("Failed to format to text")?;

        WorklogStore::new(args.url, args.token)
            .put(body)
            .await
            .context("Failed to push worklog")?;
        info!("Worklog pushed successfully.");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PushArgs, PushCommand};
    use crate::header::HeaderFormat;

    #[tokio::test]
    async fn test_push_command() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/worklog")
            .match_header("write-token", "secret")
            .match_body("# 2 Jan 2006 Monday\n1h Task one\n   continued\n\n")
            .with_status(200)
            .create_async()
            .await;
        let header = HeaderFormat::default();
        let args = PushArgs {
            url: format!("{}/worklog", server.url()),
            token: "secret".to_string(),
        };
        let worklog = "# 2 Jan 2006 Monday\n  1h Task one\ncontinued\n# 3 Jan 2006 Tuesday\n";

        let result = PushCommand::new(&header).run(args, worklog.as_bytes()).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_push_command_invalid_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/worklog")
            .with_status(401)
            .create_async()
            .await;
        let header = HeaderFormat::default();
        let args = PushArgs {
            url: format!("{}/worklog", server.url()),
            token: "wrong".to_string(),
        };

        let error = PushCommand::new(&header)
            .run(args, "".as_bytes())
            .await
            .unwrap_err();

        assert_eq!(
            format!("{:#}", error),
            "Failed to push worklog: forbidden: invalid push token"
        );
    }
}
