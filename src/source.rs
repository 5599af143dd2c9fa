use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use reqwest::Client;

/// worklogの置き場所。
#[derive(Clone, Debug, PartialEq)]
pub enum WorklogLocation {
    Path(PathBuf),
    Url(String),
}

impl WorklogLocation {
    /// 指定された文字列から置き場所を決める。
    ///
    /// `http://`または`https://`で始まる場合はURL、それ以外はファイルのパスとして扱う。
    /// 指定がない場合はホームディレクトリの`worklog.txt`を利用する。
    ///
    /// # Arguments
    ///
    /// * `location` - パスまたはURL
    pub fn resolve(location: Option<&str>) -> Result<Self> {
        match location {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Self::Url(url.to_string()))
            }
            Some(path) => Ok(Self::Path(PathBuf::from(path))),
            None => {
                let home = dirs::home_dir().context("Failed to find the home directory")?;
                Ok(Self::Path(home.join("worklog.txt")))
            }
        }
    }

    /// worklogを読み込むためのreaderを返す。
    ///
    /// URLの場合は内容を全て取得してから返す。
    pub async fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Self::Path(path) => {
                info!("Reading worklog from {}", path.display());
                let file = File::open(path)
                    .with_context(|| format!("cannot open {:?}", path.display().to_string()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Self::Url(url) => {
                info!("Fetching worklog from {}", url);
                let body = Client::new()
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("Failed to send request to {}", url))?
                    .error_for_status()
                    .context("Request returned an error status")?
                    .bytes()
                    .await
                    .context("Failed to read response body")?;
                Ok(Box::new(Cursor::new(body.to_vec())))
            }
        }
    }
}
