use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::entry::{self, Entry};
use crate::invoice_config::InvoiceConfig;

const INVOICE_TEMPLATE: &str = include_str!("../templates/invoice.html.hbs");

/// 設定とworklogから作成した請求書の内容。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Invoice {
    pub config: InvoiceConfig,
    pub item_total: f64,
    pub vat_total: f64,
    pub total: f64,
}

impl Invoice {
    /// 設定で指定されていない項目をworklogから補って請求書を作成する。
    ///
    /// - `ItemHours`が0の場合は全Entryの合計時間(時間単位に切り捨て)
    /// - `InvoiceDate`が空の場合は最後の日
    /// - `InvoiceNumber`が空の場合は最後の日の月の1日
    ///
    /// Entryが1つもない場合はエラーを返す。
    ///
    /// # Arguments
    ///
    /// * `config` - 請求書の設定
    /// * `entries` - 請求対象のEntry
    pub fn from_log(mut config: InvoiceConfig, entries: &[Entry]) -> Result<Self> {
        let (first, last) = entries
            .first()
            .zip(entries.last())
            .context("worklog has no entries")?;

        if config.item_hours == 0 {
            config.item_hours = entry::total_duration(entries).num_hours();
        }
        if config.invoice_date.is_empty() {
            config.invoice_date = last.day.format("%Y-%m-%d").to_string();
        }
        if config.invoice_number.is_empty() {
            config.invoice_number = last.day.format("%Y-%m-01").to_string();
        }
        config.item_description += &format!(
            "<br><em>({} - {})</em>",
            first.day.format("%d.%m.%Y"),
            last.day.format("%d.%m.%Y"),
        );

        let item_total = (config.item_hours * config.item_rate) as f64;
        let vat_total = if config.vat_payment_perc > 0 {
            item_total * config.vat_payment_perc as f64 / 100.0
        } else {
            0.0
        };

        Ok(Self {
            config,
            item_total,
            vat_total,
            total: item_total + vat_total,
        })
    }

    /// 請求書をHTMLにする。
    pub fn render(&self) -> Result<String> {
        handlebars_helper!(pretty_number: |n: f64| format_number_de(n));

        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("invoice", INVOICE_TEMPLATE)
            .context("Failed to register invoice template")?;
        handlebars.register_helper("prettyNumber", Box::new(pretty_number));

        handlebars
            .render("invoice", self)
            .context("Failed to render invoice template")
    }
}

/// 金額をドイツ式の表記にする。
///
/// 3桁毎に`.`で区切り、小数部は`,`の後に2桁で表す。小数部がない場合は`,-`とする。
pub fn format_number_de(n: f64) -> String {
    let cents = (n * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    match cents % 100 {
        0 => format!("{}{},-", sign, grouped),
        rest => format!("{}{},{:02}", sign, grouped, rest),
    }
}
