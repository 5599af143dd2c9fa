use std::io::BufRead;

use anyhow::{bail, Context, Result};
use serde::Serialize;

/// `invoice -g`で出力する設定ファイルの例。
pub const EXAMPLE_CONFIG: &str = "\
Debtor            =

ToCompany         =
ToAddress         =
ToCo              =
ToVATID           =

FromName          =
FromAddress       =
FromCountry       =
FromVATID         =
FromEmail         =

PaymentName       =
PaymentIBAN       =
PaymentBIC        =
PaymentBankName   =

ItemRate          = 100
ItemDescription   = Software development.

# Below entries are generated from the worklog if not provided.
ItemHours         =
InvoiceNumber     =
InvoiceDate       =

# Any additional note to add at the bottom of the invoice. This might be for
# example a \"no tax\" information.
BottomNote        = Because of small businesses regulation (Section 19 para 1 german sales tax law - UStG -) no sales tax is accounted.

# If an additional VAT payment must be included, specify here the % value of it.
# For example, 19% VAT value should be here as 19.
VATPaymentPerc    = 0

# base64 encoded PNG image.
SignatureBase64   =
";

/// 請求書の設定。
///
/// `Key = Value`形式の設定ファイルから読み込む。
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InvoiceConfig {
    pub debtor: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub to_company: String,
    pub to_address: String,
    pub to_co: String,
    pub to_vat_id: String,
    pub from_name: String,
    pub from_address: String,
    pub from_country: String,
    pub from_vat_id: String,
    pub from_email: String,
    pub payment_name: String,
    pub payment_iban: String,
    pub payment_bic: String,
    pub payment_bank_name: String,
    pub item_description: String,
    pub item_hours: i64,
    pub item_rate: i64,
    pub bottom_note: String,
    pub signature_base64: String,
    pub vat_payment_perc: i64,
}

impl InvoiceConfig {
    /// 設定ファイルを読み込む。
    ///
    /// 空行と`#`で始まる行は無視する。値の中の`\n`という2文字は改行に置き換える。
    /// 知らないキー、`=`のない行、数値でない数値項目はエラーになる。
    ///
    /// # Arguments
    ///
    /// * `reader` - 設定ファイルの読み込み元
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut config = Self::default();
        for (number, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read configuration")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected \"Key = Value\"", number + 1))?;
            config
                .set(name.trim(), value.trim().replace("\\n", "\n"))
                .with_context(|| format!("line {}", number + 1))?;
        }

        Ok(config)
    }

    fn set(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "Debtor" => self.debtor = value,
            "InvoiceNumber" => self.invoice_number = value,
            "InvoiceDate" => self.invoice_date = value,
            "ToCompany" => self.to_company = value,
            "ToAddress" => self.to_address = value,
            "ToCo" => self.to_co = value,
            "ToVATID" => self.to_vat_id = value,
            "FromName" => self.from_name = value,
            "FromAddress" => self.from_address = value,
            "FromCountry" => self.from_country = value,
            "FromVATID" => self.from_vat_id = value,
            "FromEmail" => self.from_email = value,
            "PaymentName" => self.payment_name = value,
            "PaymentIBAN" => self.payment_iban = value,
            "PaymentBIC" => self.payment_bic = value,
            "PaymentBankName" => self.payment_bank_name = value,
            "ItemDescription" => self.item_description = value,
            "ItemHours" => self.item_hours = parse_number(name, &value)?,
            "ItemRate" => self.item_rate = parse_number(name, &value)?,
            "BottomNote" => self.bottom_note = value,
            "SignatureBase64" => self.signature_base64 = value,
            "VATPaymentPerc" => self.vat_payment_perc = parse_number(name, &value)?,
            _ => bail!("cannot set {:?} field value", name),
        }
        Ok(())
    }
}

// 空の値は0として扱う。
fn parse_number(name: &str, value: &str) -> Result<i64> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .with_context(|| format!("value of {:?} is not a valid number: {:?}", name, value))
}
