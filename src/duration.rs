use anyhow::{bail, Context, Result};
use chrono::Duration;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

/// 作業時間のトークン(`30m`, `2h`, `1h30m`, `1.5h`など)を解析する。
///
/// 数値と単位の組を1つ以上並べたものを受け付ける。単位は`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`。
/// 単位のない`0`だけはゼロとして扱う。負の値は受け付けない。
pub fn parse(token: &str) -> Result<Duration> {
    let mut rest = token.strip_prefix('+').unwrap_or(token);
    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        bail!("invalid duration {:?}", token);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (integer, after_integer) = split_digits(rest);
        let (fraction, after_fraction) = match after_integer.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_integer),
        };
        if integer.is_empty() && fraction.is_empty() {
            bail!("invalid duration {:?}", token);
        }

        let unit_end = after_fraction
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_fraction.len());
        let unit = unit_scale(&after_fraction[..unit_end])
            .with_context(|| format!("invalid duration {:?}", token))?;
        rest = &after_fraction[unit_end..];

        total = integer_value(integer)
            .and_then(|value| value.checked_mul(unit))
            .and_then(|value| value.checked_add(fraction_value(fraction, unit)))
            .and_then(|value| total.checked_add(value))
            .with_context(|| format!("invalid duration {:?}", token))?;
    }

    let nanos = i64::try_from(total).with_context(|| format!("invalid duration {:?}", token))?;
    Ok(Duration::nanoseconds(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_scale(unit: &str) -> Result<u128> {
    let scale = match unit {
        "ns" => NANOSECOND,
        "us" | "\u{b5}s" | "\u{3bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        "" => bail!("missing unit"),
        _ => bail!("unknown unit {:?}", unit),
    };
    Ok(scale)
}

fn integer_value(digits: &str) -> Option<u128> {
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

// 小数部はナノ秒未満を切り捨てる。
fn fraction_value(digits: &str, unit: u128) -> u128 {
    let mut value = 0;
    let mut scale = 1;
    for digit in digits.bytes().map(|b| u128::from(b - b'0')) {
        if scale > u128::from(u64::MAX) {
            break;
        }
        value = value * 10 + digit;
        scale *= 10;
    }
    value * unit / scale
}

/// 作業時間を`37h30m0s`のような文字列にする。
pub fn format(duration: Duration) -> String {
    let nanos = duration.num_nanoseconds().unwrap_or(i64::MAX);
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = u128::from(nanos.unsigned_abs());

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < MICROSECOND {
        return format!("{}{}ns", sign, nanos);
    }
    if nanos < MILLISECOND {
        return format!("{}{}µs", sign, fraction(nanos, MICROSECOND));
    }
    if nanos < SECOND {
        return format!("{}{}ms", sign, fraction(nanos, MILLISECOND));
    }

    let seconds = fraction(nanos % MINUTE, SECOND);
    if nanos < MINUTE {
        return format!("{}{}s", sign, seconds);
    }
    let minutes = nanos / MINUTE % 60;
    if nanos < HOUR {
        return format!("{}{}m{}s", sign, minutes, seconds);
    }
    format!("{}{}h{}m{}s", sign, nanos / HOUR, minutes, seconds)
}

// `value / unit`を末尾の0を除いた小数で表す。
fn fraction(value: u128, unit: u128) -> String {
    let integer = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return integer.to_string();
    }

    let width = unit.to_string().len() - 1;
    let digits = format!("{:0width$}", remainder, width = width);
    format!("{}.{}", integer, digits.trim_end_matches('0'))
}
