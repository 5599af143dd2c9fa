use std::io::Write;

use anyhow::{Context, Result};
use chrono::Datelike;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::console::ConsolePresenter;
use crate::entry::Entry;

const WORKLOG_TEMPLATE: &str = include_str!("../templates/worklog.html.hbs");

/// 月毎の表示内容。
#[derive(Debug, PartialEq, Serialize)]
struct MonthView {
    title: String,
    hours: i64,
    days: Vec<DayView>,
}

#[derive(Debug, PartialEq, Serialize)]
struct DayView {
    date: String,
    seconds: i64,
    tasks: Vec<TaskView>,
}

#[derive(Debug, PartialEq, Serialize)]
struct TaskView {
    seconds: i64,
    description: String,
}

#[derive(Serialize)]
struct HtmlContext {
    months: Vec<MonthView>,
}

/// EntryをHTMLのカレンダー形式で表示する。
///
/// 最初の日から最後の日までの全ての日を新しい順に並べ、月毎にまとめる。
pub struct ConsoleHtml<'a, W: Write> {
    writer: &'a mut W,
    handlebars: Handlebars<'static>,
}

impl<'a, W: Write> ConsoleHtml<'a, W> {
    /// 新しい`ConsoleHtml`を返す。
    pub fn new(writer: &'a mut W) -> Result<Self> {
        handlebars_helper!(narrowhours: |seconds: i64| {
            let hours = seconds / 3600;
            if hours == 0 {
                String::new()
            } else {
                format!("{}h", hours)
            }
        });

        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("worklog", WORKLOG_TEMPLATE)
            .context("Failed to register worklog template")?;
        handlebars.register_helper("narrowhours", Box::new(narrowhours));

        Ok(Self { writer, handlebars })
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleHtml<'a, W> {
    fn show_entries(&mut self, entries: &[Entry]) -> Result<()> {
        let mut days = fill_missing_days(entries);
        days.sort_by(|a, b| b.day.cmp(&a.day));

        let context = HtmlContext {
            months: group_by_month(&days),
        };
        let html = self
            .handlebars
            .render("worklog", &context)
            .context("Failed to render template")?;
        self.writer
            .write_all(html.as_bytes())
            .context("Failed to write to output")?;

        Ok(())
    }
}

/// 最初のEntryから最後のEntryまでの間で、記録のない日を空のEntryで埋める。
///
/// Entryは日付順に並んでいる必要がある。同じ日付のEntryはタスクを順に連結して1日分にまとめる。
/// 前の日付に戻るEntryは読み飛ばす。
pub fn fill_missing_days(entries: &[Entry]) -> Vec<Entry> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Vec::new();
    };

    let mut remaining = entries.iter().peekable();
    first
        .day
        .iter_days()
        .take_while(|day| *day <= last.day)
        .map(|day| {
            let mut filled = Entry::new(day);
            while let Some(entry) = remaining.next_if(|entry| entry.day <= day) {
                if entry.day == day {
                    filled.tasks.extend(entry.tasks.iter().cloned());
                }
            }
            filled
        })
        .collect()
}

fn group_by_month(days: &[Entry]) -> Vec<MonthView> {
    let mut months: Vec<MonthView> = Vec::new();
    let mut current_month = None;
    for entry in days {
        let month = (entry.day.year(), entry.day.month());
        if current_month != Some(month) {
            current_month = Some(month);
            months.push(MonthView {
                title: entry.day.format("%B %Y").to_string(),
                hours: 0,
                days: Vec::new(),
            });
        }

        let total = entry.total_duration();
        let view = DayView {
            date: entry.day.format("%a %-d").to_string(),
            seconds: total.num_seconds(),
            tasks: entry
                .tasks
                .iter()
                .map(|task| TaskView {
                    seconds: task.duration.num_seconds(),
                    description: task.description.clone(),
                })
                .collect(),
        };
        if let Some(month) = months.last_mut() {
            month.hours += view.seconds;
            month.days.push(view);
        }
    }

    for month in &mut months {
        month.hours /= 3600;
    }
    months
}
