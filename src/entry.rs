use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};

/// 1日分の作業記録。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entry {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
}

impl Entry {
    /// タスクを持たない新しい`Entry`を返す。
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            tasks: Vec::new(),
        }
    }

    /// 全タスクの作業時間の合計を返す。
    pub fn total_duration(&self) -> Duration {
        sum_durations(self.tasks.iter().map(|task| task.duration))
    }
}

/// 全Entryの作業時間の合計を返す。
pub fn total_duration(entries: &[Entry]) -> Duration {
    sum_durations(entries.iter().map(Entry::total_duration))
}

// 合計は`Duration::MAX`で頭打ちにする。
fn sum_durations(durations: impl Iterator<Item = Duration>) -> Duration {
    durations.fold(Duration::zero(), |total, duration| {
        total.checked_add(&duration).unwrap_or(Duration::MAX)
    })
}

/// 作業時間の付いた1つの作業。
///
/// `description`は複数行を`\n`で連結したもの。
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Task {
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: Duration,
    pub description: String,
}

impl Task {
    /// 説明が空の新しい`Task`を返す。
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            description: String::new(),
        }
    }

    /// 説明に1行分のテキストを追加する。
    ///
    /// 既に説明がある場合は改行を挟む。テキスト中の`"; "`は`".\n"`に置き換える。
    pub fn append_description(&mut self, chunk: &str) {
        if !self.description.is_empty() {
            self.description.push('\n');
        }
        self.description.push_str(&chunk.replace("; ", ".\n"));
    }

    /// 説明の各行を返す。
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.description.split('\n')
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new(Duration::zero())
    }
}

fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}
