use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 職缺來源，每個來源有自己的分頁起點、幣別白名單與報表標題
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    HeadHunter,
    SuperJob,
}

impl Source {
    /// 報表順序：HeadHunter 在前
    pub const ALL: [Source; 2] = [Source::HeadHunter, Source::SuperJob];

    /// 第一頁的索引（HeadHunter 從 0 開始，SuperJob 從 1 開始）
    pub fn first_page(self) -> u32 {
        match self {
            Source::HeadHunter => 0,
            Source::SuperJob => 1,
        }
    }

    /// 視為參考幣別的代碼，大小寫敏感
    pub fn currency_allow_list(self) -> &'static [&'static str] {
        match self {
            Source::HeadHunter => &["RUR"],
            Source::SuperJob => &["rub"],
        }
    }

    pub fn accepts_currency(self, code: &str) -> bool {
        self.currency_allow_list().contains(&code)
    }

    pub fn title(self) -> &'static str {
        match self {
            Source::HeadHunter => "HeadHunter Moscow",
            Source::SuperJob => "SuperJob Moscow",
        }
    }

    /// 用於檔名與設定檔的識別字
    pub fn slug(self) -> &'static str {
        match self {
            Source::HeadHunter => "headhunter",
            Source::SuperJob => "superjob",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::HeadHunter => write!(f, "HeadHunter"),
            Source::SuperJob => write!(f, "SuperJob"),
        }
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headhunter" | "hh" => Ok(Source::HeadHunter),
            "superjob" | "sj" => Ok(Source::SuperJob),
            other => Err(format!(
                "unknown source '{}', expected one of: headhunter, superjob",
                other
            )),
        }
    }
}

/// 各來源回應轉換後的共通職缺薪資欄位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    pub currency: Option<String>,
    pub payment_from: Option<f64>,
    pub payment_to: Option<f64>,
}

impl RawListing {
    pub fn new(currency: Option<&str>, payment_from: Option<f64>, payment_to: Option<f64>) -> Self {
        Self {
            currency: currency.map(str::to_string),
            payment_from,
            payment_to,
        }
    }
}

/// 來源回應中用來判斷是否還有下一頁的欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// 總頁數（HeadHunter 的 `pages`）
    Pages(u32),
    /// 總筆數（SuperJob 的 `total`）
    Total(u64),
}

impl Continuation {
    /// `page` 是剛取得的頁索引，`accumulated` 是目前累積的職缺數
    pub fn is_exhausted(&self, page: u32, accumulated: usize) -> bool {
        match *self {
            Continuation::Pages(pages) => u64::from(page) + 1 >= u64::from(pages),
            Continuation::Total(total) => accumulated as u64 >= total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub listings: Vec<RawListing>,
    pub continuation: Continuation,
}

/// 以參考幣別估算的月薪；`None` 代表無法使用
pub type NormalizedSalary = Option<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageSalary {
    Amount(i64),
    NotFound,
}

impl fmt::Display for AverageSalary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageSalary::Amount(amount) => write!(f, "{}", amount),
            AverageSalary::NotFound => write!(f, "not found"),
        }
    }
}

impl Serialize for AverageSalary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AverageSalary::Amount(amount) => serializer.serialize_i64(*amount),
            AverageSalary::NotFound => serializer.serialize_str("not found"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageStats {
    pub vacancies_found: usize,
    pub vacancies_processed: usize,
    pub average_salary: AverageSalary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageRow {
    pub language: String,
    pub stats: LanguageStats,
}

/// 單一來源的統計表，列的順序與語言清單一致
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsTable {
    pub source: Source,
    pub title: String,
    pub rows: Vec<LanguageRow>,
    pub failure: Option<String>,
}

impl StatsTable {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            title: source.title().to_string(),
            rows: Vec::new(),
            failure: None,
        }
    }

    pub fn push(&mut self, language: &str, stats: LanguageStats) {
        self.rows.push(LanguageRow {
            language: language.to_string(),
            stats,
        });
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStats> {
        self.rows
            .iter()
            .find(|row| row.language == language)
            .map(|row| &row.stats)
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    pub tables: Vec<StatsTable>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl SurveyReport {
    pub fn table(&self, source: Source) -> Option<&StatsTable> {
        self.tables.iter().find(|table| table.source == source)
    }
}
