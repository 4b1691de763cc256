use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Announcement type assigned by the categorizer.
///
/// The variant order is the order categories are listed in the summary sheet.
/// `Other` is the fallback when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Board Meeting")]
    BoardMeeting,
    #[serde(rename = "Financial Results")]
    FinancialResults,
    Dividend,
    #[serde(rename = "AGM/EGM")]
    AgmEgm,
    Acquisition,
    Investment,
    #[serde(rename = "Fund Raising")]
    FundRaising,
    #[serde(rename = "Merger/Demerger")]
    MergerDemerger,
    #[serde(rename = "Change in Directors")]
    ChangeInDirectors,
    #[serde(rename = "Corporate Action")]
    CorporateAction,
    #[serde(rename = "Investor Presentation")]
    InvestorPresentation,
    #[serde(rename = "Concall Transcript")]
    ConcallTranscript,
    #[serde(rename = "Order Win")]
    OrderWin,
    Expansion,
    Rating,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 16] = [
        Category::BoardMeeting,
        Category::FinancialResults,
        Category::Dividend,
        Category::AgmEgm,
        Category::Acquisition,
        Category::Investment,
        Category::FundRaising,
        Category::MergerDemerger,
        Category::ChangeInDirectors,
        Category::CorporateAction,
        Category::InvestorPresentation,
        Category::ConcallTranscript,
        Category::OrderWin,
        Category::Expansion,
        Category::Rating,
        Category::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::BoardMeeting => "Board Meeting",
            Category::FinancialResults => "Financial Results",
            Category::Dividend => "Dividend",
            Category::AgmEgm => "AGM/EGM",
            Category::Acquisition => "Acquisition",
            Category::Investment => "Investment",
            Category::FundRaising => "Fund Raising",
            Category::MergerDemerger => "Merger/Demerger",
            Category::ChangeInDirectors => "Change in Directors",
            Category::CorporateAction => "Corporate Action",
            Category::InvestorPresentation => "Investor Presentation",
            Category::ConcallTranscript => "Concall Transcript",
            Category::OrderWin => "Order Win",
            Category::Expansion => "Expansion",
            Category::Rating => "Rating",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Three-level heuristic rating derived from keyword counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Implication {
    Positive,
    Neutral,
    Cautious,
}

impl Implication {
    pub const ALL: [Implication; 3] = [
        Implication::Positive,
        Implication::Neutral,
        Implication::Cautious,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Implication::Positive => "Positive",
            Implication::Neutral => "Neutral",
            Implication::Cautious => "Cautious",
        }
    }
}

impl std::fmt::Display for Implication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single disclosure as fetched from the exchange, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementRecord {
    pub company: String,
    pub scrip_code: String,
    /// Category text supplied by the exchange; may be empty.
    pub source_category: String,
    pub subject: String,
    /// Free-text body. Empty when the exchange sent none.
    pub body_text: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Link to the filing attachment. Empty when there is no attachment.
    pub pdf_url: String,
}

/// An announcement together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredAnnouncement {
    pub record: AnnouncementRecord,
    pub category: Category,
    pub highlights: String,
    pub implication: Implication,
}
