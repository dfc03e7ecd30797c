//! View Catalog Module
//! The four confidence indices: column layout, titles, survey questions and
//! how each index is calculated from the answers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Unknown view identifier: {0:?}")]
    UnknownViewIdentifier(String),
}

/// One of the four confidence indices tracked by the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexSelector {
    OneYear,
    Crash,
    BuyDips,
    Valuation,
}

impl Default for IndexSelector {
    fn default() -> Self {
        IndexSelector::OneYear
    }
}

/// Column positions of an index pair within a CSV row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub institutional: usize,
    pub individual: usize,
}

/// Enumerated answer choices listed under a survey question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionItems {
    None,
    Bulleted(&'static [&'static str]),
    Numbered(&'static [&'static str]),
}

/// Static reference text shown next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewInfo {
    pub title: &'static str,
    pub question: &'static str,
    pub items: QuestionItems,
    pub calculation: &'static str,
}

static ONE_YEAR: ViewInfo = ViewInfo {
    title: "U.S. One-Year Confidence Index",
    question: "How much of a change in percentage terms do you expect in the following \
        (use + before your number to indicate an expected increase, or - to indicate an \
        expected decrease, leave blanks where you do not know).",
    items: QuestionItems::Bulleted(&[
        "In 1 month",
        "In 3 months",
        "In 6 months",
        "In 1 year",
        "In 10 years",
    ]),
    calculation: "The percent of the population expecting an increase in the Dow in the \
        coming year. The One-Year Confidence Index is the percentage of respondents giving \
        a number strictly greater than zero for \"in 1 year.\" Note that the question is \
        worded to mention the possibility that the respondent could predict a downturn, and \
        so this question will obtain more such responses than more optimistically worded \
        questions used by some other surveys. However, the issue is how the answers change \
        through time, and the wording of the question has not been changed through time \
        (except to add the 1-month and the ten-year categories, which were not on the \
        earliest questionnaires).",
};

static CRASH: ViewInfo = ViewInfo {
    title: "U.S. Crash Confidence Index",
    question: "What do you think is the probability of a catastrophic stock market crash in \
        the U. S., like that of October 28, 1929 or October 19, 1987, in the next six months, \
        including the case that a crash occurred in the other countries and spreads to the \
        U. S.? (An answer of 0% means that it cannot happen, an answer of 100% means it is \
        sure to happen.)",
    items: QuestionItems::None,
    calculation: "The percent of the population who attach little probability to a stock \
        market crash in the next six months. The Crash Confidence Index is the percentage of \
        respondents who think that the probability is strictly less than 10%. There were \
        slight wording changes in this question, but inessential.",
};

static BUY_DIPS: ViewInfo = ViewInfo {
    title: "U.S. Buy-on-Dips Confidence Index",
    question: "If the Dow dropped 3% tomorrow, I would guess that the day after tomorrow the \
        Dow would: [Circle 1, 2, 3, or 4]",
    items: QuestionItems::Numbered(&[
        "Increase   Give percent: ---%",
        "Decrease   Give percent: ---%",
        "Stay the same",
        "No opinion",
    ]),
    calculation: "The percent of the population expecting a rebound the next day should the \
        market ever drop 3% in one day. The Buy-On-Dips Confidence Index is the number of \
        respondents who choose 1 (increase) as a percent of those who chose 1, 2 or 3. This \
        question was never changed.",
};

static VALUATION: ViewInfo = ViewInfo {
    title: "U.S. Valuation Confidence Index",
    question: "Stock prices in the United States, when compared with measures of true \
        fundamental value or sensible investment value, area: [Circle 1, 2, 3, or 4]",
    items: QuestionItems::Numbered(&["Too Low", "Too high", "About right", "Do not know"]),
    calculation: "The percent of the population who think that the market is not too high. \
        The Valuation Confidence Index is the number of respondents who choose 1 (Too Low) \
        or 3 (About right) as a percentage of those who choose 1, 2, or 3. The wording of \
        this question was never changed, and it was always the first question on the \
        questionnaire.",
};

impl IndexSelector {
    pub const ALL: [IndexSelector; 4] = [
        IndexSelector::OneYear,
        IndexSelector::Crash,
        IndexSelector::BuyDips,
        IndexSelector::Valuation,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            IndexSelector::OneYear => "one-year",
            IndexSelector::Crash => "crash",
            IndexSelector::BuyDips => "buy-dips",
            IndexSelector::Valuation => "valuation",
        }
    }

    /// Short label for buttons.
    pub fn label(self) -> &'static str {
        match self {
            IndexSelector::OneYear => "One-Year",
            IndexSelector::Crash => "Crash",
            IndexSelector::BuyDips => "Buy-on-Dips",
            IndexSelector::Valuation => "Valuation",
        }
    }

    /// Column 0 is the date; each index occupies two adjacent columns.
    pub fn columns(self) -> ColumnPair {
        let institutional = match self {
            IndexSelector::OneYear => 1,
            IndexSelector::Crash => 3,
            IndexSelector::BuyDips => 5,
            IndexSelector::Valuation => 7,
        };
        ColumnPair {
            institutional,
            individual: institutional + 1,
        }
    }

    pub fn info(self) -> &'static ViewInfo {
        match self {
            IndexSelector::OneYear => &ONE_YEAR,
            IndexSelector::Crash => &CRASH,
            IndexSelector::BuyDips => &BUY_DIPS,
            IndexSelector::Valuation => &VALUATION,
        }
    }

    pub fn title(self) -> &'static str {
        self.info().title
    }
}

impl FromStr for IndexSelector {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|selector| selector.id() == s)
            .ok_or_else(|| ViewError::UnknownViewIdentifier(s.to_string()))
    }
}

impl fmt::Display for IndexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
