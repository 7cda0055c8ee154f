// `?view=` routing.
//
// The value is matched case-insensitively, so the nav links can use the
// worksheet names as-is (`?view=answerA`). Anything unrecognised falls
// back to the home view.

/// Which worksheet panels a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Both clouds side by side, with the dashboard title
    #[default]
    Home,
    /// Only the answerA cloud
    AnswerA,
    /// Only the answerB cloud
    AnswerB,
    /// Both clouds on one screen (same panels as home)
    Both,
}

impl View {
    /// Parse the raw query value. Missing, empty and unknown values are `Home`.
    pub fn parse(raw: Option<&str>) -> Self {
        let value = raw.map(|v| v.trim().to_lowercase()).unwrap_or_default();
        match value.as_str() {
            "answera" => View::AnswerA,
            "answerb" => View::AnswerB,
            "both" => View::Both,
            _ => View::Home,
        }
    }

    /// Value used in links back to this view.
    pub fn as_query(self) -> &'static str {
        match self {
            View::Home => "home",
            View::AnswerA => "answerA",
            View::AnswerB => "answerB",
            View::Both => "both",
        }
    }

    /// True when the page shows both worksheets.
    pub fn is_split(self) -> bool {
        matches!(self, View::Home | View::Both)
    }
}
