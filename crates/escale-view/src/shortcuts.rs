//! One-keystroke sorts for the columns users reach for most.

/// Quick sorts offered alongside the table. Each binds to the first header
/// containing one of its keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickSort {
    Vessel,
    BillOfLadingDate,
}

impl QuickSort {
    pub const ALL: [Self; 2] = [Self::Vessel, Self::BillOfLadingDate];

    /// Header fragments that identify the target column.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Vessel => &["navire", "navires", "ship", "vessel"],
            Self::BillOfLadingDate => &["date b/l", "date bl", "date b l"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vessel => "vessel",
            Self::BillOfLadingDate => "B/L date",
        }
    }

    /// The header this shortcut would sort by, if the sheet has one.
    pub fn resolve<'a>(self, headers: &'a [String]) -> Option<&'a str> {
        find_column(headers, self.keywords())
    }
}

/// First header containing any of the keywords, case-insensitively.
pub fn find_column<'a>(headers: &'a [String], keywords: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| {
            let lowered = header.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .map(String::as_str)
}

/// Which shortcuts apply to this header set, with their resolved columns.
pub fn available_shortcuts(headers: &[String]) -> Vec<(QuickSort, &str)> {
    QuickSort::ALL
        .into_iter()
        .filter_map(|shortcut| shortcut.resolve(headers).map(|column| (shortcut, column)))
        .collect()
}
