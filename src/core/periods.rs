//! Time periods accepted by the "top" reports

use std::fmt;

/// Period values the upstream API understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Overall,
    SevenDays,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Overall,
        Period::SevenDays,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::TwelveMonths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::SevenDays => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month",
            Period::TwelveMonths => "12month",
        }
    }

    /// Map a query value to a period. Aliases `week` and `year` are accepted,
    /// anything unrecognised (or missing) falls back to one month.
    pub fn resolve(raw: Option<&str>) -> Period {
        let Some(raw) = raw else {
            return Period::default();
        };

        if let Some(period) = Period::ALL.iter().find(|p| p.as_str() == raw) {
            return *period;
        }

        match raw {
            "week" => Period::SevenDays,
            "year" => Period::TwelveMonths,
            _ => Period::default(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
