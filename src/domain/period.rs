//! Time-of-day fare periods and the reference tables that hold them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FarePeriod {
    pub name: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub multiplier: f64,
}

/// Inclusive on both ends; all three must be zero-padded `HH:MM`.
pub fn covers(start: &str, end: &str, time: &str) -> bool {
    start <= time && time <= end
}

/// Seeded into every [`PeriodTable`]. Covers 00:00..=23:59 without gaps.
pub const CANONICAL_PERIODS: [FarePeriod; 4] = [
    FarePeriod {
        name: "Madrugada",
        start: "00:00",
        end: "05:59",
        multiplier: 1.2,
    },
    FarePeriod {
        name: "Normal",
        start: "06:00",
        end: "17:59",
        multiplier: 1.0,
    },
    FarePeriod {
        name: "Pico",
        start: "18:00",
        end: "20:59",
        multiplier: 1.1,
    },
    FarePeriod {
        name: "Noite",
        start: "21:00",
        end: "23:59",
        multiplier: 1.2,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodTable {
    DynamicFares,
    ScheduleGrid,
}

impl PeriodTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DynamicFares => "tarifas_dinamicas",
            Self::ScheduleGrid => "grade_horarios",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::DynamicFares, Self::ScheduleGrid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_periods_cover_the_whole_day() {
        for h in 0..24 {
            for m in [0, 30, 59] {
                let t = format!("{h:02}:{m:02}");
                let hits = CANONICAL_PERIODS.iter().filter(|p| covers(p.start, p.end, &t)).count();
                assert_eq!(hits, 1, "time {t} matched {hits} periods");
            }
        }
    }

    #[test]
    fn boundaries_belong_to_expected_period() {
        let find = |t: &str| CANONICAL_PERIODS.iter().find(|p| covers(p.start, p.end, t)).unwrap().name;
        assert_eq!(find("05:59"), "Madrugada");
        assert_eq!(find("06:00"), "Normal");
        assert_eq!(find("18:00"), "Pico");
        assert_eq!(find("20:59"), "Pico");
        assert_eq!(find("21:00"), "Noite");
    }
}
