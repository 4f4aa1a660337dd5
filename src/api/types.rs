use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Day of the planning week (Monday-start)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub const WORK_DAYS: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub const WEEKEND: [Day; 2] = [Day::Saturday, Day::Sunday];

    /// Offset from Monday (Monday = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    pub fn is_work_day(self) -> bool {
        !matches!(self, Day::Saturday | Day::Sunday)
    }

    /// The work day immediately before this one. Monday and the weekend have none.
    pub fn previous_work_day(self) -> Option<Day> {
        if !self.is_work_day() {
            return None;
        }
        self.index().checked_sub(1).map(|i| Day::WORK_DAYS[i])
    }

    /// The work day immediately after this one. Friday and the weekend have none.
    pub fn next_work_day(self) -> Option<Day> {
        if !self.is_work_day() {
            return None;
        }
        Day::WORK_DAYS.get(self.index() + 1).copied()
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

/// One value per weekday; all seven keys are always present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayTable<T> {
    pub monday: T,
    pub tuesday: T,
    pub wednesday: T,
    pub thursday: T,
    pub friday: T,
    pub saturday: T,
    pub sunday: T,
}

impl<T> DayTable<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Day, &T)> {
        Day::ALL.into_iter().map(move |day| (day, &self[day]))
    }
}

impl<T> Index<Day> for DayTable<T> {
    type Output = T;

    fn index(&self, day: Day) -> &T {
        match day {
            Day::Monday => &self.monday,
            Day::Tuesday => &self.tuesday,
            Day::Wednesday => &self.wednesday,
            Day::Thursday => &self.thursday,
            Day::Friday => &self.friday,
            Day::Saturday => &self.saturday,
            Day::Sunday => &self.sunday,
        }
    }
}

impl<T> IndexMut<Day> for DayTable<T> {
    fn index_mut(&mut self, day: Day) -> &mut T {
        match day {
            Day::Monday => &mut self.monday,
            Day::Tuesday => &mut self.tuesday,
            Day::Wednesday => &mut self.wednesday,
            Day::Thursday => &mut self.thursday,
            Day::Friday => &mut self.friday,
            Day::Saturday => &mut self.saturday,
            Day::Sunday => &mut self.sunday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftId {
    Morning,
    Afternoon,
    Night,
}

/// A named fixed shift with a canonical start hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPreset {
    pub id: ShiftId,
    pub label: &'static str,
    pub start_hour: f64,
}

pub const PRESETS: [ShiftPreset; 3] = [
    ShiftPreset { id: ShiftId::Morning, label: "Morning", start_hour: 6.0 },
    ShiftPreset { id: ShiftId::Afternoon, label: "Afternoon", start_hour: 13.0 },
    ShiftPreset { id: ShiftId::Night, label: "Night", start_hour: 20.0 },
];

impl ShiftId {
    pub fn preset(self) -> &'static ShiftPreset {
        match self {
            ShiftId::Morning => &PRESETS[0],
            ShiftId::Afternoon => &PRESETS[1],
            ShiftId::Night => &PRESETS[2],
        }
    }

    pub fn label(self) -> &'static str {
        self.preset().label
    }

    pub fn start_hour(self) -> f64 {
        self.preset().start_hour
    }
}

/// A free-form block anchored at `start_hour`; its length comes from the schedule policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailedShift {
    #[serde(rename = "startHour")]
    pub start_hour: f64,
}

pub type SimpleView = DayTable<Vec<ShiftId>>;
pub type DetailedView = DayTable<Option<DetailedShift>>;

/// One worker's plan for one week, identified by (worker_id, week_start)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(rename = "workerId")]
    pub worker_id: String,
    #[serde(rename = "weekStart")]
    pub week_start: NaiveDate,
    #[serde(rename = "simpleView")]
    pub simple_view: SimpleView,
    #[serde(rename = "detailedView")]
    pub detailed_view: DetailedView,
}

impl WeeklySchedule {
    pub fn empty(worker_id: impl Into<String>, week_start: NaiveDate) -> Self {
        Self {
            worker_id: worker_id.into(),
            week_start,
            simple_view: DayTable::default(),
            detailed_view: DayTable::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.simple_view.iter().all(|(_, presets)| presets.is_empty())
            && self.detailed_view.iter().all(|(_, block)| block.is_none())
    }
}
