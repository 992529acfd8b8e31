use serde::{Deserialize, Serialize};

// 上课日（周一至周五）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
        }
    }
}

impl std::str::FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONDAY" => Ok(Day::Monday),
            "TUESDAY" => Ok(Day::Tuesday),
            "WEDNESDAY" => Ok(Day::Wednesday),
            "THURSDAY" => Ok(Day::Thursday),
            "FRIDAY" => Ok(Day::Friday),
            _ => Err(format!("Invalid day: {s}")),
        }
    }
}

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub name: String,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonListItem {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub subject_name: Option<String>,
    pub class_name: Option<String>,
    pub teacher_name: Option<String>,
}

// 课表条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub lesson_id: i64,
    pub title: String,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub class_name: Option<String>,
    pub subject_name: Option<String>,
}
