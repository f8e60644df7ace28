use serde::{Deserialize, Serialize};

/// One timetable-slot occurrence as found on the plan page.
///
/// Times are "HH:MM" strings, left empty when no extraction technique
/// recovered them. All other fields degrade to empty strings per-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub day: String,
    pub start: String,
    pub end: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub group: String,
    pub room: String,
}

/// Per-subject display record synthesized from the extracted event list.
///
/// `ects`, `status` and `verify` are never computed; they carry the "?"
/// placeholder so the template can render the columns uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectMeta {
    pub ects: String,
    pub status: String,
    pub verify: String,
    pub short: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchReport {
    pub built: usize,
    pub total: usize,
}
