use crate::model::{ScheduleEvent, SubjectMeta};
use std::collections::{BTreeMap, BTreeSet};

/// Cyclic palette for subject colors; subjects past the palette wrap around.
pub const SUBJECT_COLORS: [&str; 12] = [
    "#e3f2fd", "#ffe0b2", "#c8e6c9", "#fff9c4", "#e1bee7", "#b2dfdb", "#f0f4c3", "#b3e5fc",
    "#d1c4e9", "#ffcdd2", "#f8bbd0", "#cfd8dc",
];

const SHORT_LABEL_MAX: usize = 20;

/// Build the per-subject display table for every distinct non-empty subject
/// seen in the event list.
///
/// Colors follow the subject's rank in lexicographically sorted order, so the
/// assignment is stable across runs for the same subject set.
pub fn build_subject_meta(events: &[ScheduleEvent]) -> BTreeMap<String, SubjectMeta> {
    let subjects: BTreeSet<&str> = events
        .iter()
        .map(|event| event.subject.as_str())
        .filter(|subject| !subject.is_empty())
        .collect();

    let mut meta = BTreeMap::new();
    for (rank, subject) in subjects.into_iter().enumerate() {
        meta.insert(
            subject.to_string(),
            SubjectMeta {
                ects: "?".to_string(),
                status: "?".to_string(),
                verify: "?".to_string(),
                short: short_label(subject),
                color: SUBJECT_COLORS[rank % SUBJECT_COLORS.len()].to_string(),
            },
        );
    }

    meta
}

fn short_label(subject: &str) -> String {
    if subject.chars().count() <= SHORT_LABEL_MAX {
        subject.to_string()
    } else {
        let head: String = subject.chars().take(SHORT_LABEL_MAX - 3).collect();
        format!("{head}...")
    }
}
