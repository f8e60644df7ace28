use crate::model::ScheduleEvent;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Day labels assumed for the usual five-day plan; days past this list fall
/// back to "Day N".
const WEEKDAY_LABELS: [&str; 5] = ["Poniedziałek", "Wtorek", "Środa", "Czwartek", "Piątek"];

/// Parse a USOS plan page and return every schedule entry in document order.
///
/// Malformed entries never abort the scan; each field degrades to an empty
/// string on its own.
pub fn extract_events(page: &str) -> Vec<ScheduleEvent> {
    let document = Html::parse_document(page);

    let sel_root = Selector::parse("usos-timetable").expect("root selector must be valid");
    let sel_day = Selector::parse("timetable-day").expect("day selector must be valid");
    let sel_entry = Selector::parse("timetable-entry").expect("entry selector must be valid");
    let sel_heading = Selector::parse("h4").expect("heading selector must be valid");
    let sel_time = Selector::parse(r#"span[slot="time"]"#).expect("time selector must be valid");
    let sel_dialog =
        Selector::parse(r#"span[slot="dialog-event"]"#).expect("dialog selector must be valid");
    let sel_info = Selector::parse(r#"div[slot="info"]"#).expect("info selector must be valid");

    let range_re = Regex::new(r"(\d{1,2}:\d{2})\s*[—-]\s*(\d{1,2}:\d{2})")
        .expect("time range regex must be valid");

    let days: Vec<ElementRef<'_>> = match document.select(&sel_root).next() {
        Some(root) => root.select(&sel_day).collect(),
        None => document.select(&sel_day).collect(),
    };

    let mut events = Vec::new();
    for (index, day) in days.iter().enumerate() {
        let day_label = day_label(*day, index, &sel_heading);

        for entry in day.select(&sel_entry) {
            let style = entry.value().attr("style").unwrap_or_default();
            let (mut start, mut end) = parse_style_times(style);

            if start.is_empty() || end.is_empty() {
                if let Some(el) = entry.select(&sel_time).next() {
                    let text = element_text(el);
                    if !text.is_empty() {
                        start = text;
                    }
                }
                if let Some(el) = entry.select(&sel_dialog).next() {
                    let text = element_text(el);
                    if let Some(caps) = range_re.captures(&text) {
                        start = pad_time(&caps[1]);
                        end = pad_time(&caps[2]);
                    }
                }
            }

            let subject = entry
                .value()
                .attr("name")
                .unwrap_or_default()
                .trim()
                .to_string();
            let info_text = entry
                .select(&sel_info)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let (kind, group, room) = parse_info_text(&info_text);

            events.push(ScheduleEvent {
                day: day_label.clone(),
                start,
                end,
                subject,
                kind,
                group,
                room,
            });
        }
    }

    debug!(days = days.len(), events = events.len(), "page scanned");
    events
}

/// Convert a grid token like `g0800` or `g0945` to `08:00` / `09:45`.
/// Anything else yields an empty string.
pub fn grid_time_to_str(token: &str) -> String {
    let re = Regex::new(r"^g(\d{4})").expect("grid token regex must be valid");
    match re.captures(token.trim()) {
        Some(caps) => {
            let digits = &caps[1];
            format!("{}:{}", &digits[..2], &digits[2..])
        }
        None => String::new(),
    }
}

/// Extract start and end times from a timetable-entry style attribute, where
/// the grid row boundaries double as a time-of-day encoding.
pub fn parse_style_times(style: &str) -> (String, String) {
    let start_re =
        Regex::new(r"grid-row-start:\s*(g\d{4})").expect("row start regex must be valid");
    let end_re = Regex::new(r"grid-row-end:\s*(g\d{4})").expect("row end regex must be valid");

    let start = start_re
        .captures(style)
        .map(|caps| grid_time_to_str(&caps[1]))
        .unwrap_or_default();
    let end = end_re
        .captures(style)
        .map(|caps| grid_time_to_str(&caps[1]))
        .unwrap_or_default();
    (start, end)
}

/// Decompose info text like `"CWL, gr. 1 (012, bud. B9)"` into
/// (session type, group number, room descriptor).
///
/// Without a `gr.` marker the type is everything before the first comma;
/// missing pieces come back as empty strings.
pub fn parse_info_text(info: &str) -> (String, String, String) {
    if info.trim().is_empty() {
        return (String::new(), String::new(), String::new());
    }

    let text = info.replace('\u{a0}', " ").trim().to_string();

    let group_re = Regex::new(r"(?i)\bgr\.\s*(\d+)").expect("group marker regex must be valid");
    let room_re = Regex::new(r"\(\s*([^)]+)\)").expect("room regex must be valid");

    let (kind, group) = match group_re.captures(&text) {
        Some(caps) => {
            let marker = caps.get(0).expect("whole match always present");
            let kind = text[..marker.start()]
                .trim()
                .trim_end_matches(',')
                .trim()
                .to_string();
            (kind, caps[1].to_string())
        }
        None => {
            let kind = text
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            (kind, String::new())
        }
    };

    let room = room_re
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    (kind, group, room)
}

fn day_label(day: ElementRef<'_>, index: usize, heading: &Selector) -> String {
    let mut label = WEEKDAY_LABELS
        .get(index)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("Day {}", index + 1));

    // The portal puts the day heading next to the container, not inside it.
    if let Some(parent) = day.parent().and_then(ElementRef::wrap)
        && let Some(h4) = parent.select(heading).next()
    {
        let text = element_text(h4);
        if !text.is_empty() {
            label = text;
        }
    }

    label
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn pad_time(time: &str) -> String {
    if time.len() == 4 {
        format!("0{time}")
    } else {
        time.to_string()
    }
}
