use std::fs;
use std::path::Path;
use usosplan::extract::{extract_events, grid_time_to_str, parse_info_text, parse_style_times};

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture must be readable")
}

#[test]
fn grid_tokens_convert_to_clock_times() {
    assert_eq!(grid_time_to_str("g0945"), "09:45");
    assert_eq!(grid_time_to_str("g0800"), "08:00");
    assert_eq!(grid_time_to_str(" g1115 "), "11:15");
    assert_eq!(grid_time_to_str("1115"), "");
    assert_eq!(grid_time_to_str("g95"), "");
    assert_eq!(grid_time_to_str(""), "");
}

#[test]
fn style_times_come_from_grid_row_boundaries() {
    let style = "grid-column: d1; grid-row-start: g0800; grid-row-end: g0930;";
    assert_eq!(
        parse_style_times(style),
        ("08:00".to_string(), "09:30".to_string())
    );

    let no_end = "grid-row-start: g0800;";
    assert_eq!(parse_style_times(no_end), ("08:00".to_string(), String::new()));
    assert_eq!(parse_style_times(""), (String::new(), String::new()));
}

#[test]
fn info_text_splits_into_type_group_room() {
    let (kind, group, room) = parse_info_text("CWL, gr. 1 (012, bud. B9)");
    assert_eq!(kind, "CWL");
    assert_eq!(group, "1");
    assert_eq!(room, "012, bud. B9");

    let (kind, group, room) = parse_info_text("W, gr. 1 (on-line, bud. A0)");
    assert_eq!(kind, "W");
    assert_eq!(group, "1");
    assert_eq!(room, "on-line, bud. A0");
}

#[test]
fn info_text_without_group_marker_or_comma_is_all_type() {
    let (kind, group, room) = parse_info_text("Wykład");
    assert_eq!(kind, "Wykład");
    assert_eq!(group, "");
    assert_eq!(room, "");
}

#[test]
fn info_text_with_comma_but_no_group_marker_takes_first_part() {
    let (kind, group, room) = parse_info_text("W, (aula A1)");
    assert_eq!(kind, "W");
    assert_eq!(group, "");
    assert_eq!(room, "aula A1");
}

#[test]
fn info_text_normalizes_non_breaking_spaces() {
    let (kind, group, room) = parse_info_text("CWL, gr.\u{a0}2 (101, bud. C3)");
    assert_eq!(kind, "CWL");
    assert_eq!(group, "2");
    assert_eq!(room, "101, bud. C3");
}

#[test]
fn empty_info_text_yields_empty_fields() {
    assert_eq!(
        parse_info_text("   "),
        (String::new(), String::new(), String::new())
    );
}

#[test]
fn fixture_page_yields_two_complete_events() {
    let events = extract_events(&fixture("timetable.html"));

    assert_eq!(events.len(), 2);

    assert_eq!(events[0].day, "Poniedziałek");
    assert_eq!(events[0].start, "08:00");
    assert_eq!(events[0].end, "09:30");
    assert_eq!(events[0].subject, "Algorithms");
    assert_eq!(events[0].kind, "CWL");
    assert_eq!(events[0].group, "2");
    assert_eq!(events[0].room, "101, bud. C3");

    assert_eq!(events[1].day, "Środa");
    assert_eq!(events[1].start, "09:45");
    assert_eq!(events[1].end, "11:15");
}

#[test]
fn heading_overrides_default_day_label() {
    // Without the h4 the second container would be labeled "Wtorek".
    let events = extract_events(&fixture("timetable.html"));
    assert_eq!(events[1].day, "Środa");
}

#[test]
fn dialog_text_supplies_times_when_style_has_none() {
    let page = r#"
        <usos-timetable>
            <timetable-day>
                <timetable-entry name="Computer Networks">
                    <span slot="time">9:45</span>
                    <span slot="dialog-event">Poniedziałek 9:45 - 11:15</span>
                    <div slot="info">W, gr. 1 (on-line, bud. A0)</div>
                </timetable-entry>
            </timetable-day>
        </usos-timetable>
    "#;

    let events = extract_events(page);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start, "09:45");
    assert_eq!(events[0].end, "11:15");
    assert_eq!(events[0].room, "on-line, bud. A0");
}

#[test]
fn unparsed_times_keep_the_event_with_empty_strings() {
    let page = r#"
        <usos-timetable>
            <timetable-day>
                <timetable-entry name="Seminar">
                    <div slot="info">SEM</div>
                </timetable-entry>
            </timetable-day>
        </usos-timetable>
    "#;

    let events = extract_events(page);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start, "");
    assert_eq!(events[0].end, "");
    assert_eq!(events[0].subject, "Seminar");
    assert_eq!(events[0].kind, "SEM");
}

#[test]
fn days_without_root_element_still_scan() {
    let page = r#"
        <div>
            <timetable-day>
                <timetable-entry name="A" style="grid-row-start: g1000; grid-row-end: g1130;"></timetable-entry>
            </timetable-day>
        </div>
    "#;

    let events = extract_events(page);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].day, "Poniedziałek");
    assert_eq!(events[0].kind, "");
}

#[test]
fn day_labels_fall_back_past_the_weekday_list() {
    let day = r#"<timetable-day>
        <timetable-entry name="X" style="grid-row-start: g0800; grid-row-end: g0930;"></timetable-entry>
    </timetable-day>"#;
    let page = format!("<usos-timetable>{}</usos-timetable>", day.repeat(6));

    let events = extract_events(&page);
    assert_eq!(events.len(), 6);
    assert_eq!(events[4].day, "Piątek");
    assert_eq!(events[5].day, "Day 6");
}
