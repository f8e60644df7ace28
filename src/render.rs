use crate::meta::build_subject_meta;
use crate::model::{ScheduleEvent, SubjectMeta};
use regex::{NoExpand, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Literal token in the template replaced by the HTML-escaped page title.
pub const TITLE_PLACEHOLDER: &str = "__PLAN_TITLE__";

/// Substitute the generated data blocks into the static template.
///
/// The first `const rawData = [ ... ];` block is replaced by one record line
/// per event, in input order. With `inject_meta` the first
/// `const metaData = { ... };` block gets the subject table, sorted by
/// subject. A missing block marker substitutes nothing; the template comes
/// back otherwise unchanged.
pub fn render_schedule(
    template: &str,
    events: &[ScheduleEvent],
    title: &str,
    inject_meta: bool,
) -> String {
    let mut rendered = template.replace(TITLE_PLACEHOLDER, &escape_html(title));

    let raw_re = Regex::new(r"const rawData = \[\s*[\s\S]*?\n\s*\];")
        .expect("rawData block regex must be valid");
    if raw_re.is_match(&rendered) {
        let block = format!("const rawData = [\n{}\n        ];", events_js(events));
        rendered = raw_re.replace(&rendered, NoExpand(&block)).into_owned();
    } else {
        warn!("template has no rawData block; event data not injected");
    }

    if inject_meta {
        let meta = build_subject_meta(events);
        let meta_re = Regex::new(r"const metaData = \{\s*[\s\S]*?\n\s*\};")
            .expect("metaData block regex must be valid");
        if meta_re.is_match(&rendered) {
            let block = format!("const metaData = {{\n{}\n        }};", meta_js(&meta));
            rendered = meta_re.replace(&rendered, NoExpand(&block)).into_owned();
        } else {
            warn!("template has no metaData block; subject table not injected");
        }
    }

    rendered
}

fn events_js(events: &[ScheduleEvent]) -> String {
    if events.is_empty() {
        return "            // no events".to_string();
    }

    events
        .iter()
        .map(|event| {
            format!(
                r#"            {{ day: "{}", start: "{}", end: "{}", subject: "{}", type: "{}", group: "{}", room: "{}" }},"#,
                event.day,
                event.start,
                event.end,
                escape_quotes(&event.subject),
                event.kind,
                event.group,
                escape_quotes(&event.room),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn meta_js(meta: &BTreeMap<String, SubjectMeta>) -> String {
    if meta.is_empty() {
        return "            // no meta".to_string();
    }

    meta.iter()
        .map(|(subject, data)| {
            let key = escape_quotes(&subject.replace('\\', "\\\\"));
            format!(
                "            \"{}\": {{ ects: {}, status: {}, verify: {}, short: {}, color: {} }},",
                key,
                js_str(&data.ects),
                js_str(&data.status),
                js_str(&data.verify),
                js_str(&data.short),
                js_str(&data.color),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON string literal, which also covers backslashes and control characters.
fn js_str(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
