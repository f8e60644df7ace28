use crate::config::{PlanEntry, load_url_table, slug};
use crate::extract::extract_events;
use crate::fetch::fetch_plan_page;
use crate::model::BatchReport;
use crate::render::render_schedule;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_TITLE: &str = "Plan Zajęć";

const EMPTY_TABLE_PAGE: &str = "<!DOCTYPE html><html><body><p>Add timetable URLs to \
<code>urls.toml</code> and re-run.</p></body></html>\n";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub export_json: bool,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub urls_path: PathBuf,
    pub template: PathBuf,
    pub out_dir: PathBuf,
}

/// Scrape one locally saved plan page and render it through the template.
/// Returns the number of extracted events.
pub fn build_page(options: &BuildOptions) -> Result<usize> {
    if !options.input.is_file() {
        bail!("input file not found: {}", options.input.display());
    }
    let template = read_template(&options.template)?;

    let page = std::fs::read_to_string(&options.input)
        .with_context(|| format!("failed to read input page {}", options.input.display()))?;
    let events = extract_events(&page);
    info!(
        input = %options.input.display(),
        events = events.len(),
        "plan page scraped"
    );

    if options.export_json {
        let json_path = options.output.with_extension("json");
        let serialized = serde_json::to_string_pretty(&events)?;
        std::fs::write(&json_path, serialized)
            .with_context(|| format!("failed to write event export {}", json_path.display()))?;
        info!(file = %json_path.display(), "event export written");
    }

    let rendered = render_schedule(&template, &events, &options.title, true);
    write_output(&options.output, &rendered)?;
    info!(file = %options.output.display(), "schedule written");

    Ok(events.len())
}

/// Fetch every URL-table entry in sorted order and write one schedule file
/// per entry. Individual failures are reported and skipped; the batch never
/// aborts because of one bad entry.
pub fn run_batch(options: &BatchOptions) -> Result<BatchReport> {
    let table = load_url_table(&options.urls_path)?;
    let template = read_template(&options.template)?;
    let entries = table.entries()?;

    std::fs::create_dir_all(&options.out_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.out_dir.display()
        )
    })?;

    if entries.is_empty() {
        let index = options.out_dir.join("index.html");
        std::fs::write(&index, EMPTY_TABLE_PAGE)
            .with_context(|| format!("failed to write placeholder {}", index.display()))?;
        warn!(
            urls = %options.urls_path.display(),
            "url table is empty; placeholder landing page written"
        );
        return Ok(BatchReport { built: 0, total: 0 });
    }

    let total = entries.len();
    let mut built = 0usize;

    for entry in &entries {
        let file_name = output_filename(entry);
        let path = options.out_dir.join(&file_name);
        info!(
            program = %entry.program,
            year = %entry.label,
            file = %file_name,
            "building timetable"
        );

        match build_entry(entry, &template, &path) {
            Ok(events) => {
                built += 1;
                info!(file = %path.display(), events, "timetable written");
            }
            Err(err) => {
                warn!(
                    program = %entry.program,
                    year = %entry.label,
                    error = %err,
                    "entry failed; continuing with the rest"
                );
            }
        }
    }

    info!(built, total, dir = %options.out_dir.display(), "batch complete");
    Ok(BatchReport { built, total })
}

fn build_entry(entry: &PlanEntry, template: &str, path: &Path) -> Result<usize> {
    let page = fetch_plan_page(&entry.url)?;
    let events = extract_events(&page);
    let rendered = render_schedule(template, &events, DEFAULT_TITLE, true);
    write_output(path, &rendered)?;
    Ok(events.len())
}

fn output_filename(entry: &PlanEntry) -> String {
    format!("{}_{}.html", slug(&entry.program), slug(&entry.label))
}

fn read_template(path: &Path) -> Result<String> {
    if !path.is_file() {
        bail!("template file not found: {}", path.display());
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write output file {}", path.display()))
}
