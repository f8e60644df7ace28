use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use url::Url;

/// The plan catalog endpoint of the AGH USOS portal.
const DEFAULT_BASE_URL: &str =
    "https://web.usos.agh.edu.pl/kontroler.php?_action=katalog2/przedmioty/pokazPlanGrupyPrzedmiotow";

/// URL table: program -> list of plans, each resolving to one source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlTable {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_academic_year")]
    pub academic_year: String,
    #[serde(default)]
    pub programs: BTreeMap<String, ProgramConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    /// grupa_kod prefix shared by all generated plans of the program,
    /// e.g. "230-TEI".
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub plans: Vec<PlanConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Year label shown to users and used for the output filename,
    /// e.g. "I Stopień, 6 Sem".
    pub label: String,
    /// Explicit source URL; overrides the generated one.
    #[serde(default)]
    pub url: Option<String>,
    /// grupa_kod part appended to the program prefix, e.g. "1S_sem6".
    #[serde(default)]
    pub group: Option<String>,
    /// Term marker, "Z" (winter) or "L" (summer).
    #[serde(default = "default_term")]
    pub term: String,
}

/// One resolved (program, year label, URL) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub program: String,
    pub label: String,
    pub url: String,
}

impl UrlTable {
    pub fn validate(&self) -> Result<()> {
        for (program, config) in &self.programs {
            if program.trim().is_empty() {
                bail!("program name must not be empty");
            }
            for plan in &config.plans {
                if plan.label.trim().is_empty() {
                    bail!("plan label must not be empty in program {program}");
                }
                if plan.url.is_none() {
                    if config.prefix.is_none() {
                        bail!(
                            "plan {program} / {} has no url and the program has no prefix",
                            plan.label
                        );
                    }
                    if plan.group.is_none() {
                        bail!("plan {program} / {} has no url and no group part", plan.label);
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve every plan to a concrete URL, sorted by lowercased
    /// (program, label) for a stable processing order.
    pub fn entries(&self) -> Result<Vec<PlanEntry>> {
        let mut entries = Vec::new();

        for (program, config) in &self.programs {
            for plan in &config.plans {
                let url = match &plan.url {
                    Some(url) => url.clone(),
                    None => {
                        let prefix = config.prefix.as_deref().unwrap_or_default();
                        let group = plan.group.as_deref().unwrap_or_default();
                        plan_url(
                            &self.base_url,
                            prefix,
                            group,
                            &plan.term,
                            &self.academic_year,
                        )?
                    }
                };

                entries.push(PlanEntry {
                    program: program.clone(),
                    label: plan.label.clone(),
                    url,
                });
            }
        }

        entries.sort_by_key(|entry| (entry.program.to_lowercase(), entry.label.to_lowercase()));
        Ok(entries)
    }
}

pub fn load_url_table(path: &Path) -> Result<UrlTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read url table {}", path.display()))?;
    let table: UrlTable = toml::from_str(&text)
        .with_context(|| format!("failed to parse toml in {}", path.display()))?;
    table
        .validate()
        .with_context(|| format!("invalid url table {}", path.display()))?;
    Ok(table)
}

/// Build a plan URL from the grupa_kod prefix/part and term convention, e.g.
/// prefix "230-TEI", group "1S_sem6", term "L", year "25/26" appends
/// `grupa_kod=230-TEI_1S_sem6` and `cdyd_kod=25%2F26-L`.
pub fn plan_url(
    base_url: &str,
    prefix: &str,
    group: &str,
    term: &str,
    academic_year: &str,
) -> Result<String> {
    let mut url = Url::parse(base_url).with_context(|| format!("invalid base_url {base_url}"))?;

    url.query_pairs_mut()
        .append_pair("grupa_kod", &format!("{prefix}_{group}"))
        .append_pair("cdyd_kod", &format!("{academic_year}-{term}"));

    Ok(url.to_string())
}

/// Filesystem-safe filename segment from a free-text label: lowercased, runs
/// of anything outside word characters and hyphens collapse to one
/// underscore.
pub fn slug(value: &str) -> String {
    let re = Regex::new(r"[^\w-]+").expect("slug regex must be valid");
    let lowered = value.trim().to_lowercase();
    let replaced = re.replace_all(&lowered, "_");
    let trimmed = replaced.trim_matches('_');

    if trimmed.is_empty() {
        "page".to_string()
    } else {
        trimmed.to_string()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_academic_year() -> String {
    "25/26".to_string()
}

fn default_term() -> String {
    "Z".to_string()
}
