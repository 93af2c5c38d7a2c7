//! Prompt construction for pack generation.

use listlaunch_db::models::{Directory, PlanEntry, Site};

use crate::generator::GenerationRequest;

pub const SYSTEM_PROMPT: &str = "You craft concise directory submission copy. Return JSON only.";

const REQUESTED_FIELDS: &str = "title, tagline, shortDescription, longDescription, categories, \
                                tags, utmUrl, cta, extraFields (key/value)";

/// `utm_source` value for a directory: its name lowercased with each
/// whitespace run replaced by a single `-`.
pub fn utm_source(directory_name: &str) -> String {
    directory_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the generation request for one plan entry. The goal is the
/// entry's snapshot, not the site's current goal.
pub fn build_request(site: &Site, entry: &PlanEntry, directory: &Directory) -> GenerationRequest {
    let prompt = format!(
        "Site: {domain}\n\
         Goal: {goal}\n\
         Directory: {name} ({url})\n\
         Niche tags: {niches}\n\
         Requested fields: {REQUESTED_FIELDS}.\n\
         Use a UTM URL if possible (utm_source={source}).",
        domain = site.domain,
        goal = entry.goal,
        name = directory.name,
        url = directory.url,
        niches = directory.niches.join(", "),
        source = utm_source(&directory.name),
    );

    GenerationRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt,
    }
}
