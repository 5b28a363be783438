//! Reusable page fragments.
//!
//! Each helper returns a finished Markdown fragment, or an empty string when
//! the fragment does not apply to the transform.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pipedoc_meta::{Guide, Transform};

use crate::settings::PageSettings;
use crate::util::{escape_link_text, to_sentence};

/// Unreserved URL characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// Issue label shared by all issues about a transform.
fn component_label(transform: &Transform) -> String {
    format!("transform: {}", transform.name)
}

/// Issue search URL for open issues matching `labels`.
fn issues_url(settings: &PageSettings, labels: &[&str]) -> String {
    let mut query = "is:open is:issue".to_owned();
    for label in labels {
        let _ = write!(query, " label:\"{label}\"");
    }
    format!("{}/issues?q={}", settings.repository(), encode(&query))
}

/// New-issue URL with `labels` preselected.
fn new_issue_url(settings: &PageSettings, labels: &[&str]) -> String {
    format!(
        "{}/issues/new?labels={}",
        settings.repository(),
        encode(&labels.join(","))
    )
}

/// Auto-generated file banner.
#[must_use]
pub fn warning(settings: &PageSettings) -> String {
    format!(
        "<!--\n\
         !!!WARNING!!!!\n\
         \n\
         This file is autogenerated! Please do not manually edit this file.\n\
         Instead, please modify the contents of `{}`.\n\
         -->",
        settings.metadata_path
    )
}

/// Beta notice for experimental transforms.
#[must_use]
pub fn beta(transform: &Transform, settings: &PageSettings) -> String {
    if !transform.beta {
        return String::new();
    }
    let label = component_label(transform);
    format!(
        "{{% hint style=\"warning\" %}}\n\
         The `{name}` transform is in beta. Please see the current \
         [enhancements]({enhancements}) and [bugs]({bugs}) for known issues. \
         We kindly ask that you [add any missing issues]({new_issue}) \
         as it will help shape the roadmap of this component.\n\
         {{% endhint %}}",
        name = transform.name,
        enhancements = issues_url(settings, &[&label, "Type: Enhancement"]),
        bugs = issues_url(settings, &[&label, "Type: Bug"]),
        new_issue = new_issue_url(settings, &[&label]),
    )
}

/// Link to the data model page of one event type.
#[must_use]
pub fn event_type_link(event_type: &str, settings: &PageSettings) -> String {
    format!(
        "[`{event_type}`]({})",
        settings.doc_link(&format!("about/data-model/{event_type}.md"))
    )
}

/// Event type links joined as an English list.
#[must_use]
pub fn event_type_links(event_types: &[String], settings: &PageSettings) -> String {
    let links: Vec<String> = event_types
        .iter()
        .map(|t| event_type_link(t, settings))
        .collect();
    to_sentence(&links)
}

/// "Guides" section listing the guides that cover the transform.
#[must_use]
pub fn guides_section(guides: &[Guide], settings: &PageSettings) -> String {
    if guides.is_empty() {
        return String::new();
    }
    let mut out = "## Guides\n\n".to_owned();
    for guide in guides {
        let _ = writeln!(
            out,
            "* [{}]({})",
            escape_link_text(&guide.title),
            settings.doc_link(&guide.path)
        );
    }
    out
}

/// "Troubleshooting" section, emitted when the transform provides content.
#[must_use]
pub fn troubleshooting(transform: &Transform, settings: &PageSettings) -> String {
    let Some(content) = transform
        .troubleshooting
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    else {
        return String::new();
    };
    let label = component_label(transform);
    format!(
        "## Troubleshooting\n\n\
         {content}\n\n\
         If the above does not resolve your issue, please:\n\n\
         1. Check for any [open `{name}` transform issues]({open}).\n\
         2. If you encountered a bug, please [file a bug report]({bug}).\n\
         3. If you encountered a missing feature, please [file a feature request]({feature}).\n",
        name = transform.name,
        open = issues_url(settings, &[&label]),
        bug = new_issue_url(settings, &[&label, "Type: Bug"]),
        feature = new_issue_url(settings, &[&label, "Type: Enhancement"]),
    )
}

/// "Resources" section, emitted when the transform declares resources.
#[must_use]
pub fn resources(transform: &Transform, settings: &PageSettings) -> String {
    if transform.resources.is_empty() {
        return String::new();
    }
    let label = component_label(transform);
    let mut out = "## Resources\n\n".to_owned();
    for resource in &transform.resources {
        let _ = writeln!(
            out,
            "* [**{}**]({})",
            escape_link_text(&resource.name),
            resource.url
        );
    }
    let _ = writeln!(
        out,
        "* [**Issues**]({}) - [enhancements]({}) - [bugs]({})",
        issues_url(settings, &[&label]),
        issues_url(settings, &[&label, "Type: Enhancement"]),
        issues_url(settings, &[&label, "Type: Bug"]),
    );
    let _ = writeln!(
        out,
        "* [**Source code**]({}/tree/master/src/transforms/{}.rs)",
        settings.repository(),
        transform.name
    );
    out
}
