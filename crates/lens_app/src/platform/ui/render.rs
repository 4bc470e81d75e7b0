use lens_core::{AppViewModel, FindingView, ResultsView, Severity, ToggleGlyph};

const BANNER: &str = "== Allegation Lens ==";
const DROP_PROMPT: &str = "Drag a PDF or DOCX file here, or type `open <path>`.";
const PICK_PROMPT: &str = "Type `open <path>` to choose a PDF or DOCX file.";

/// Lines for one full redraw of the view model.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![BANNER.to_string()];

    let zone = &view.drop_zone;
    match &zone.label {
        Some(name) => lines.push(format!("File: {name}")),
        None if zone.prompt_visible => lines.push(
            if zone.available {
                DROP_PROMPT
            } else {
                PICK_PROMPT
            }
            .to_string(),
        ),
        None => {}
    }
    if zone.active {
        lines.push("(release to drop)".to_string());
    }

    if view.loading_visible {
        lines.push("Analyzing... please wait.".to_string());
    } else if view.submit_enabled {
        lines.push("Type `submit` to analyze.".to_string());
    }

    if let Some(notification) = &view.notification {
        lines.push(format!(
            "[{}] {}",
            severity_tag(notification.severity),
            notification.text
        ));
    }

    if let Some(results) = &view.results {
        render_results(results, &mut lines);
    }

    lines
}

fn severity_tag(severity: Severity) -> String {
    severity.as_str().to_ascii_uppercase()
}

fn glyph(glyph: ToggleGlyph) -> char {
    match glyph {
        ToggleGlyph::ChevronDown => '▼',
        ToggleGlyph::ChevronUp => '▲',
    }
}

fn render_results(results: &ResultsView, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(results.heading.clone());
    if let Some(report) = &results.report {
        lines.push(format!(
            "Report: {} (type `download` to save)",
            report.save_as
        ));
    }
    for (index, group) in results.groups.iter().enumerate() {
        lines.push(format!(
            "{}. {} {} ({})",
            index + 1,
            glyph(group.glyph),
            group.key,
            group.findings.len()
        ));
        if group.expanded {
            for finding in &group.findings {
                render_finding(finding, lines);
            }
        }
    }
}

fn render_finding(finding: &FindingView, lines: &mut Vec<String>) {
    for (label, value) in finding.labeled() {
        lines.push(format!("     {label}: {value}"));
    }
    lines.push(String::new());
}
