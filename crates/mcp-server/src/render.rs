//! Markdown shaping of successful results.
//!
//! Tool results are AI-consumable documents: headed markdown with the
//! identifiers the assistant needs for follow-up calls. Content-free
//! reads (completion flags, counts) render compactly; only
//! `get_artifact` ever emits a document body.

use sdlc_store::{
    ArtifactCompletion, ArtifactType, ProjectFile, ProjectMeta, ProjectOverview, Screen,
};

pub fn project_list(projects: &[ProjectOverview]) -> String {
    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut lines = vec![format!("# SDLC Assist Projects ({} total)", projects.len()), String::new()];
    for project in projects {
        lines.push(format!("## {}", project.name));
        lines.push(format!("- **ID:** `{}`", project.id));
        lines.push(format!("- **Status:** {}", project.status));
        lines.push(format!(
            "- **Artifacts:** {}/{} complete",
            project.completion.completed_count(),
            project.completion.total()
        ));
        let done: Vec<&str> = ArtifactType::ALL
            .iter()
            .filter(|t| project.completion.has(**t))
            .map(|t| t.as_str())
            .collect();
        if !done.is_empty() {
            lines.push(format!("- **Generated:** {}", done.join(", ")));
        }
        if let Some(created) = &project.created_at {
            lines.push(format!("- **Created:** {created}"));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn project_summary(
    meta: &ProjectMeta,
    completion: &ArtifactCompletion,
    screen_count: usize,
    files: &[ProjectFile],
) -> String {
    let mut lines = vec![format!("# Project: {}", meta.name), String::new()];
    lines.push(format!("- **ID:** `{}`", meta.id));
    lines.push(format!("- **Status:** {}", meta.status));
    if let Some(created) = &meta.created_at {
        lines.push(format!("- **Created:** {created}"));
    }
    if let Some(updated) = &meta.updated_at {
        lines.push(format!("- **Updated:** {updated}"));
    }
    lines.push(String::new());

    if let Some(prefs) = &meta.tech_preferences {
        lines.push("## Tech Stack Preferences".to_string());
        for (key, value) in prefs {
            lines.push(format!("- **{}:** {}", title_case(key), plain_value(value)));
        }
        lines.push(String::new());
    }

    lines.push("## Artifact Status".to_string());
    lines.push(String::new());
    lines.push("| Artifact | Status | Generated At |".to_string());
    lines.push("|----------|--------|--------------|".to_string());
    for artifact in ArtifactType::ALL {
        let status = if completion.has(artifact) {
            "complete"
        } else {
            "missing"
        };
        let generated = meta.generated_at(artifact).unwrap_or("-");
        lines.push(format!("| {} | {status} | {generated} |", artifact.label()));
    }

    lines.push(String::new());
    lines.push(format!("## UI Screens: {screen_count} defined"));
    lines.push(format!("## Uploaded Files: {}", files.len()));
    for file in files {
        lines.push(format!(
            "- {}",
            file.original_filename.as_deref().unwrap_or("unnamed")
        ));
    }

    lines.join("\n")
}

pub fn artifact(artifact: ArtifactType, project_name: &str, content: &str) -> String {
    let title = format!("# {} - {}", artifact.label(), project_name);

    // JSON-typed artifacts read better pretty-printed; anything that
    // fails to parse is passed through untouched.
    if artifact.is_json_document() {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(content) {
            let pretty = serde_json::to_string_pretty(&parsed).unwrap_or_default();
            return format!("{title}\n\n```json\n{pretty}\n```");
        }
    }

    format!("{title}\n\n{content}")
}

pub fn screens(project_name: &str, screens: &[Screen], include_html: bool) -> String {
    if screens.is_empty() {
        return format!(
            "No screens defined for project **{project_name}**. \
             Screens are generated during the UX Design phase."
        );
    }

    // Group by epic, keeping first-seen epic order and stable screen
    // order within each group.
    let mut epics: Vec<(String, Vec<&Screen>)> = Vec::new();
    for screen in screens {
        let epic = screen
            .epic_name
            .clone()
            .unwrap_or_else(|| "Ungrouped".to_string());
        match epics.iter_mut().find(|(name, _)| *name == epic) {
            Some((_, group)) => group.push(screen),
            None => epics.push((epic, vec![screen])),
        }
    }

    let mut lines = vec![
        format!("# UI Screens - {project_name} ({} screens)", screens.len()),
        String::new(),
    ];

    for (epic, group) in epics {
        lines.push(format!("## {epic}"));
        lines.push(String::new());
        for screen in group {
            lines.push(format!(
                "### {} ({} / {} complexity)",
                screen.name,
                screen.screen_type.as_deref().unwrap_or("-"),
                screen.complexity.as_deref().unwrap_or("-"),
            ));
            lines.push(format!(
                "- **Description:** {}",
                screen.description.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "- **User Role:** {}",
                screen.user_role.as_deref().unwrap_or("-")
            ));
            if let Some(notes) = &screen.notes {
                lines.push(format!("- **Design Notes:** {notes}"));
            }
            if screen.prototype_generated_at.is_some() {
                lines.push("- **Prototype:** generated".to_string());
            }
            if include_html {
                if let Some(html) = &screen.prototype_content {
                    lines.push(String::new());
                    lines.push("<details><summary>HTML Prototype</summary>".to_string());
                    lines.push(String::new());
                    lines.push(format!("```html\n{html}\n```"));
                    lines.push("</details>".to_string());
                }
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

pub fn tech_preferences(meta: &ProjectMeta) -> String {
    let Some(prefs) = &meta.tech_preferences else {
        return format!(
            "Tech preferences have not been set for project **{}**. \
             The user needs to select their tech stack in the SDLC Assist application.",
            meta.name
        );
    };

    let mut lines = vec![format!("# Tech Stack - {}", meta.name), String::new()];
    if let Some(saved_at) = &meta.tech_preferences_saved_at {
        lines.push(format!("*Saved at: {saved_at}*"));
        lines.push(String::new());
    }
    for (key, value) in prefs {
        lines.push(format!("- **{}:** {}", title_case(key), plain_value(value)));
    }
    lines.join("\n")
}

fn plain_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn title_case(key: &str) -> String {
    key.split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
