use uploader_core::{SubmissionState, WidgetViewModel};

use super::constants::*;

const HELP: &[&str] = &[
    "Commands:",
    "  pick <path>        choose a file through the picker (spaces allowed)",
    "  drop <path>...     drag files onto the drop zone (first one is used;",
    "                     paths are split on spaces)",
    "  enter | leave      drag over / away from the drop zone",
    "  predict            send the selected image",
    "  clear              remove the selected image",
    "  help               show this text",
    "  quit               exit",
];

pub fn help() -> Vec<String> {
    HELP.iter().map(|line| line.to_string()).collect()
}

pub fn render(view: &WidgetViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    let zone_marker = if view.dragging { "[drop here]" } else { "" };
    lines.push(format!("== {TITLE} == {zone_marker}").trim_end().to_string());

    match &view.file {
        None => {
            lines.push(format!("  {EMPTY_PROMPT}"));
            lines.push(format!("  {EMPTY_HINT}"));
        }
        Some(file) => {
            if let Some(locator) = &view.preview_locator {
                lines.push(format!("  Preview: {locator}"));
            }
            lines.push(format!("  {}", file.name));
            lines.push(format!("  {}", file.details));
            let predict = if view.predict_enabled {
                format!("[{}]", view.predict_caption)
            } else {
                format!("[{}] (disabled)", view.predict_caption)
            };
            lines.push(format!("  [{CLEAR_LABEL}] {predict}"));
            lines.push(format!("  {CLEAR_TIP}"));
        }
    }

    match &view.submission {
        SubmissionState::Failed(message) => lines.push(format!("{ERROR_HEADING}: {message}")),
        SubmissionState::Succeeded(label) => lines.push(format!("{RESULT_HEADING}: {label}")),
        SubmissionState::Idle | SubmissionState::Submitting => {}
    }

    lines
}
