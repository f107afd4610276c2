use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use uploader_core::{FileCandidate, Msg, WidgetViewModel};
use uploader_logging::{uploader_debug, uploader_warn};

use super::effects::HostSurface;
use super::ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Pick(PathBuf),
    Drop(Vec<PathBuf>),
    DragEnter,
    DragLeave,
    Predict,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs at least one path")]
    MissingPath(&'static str),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// `drop` splits its paths on whitespace; `pick` takes the rest of the line.
pub fn parse_command(line: &str) -> Result<Option<HostCommand>, CommandError> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    if verb.is_empty() {
        return Ok(None);
    }
    let rest = rest.trim();
    let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        // The rest of the line is one path, so it may contain spaces.
        "pick" if rest.is_empty() => return Err(CommandError::MissingPath("pick")),
        "pick" => HostCommand::Pick(PathBuf::from(rest)),
        "drop" if paths.is_empty() => return Err(CommandError::MissingPath("drop")),
        "drop" => HostCommand::Drop(paths),
        "enter" => HostCommand::DragEnter,
        "leave" => HostCommand::DragLeave,
        "predict" => HostCommand::Predict,
        "clear" => HostCommand::Clear,
        "help" | "?" => HostCommand::Help,
        "quit" | "exit" => HostCommand::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

/// Reads a file from disk; the declared media type is guessed from the extension.
pub fn load_candidate(path: &Path) -> io::Result<FileCandidate> {
    let payload = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = mime_guess::from_path(path).first_raw().unwrap_or_default();
    Ok(FileCandidate::new(name, media_type, payload))
}

/// Terminal stand-in for the page: prints the widget and emulates the picker.
pub struct TerminalHost<W: Write> {
    out: W,
    /// Path the emulated picker currently holds, like a file input's value.
    picker_value: Option<PathBuf>,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            picker_value: None,
        }
    }

    /// Maps a command to widget messages.
    pub fn translate(&mut self, command: HostCommand) -> Vec<Msg> {
        match command {
            HostCommand::Pick(path) => {
                let mut msgs = vec![Msg::DropZoneClicked];
                if self.picker_value.as_ref() == Some(&path) {
                    // A file input reports no change when the same file is picked again.
                    uploader_debug!("Picker already holds {:?}; no change event", path);
                    return msgs;
                }
                match load_candidate(&path) {
                    Ok(candidate) => {
                        self.picker_value = Some(path);
                        msgs.push(Msg::FileChosen(Some(candidate)));
                    }
                    Err(err) => self.report_unreadable(&path, &err),
                }
                msgs
            }
            HostCommand::Drop(paths) => {
                // Only the first dropped entry is read; the rest are ignored.
                if paths.len() > 1 {
                    uploader_debug!("Ignoring {} extra dropped paths", paths.len() - 1);
                }
                let files = match paths.first() {
                    Some(path) => match load_candidate(path) {
                        Ok(candidate) => vec![candidate],
                        Err(err) => {
                            self.report_unreadable(path, &err);
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                };
                vec![Msg::DragEnter, Msg::Dropped(files)]
            }
            HostCommand::DragEnter => vec![Msg::DragEnter],
            HostCommand::DragLeave => vec![Msg::DragLeave],
            HostCommand::Predict => vec![Msg::SubmitClicked],
            HostCommand::Clear => vec![Msg::ClearClicked],
            HostCommand::Help => {
                let _ = self.write_lines(&ui::render::help());
                Vec::new()
            }
            HostCommand::Quit => Vec::new(),
        }
    }

    pub fn render(&mut self, view: &WidgetViewModel) -> io::Result<()> {
        self.write_lines(&ui::render::render(view))?;
        write!(self.out, "{}", ui::constants::PROMPT)?;
        self.out.flush()
    }

    pub fn report(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    pub fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    fn report_unreadable(&mut self, path: &Path, err: &io::Error) {
        uploader_warn!("Cannot read {:?}: {}", path, err);
        self.report(&format!("cannot read {}: {err}", path.display()));
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> HostSurface for TerminalHost<W> {
    fn open_file_picker(&mut self, accept: &str) {
        uploader_debug!("File picker opened (accept {})", accept);
    }

    fn reset_picker(&mut self) {
        self.picker_value = None;
    }

    fn alert(&mut self, message: &str) {
        self.report(&format!("! {message}"));
    }
}
