//! Maps a line typed (or pasted) into the terminal onto core messages.

use std::path::PathBuf;

use lens_core::{Msg, SelectedFile};
use url::Url;

pub const HELP_TEXT: &str = "\
Commands:
  open <path>        choose a document, like the file picker
  clear              clear the current selection
  <dragged path>     dropping a file onto the window pastes its path
  set <name>=<value> add an extra form field to the upload
  submit             upload the selected document for analysis
  toggle <n>         expand or collapse result group n
  download           save the analysis report
  help               show this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Messages(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    if let Some(path) = dropped_path(line) {
        let file = SelectedFile::from_path(path);
        return Command::Messages(vec![Msg::DragEntered, Msg::Dropped(vec![file])]);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "open" if !rest.is_empty() => {
            let path = dropped_path(rest).unwrap_or_else(|| PathBuf::from(rest));
            Command::Messages(vec![Msg::PickerChanged(vec![SelectedFile::from_path(path)])])
        }
        "clear" => Command::Messages(vec![Msg::PickerChanged(Vec::new())]),
        "submit" | "analyze" => Command::Messages(vec![Msg::SubmitClicked]),
        "download" => Command::Messages(vec![Msg::DownloadClicked]),
        "toggle" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Messages(vec![Msg::GroupToggled { index: n - 1 }]),
            _ => Command::Unknown(line.to_string()),
        },
        "set" => match rest.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Command::Messages(vec![Msg::FormFieldChanged {
                    name: name.trim().to_string(),
                    value: value.trim().to_string(),
                }])
            }
            _ => Command::Unknown(line.to_string()),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Terminals paste a dragged file as a quoted path, a `file://` URI, or an
/// absolute path with escaped spaces.
fn dropped_path(text: &str) -> Option<PathBuf> {
    let unquoted = ['\'', '"']
        .iter()
        .find_map(|q| text.strip_prefix(*q).and_then(|t| t.strip_suffix(*q)));
    if let Some(path) = unquoted {
        return (!path.is_empty()).then(|| PathBuf::from(path));
    }
    if text.starts_with("file:") {
        return Url::parse(text).ok()?.to_file_path().ok();
    }
    if text.starts_with('/') {
        return Some(PathBuf::from(text.replace("\\ ", " ")));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lens_core::{Msg, SelectedFile};

    use super::{parse_line, Command};

    fn dropped(path: &str) -> Command {
        Command::Messages(vec![
            Msg::DragEntered,
            Msg::Dropped(vec![SelectedFile::from_path(PathBuf::from(path))]),
        ])
    }

    #[test]
    fn pasted_paths_become_drops() {
        assert_eq!(parse_line("'/tmp/My Complaint.pdf'"), dropped("/tmp/My Complaint.pdf"));
        assert_eq!(parse_line("\"/tmp/a.docx\""), dropped("/tmp/a.docx"));
        assert_eq!(parse_line("/tmp/My\\ Complaint.pdf "), dropped("/tmp/My Complaint.pdf"));
        assert_eq!(parse_line("file:///tmp/My%20Complaint.pdf"), dropped("/tmp/My Complaint.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn file_uri_with_localhost_host_drops_the_host() {
        assert_eq!(
            parse_line("file://localhost/tmp/My%20Complaint.pdf"),
            dropped("/tmp/My Complaint.pdf")
        );
        assert!(matches!(
            parse_line("file://fileserver/share/a.pdf"),
            Command::Unknown(_)
        ));
    }

    #[test]
    fn open_goes_through_the_picker() {
        assert_eq!(
            parse_line("open complaint.pdf"),
            Command::Messages(vec![Msg::PickerChanged(vec![SelectedFile::from_path(
                PathBuf::from("complaint.pdf")
            )])])
        );
        assert_eq!(parse_line("open"), Command::Unknown("open".to_string()));
    }

    #[test]
    fn toggle_is_one_based() {
        assert_eq!(
            parse_line("toggle 2"),
            Command::Messages(vec![Msg::GroupToggled { index: 1 }])
        );
        assert!(matches!(parse_line("toggle 0"), Command::Unknown(_)));
        assert!(matches!(parse_line("toggle x"), Command::Unknown(_)));
    }

    #[test]
    fn set_adds_a_form_field() {
        assert_eq!(
            parse_line("set matter = 2024-17"),
            Command::Messages(vec![Msg::FormFieldChanged {
                name: "matter".to_string(),
                value: "2024-17".to_string(),
            }])
        );
        assert!(matches!(parse_line("set =x"), Command::Unknown(_)));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_line("   "), Command::Empty);
        assert_eq!(parse_line("Submit"), Command::Messages(vec![Msg::SubmitClicked]));
        assert_eq!(parse_line("download"), Command::Messages(vec![Msg::DownloadClicked]));
        assert_eq!(parse_line("clear"), Command::Messages(vec![Msg::PickerChanged(Vec::new())]));
        assert_eq!(parse_line("exit"), Command::Quit);
        assert_eq!(parse_line("help"), Command::Help);
        assert!(matches!(parse_line("frobnicate"), Command::Unknown(_)));
    }
}
