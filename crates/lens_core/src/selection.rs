use std::path::{Path, PathBuf};

/// Extensions accepted by the client-side pre-check (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// A file chosen through the picker or dropped onto the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Builds a selection whose display name is the final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercased extension taken from the display name.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please select a file to analyze.")]
    NoFile,
    #[error("Unsupported file type for '{name}'. Please upload a PDF or DOCX file.")]
    UnsupportedExtension { name: String },
}

/// Advisory pre-submit check; the server performs the authoritative one.
pub fn validate_selection(file: Option<&SelectedFile>) -> Result<&SelectedFile, SelectionError> {
    let file = file.ok_or(SelectionError::NoFile)?;
    match file.extension() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(file),
        _ => Err(SelectionError::UnsupportedExtension {
            name: file.name().to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropZone {
    available: bool,
    active: bool,
}

impl DropZone {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            active: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true when the affordance changed.
    fn set_active(&mut self, active: bool) -> bool {
        if !self.available || self.active == active {
            return false;
        }
        self.active = active;
        true
    }
}

/// Canonical selected-file state shared by both input modalities.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSelection {
    selected: Option<SelectedFile>,
    drop_zone: DropZone,
}

impl FileSelection {
    pub fn new(drop_zone_available: bool) -> Self {
        Self {
            selected: None,
            drop_zone: DropZone::new(drop_zone_available),
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    /// Applies the picker's file list. An empty list (cancelled dialog) clears the selection.
    pub fn pick(&mut self, files: Vec<SelectedFile>) -> bool {
        let next = files.into_iter().next();
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    pub fn drag_hover(&mut self) -> bool {
        self.drop_zone.set_active(true)
    }

    pub fn drag_leave(&mut self) -> bool {
        self.drop_zone.set_active(false)
    }

    /// Applies a drop. Returns the newly selected file so the picker can be synced.
    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Option<SelectedFile> {
        if !self.drop_zone.is_available() {
            return None;
        }
        self.drop_zone.set_active(false);
        let first = files.into_iter().next()?;
        self.selected = Some(first.clone());
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_selection, SelectedFile, SelectionError};

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(
            SelectedFile::from_path("/tmp/brief.DOCX").extension().as_deref(),
            Some("docx")
        );
        assert_eq!(SelectedFile::from_path("/tmp/README").extension(), None);
        assert_eq!(SelectedFile::from_path("/tmp/trailing.").extension(), None);
    }

    #[test]
    fn validation_accepts_only_allow_listed_extensions() {
        let pdf = SelectedFile::from_path("brief.pdf");
        let docx = SelectedFile::from_path("brief.DOCX");
        let txt = SelectedFile::from_path("brief.txt");

        assert!(validate_selection(Some(&pdf)).is_ok());
        assert!(validate_selection(Some(&docx)).is_ok());
        assert_eq!(
            validate_selection(Some(&txt)),
            Err(SelectionError::UnsupportedExtension {
                name: "brief.txt".to_string()
            })
        );
        assert_eq!(validate_selection(None), Err(SelectionError::NoFile));
    }
}
