/// Path of the analysis endpoint, relative to the server root.
pub const ANALYZE_PATH: &str = "/analyze";
/// Path prefix of the report download endpoint.
pub const DOWNLOAD_REPORT_PATH: &str = "/download_report";
/// Multipart part name carrying the uploaded document.
pub const FILE_FIELD_NAME: &str = "file";

/// Download affordance for a generated report.
///
/// The filename is interpolated verbatim into both the link target and the
/// suggested save name; the server is responsible for sanitizing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLink {
    pub href: String,
    pub save_as: String,
}

impl ReportLink {
    pub fn for_filename(filename: &str) -> Self {
        Self {
            href: format!("{DOWNLOAD_REPORT_PATH}/{filename}"),
            save_as: filename.to_string(),
        }
    }
}
