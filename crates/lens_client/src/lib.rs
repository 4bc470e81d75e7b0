//! Allegation Lens client: HTTP transport and effect execution.
mod analyze;
mod client;
mod filename;
mod persist;
mod types;

pub use analyze::{Analyzer, ClientSettings, ReqwestAnalyzer};
pub use client::{ChannelEventSink, ClientHandle, EventSink};
pub use filename::local_report_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{ClientError, ClientEvent, FailureKind, TransportError};
