pub(crate) mod decode;
pub(crate) mod history;
pub(crate) mod route;

use std::path::Path;
use std::process;

use hindsight_codec::{Conversion, ConverterConfig, PayloadConverter, StatusCell};
use hindsight_interchange::{from_history_page, HistoryPage, WorkflowEvent};

use crate::report_error;

/// Read and parse a history page file, exiting on failure.
pub(crate) fn load_page(path: &Path, quiet: bool) -> HistoryPage {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            report_error(
                &format!("error reading file '{}': {}", path.display(), e),
                quiet,
            );
            process::exit(1);
        }
    };

    let json: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            report_error(
                &format!("error parsing JSON in '{}': {}", path.display(), e),
                quiet,
            );
            process::exit(1);
        }
    };

    match from_history_page(&json) {
        Ok(page) => page,
        Err(e) => {
            report_error(
                &format!("error: invalid history page '{}': {}", path.display(), e),
                quiet,
            );
            process::exit(1);
        }
    }
}

/// Convert every payload on the page, remotely when an endpoint is set.
pub(crate) fn convert_page(
    page: &HistoryPage,
    config: &ConverterConfig,
    quiet: bool,
) -> Conversion<Vec<WorkflowEvent>> {
    let converter = PayloadConverter::from_config(config, StatusCell::new());

    let rt = match crate::runtime() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(&format!("error: failed to start runtime: {}", e), quiet);
            process::exit(1);
        }
    };

    let conversion = rt.block_on(converter.convert_events(&page.events));
    tracing::debug!(
        events = page.events.len(),
        remote = converter.has_remote(),
        status = %conversion.status,
        "converted history page"
    );
    conversion
}
