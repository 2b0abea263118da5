use std::path::Path;

use hindsight_codec::ConverterConfig;
use hindsight_history::{group_events, render_view};
use hindsight_interchange::EventView;

use super::{convert_page, load_page};

/// Decode, group and render a history page in `view`.
pub(crate) fn cmd_history(file: &Path, view: EventView, config: &ConverterConfig, quiet: bool) {
    let page = load_page(file, quiet);
    let conversion = convert_page(&page, config, quiet);

    let entities = group_events(conversion.converted);
    tracing::debug!(
        events = page.events.len(),
        entities = entities.len(),
        view = %view,
        "grouped history"
    );

    let rendered = render_view(&entities, view);
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
}
