use std::path::Path;

use hindsight_codec::ConverterConfig;
use hindsight_interchange::HistoryPage;

use super::{convert_page, load_page};

/// Print the page with every payload decoded; the conversion status goes
/// to stderr.
pub(crate) fn cmd_decode(file: &Path, config: &ConverterConfig, quiet: bool) {
    let page = load_page(file, quiet);
    let conversion = convert_page(&page, config, quiet);

    let decoded = HistoryPage {
        events: conversion.converted,
        next_page_token: page.next_page_token,
    };
    let json = decoded.to_json();
    println!(
        "{}",
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
    );

    if !quiet {
        eprintln!("conversion status: {}", conversion.status);
    }
}
