use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:24.green/black}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("━╸ ")
}

/// Creates the progress span of a sweep over `hosts` hosts.
///
/// The bar is drawn while the span is entered and disappears when it closes.
/// Ranges larger than `u64::MAX` are shown as full-length bars.
pub fn sweep_span(target: &str, hosts: u128) -> Span {
    let span = info_span!("credential_sweep", indicatif.pb_show = true);
    span.pb_set_style(&sweep_style());
    span.pb_set_length(u64::try_from(hosts).unwrap_or(u64::MAX));
    span.pb_set_message(&format!("checking {target}"));
    span
}

pub fn advance(span: &Span) {
    span.pb_inc(1);
}
