//! Message formatting for Telegram notifications.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::domain::{Instrument, InstrumentKind};
use crate::port::outbound::notifier::{Event, SummaryEvent};

/// Symbols listed in full up to this many per exchange.
const FULL_LIST_LIMIT: usize = 10;

/// Symbols shown when an exchange exceeds [`FULL_LIST_LIMIT`].
const PREVIEW_COUNT: usize = 5;

/// Format an event into a `MarkdownV2` message, or None if there is nothing to say.
pub fn format_event_message(event: &Event) -> Option<String> {
    match event {
        Event::NewInstruments(e) if e.instruments.is_empty() => None,
        Event::NewInstruments(e) => Some(format_new_instruments(&e.instruments)),
        Event::SyncSummary(e) => Some(format_summary(e)),
    }
}

fn format_new_instruments(instruments: &[Instrument]) -> String {
    let mut by_exchange: BTreeMap<&str, Vec<&Instrument>> = BTreeMap::new();
    for instrument in instruments {
        by_exchange
            .entry(instrument.exchange())
            .or_default()
            .push(instrument);
    }

    let mut msg = format!(
        "🆕 *New Listings Detected*\n\nFound `{}` new instrument\\(s\\)\n",
        instruments.len()
    );

    for (exchange, listed) in by_exchange {
        let spot = listed
            .iter()
            .filter(|i| i.kind() == InstrumentKind::Spot)
            .count();
        let derivative = listed.len() - spot;

        let _ = write!(msg, "\n🏦 *{}*\n", escape_markdown(&exchange.to_uppercase()));
        if spot > 0 {
            let _ = writeln!(msg, "   Spot: `{spot}`");
        }
        if derivative > 0 {
            let _ = writeln!(msg, "   Derivatives: `{derivative}`");
        }

        let shown = if listed.len() <= FULL_LIST_LIMIT {
            listed.len()
        } else {
            PREVIEW_COUNT
        };
        for instrument in listed.iter().take(shown) {
            let _ = writeln!(
                msg,
                "   • `{}` \\({}\\)",
                escape_code(instrument.symbol()),
                instrument.kind()
            );
        }
        if listed.len() > shown {
            let _ = writeln!(msg, "   … and {} more", listed.len() - shown);
        }
    }

    msg
}

fn format_summary(e: &SummaryEvent) -> String {
    let mut msg = format!(
        "📊 *Sync Summary*\n\n🔍 Checked: `{}`\n🆕 New: `{}`",
        e.fetched, e.new
    );
    if e.new == 0 {
        msg.push_str("\n✅ All markets are up to date");
    }
    msg
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape text placed inside an inline code span.
fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}
