//! Terminal rendering of a finished query snapshot.

use platefinder_places::{Place, QuerySnapshot, QueryStatus};

/// Prints the snapshot to stdout, or fails with the query's error so the
/// process exits nonzero. An empty Ready result is a normal outcome and
/// renders a distinct notice rather than an error.
pub(crate) fn print_snapshot(snapshot: &QuerySnapshot, json: bool) -> anyhow::Result<()> {
    match &snapshot.status {
        QueryStatus::Failed(reason) => anyhow::bail!("nearby search failed: {reason}"),
        QueryStatus::Ready if snapshot.places.is_empty() => {
            println!("No restaurants found in this area.");
            Ok(())
        }
        QueryStatus::Ready => {
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.places)?);
            } else {
                print_list(&snapshot.places);
            }
            Ok(())
        }
        // A single-shot run always ends Ready or Failed; nothing to render.
        QueryStatus::Idle | QueryStatus::Loading => Ok(()),
    }
}

fn print_list(places: &[Place]) {
    for (index, place) in places.iter().enumerate() {
        println!(
            "{:>3}. {:<40} {:>3.1} ({:>5}) {:<4} {:<6} {}",
            index + 1,
            place.name,
            place.rating,
            place.rating_count,
            price_marker(place.price_level),
            open_marker(place.open_now),
            place.address.as_deref().unwrap_or("-"),
        );
    }
}

fn price_marker(price_level: Option<u8>) -> String {
    match price_level {
        Some(level) => "$".repeat(usize::from(level.clamp(1, 4))),
        None => "-".to_owned(),
    }
}

fn open_marker(open_now: Option<bool>) -> &'static str {
    match open_now {
        Some(true) => "open",
        Some(false) => "closed",
        None => "-",
    }
}
