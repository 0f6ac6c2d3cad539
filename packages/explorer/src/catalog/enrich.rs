//! Fill in display fields the service leaves out.
//!
//! Missing values are derived from a SHA-1 of the destination's id and name,
//! so the same record always gets the same price, rating and duration.

use std::collections::HashSet;

use api::RawDestination;
use sha1_smol::Sha1;
use tracing::warn;

use super::Destination;

/// Enrich a whole fetched collection.
///
/// Records without an id get `dest-<index>`. Ids are unique within the
/// result: a generated id that clashes with one the service sent, or a service
/// id sent twice, gets a `-<n>` suffix. Records with coordinates outside
/// `[-90, 90] x [-180, 180]` are dropped.
pub fn enrich_all(raw: Vec<RawDestination>) -> Vec<Destination> {
    let valid: Vec<(usize, RawDestination)> = raw
        .into_iter()
        .enumerate()
        .filter(|(_, raw)| {
            let keep = valid_coordinates(raw.lat, raw.lng);
            if !keep {
                warn!(name = %raw.name, lat = raw.lat, lng = raw.lng, "dropping destination with invalid coordinates");
            }
            keep
        })
        .collect();

    let reserved: HashSet<String> = valid
        .iter()
        .filter_map(|(_, raw)| non_blank(raw.id.clone()))
        .collect();
    let mut taken = HashSet::with_capacity(valid.len());

    valid
        .into_iter()
        .map(|(index, mut raw)| {
            let id = unique_id(non_blank(raw.id.take()), index, &reserved, &mut taken);
            enrich_with_id(id, raw)
        })
        .collect()
}

/// Enrich a single record; a missing id becomes `dest-<index>`.
pub fn enrich(index: usize, mut raw: RawDestination) -> Destination {
    let id = non_blank(raw.id.take()).unwrap_or_else(|| format!("dest-{index}"));
    enrich_with_id(id, raw)
}

fn unique_id(
    service_id: Option<String>,
    index: usize,
    reserved: &HashSet<String>,
    taken: &mut HashSet<String>,
) -> String {
    let base = match service_id {
        Some(id) if taken.insert(id.clone()) => return id,
        Some(id) => {
            warn!(id = %id, "service sent a duplicate destination id");
            id
        }
        None => format!("dest-{index}"),
    };

    let mut candidate = base.clone();
    let mut n = 1;
    while reserved.contains(&candidate) || taken.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn enrich_with_id(id: String, raw: RawDestination) -> Destination {
    let seed = fingerprint(&id, &raw.name);

    let price = non_blank(raw.price).unwrap_or_else(|| synthetic_price(seed[0]));
    let rating = raw
        .rating
        .filter(|r| r.is_finite())
        .unwrap_or_else(|| synthetic_rating(seed[1]));
    let duration = non_blank(raw.duration).unwrap_or_else(|| synthetic_duration(seed[2]));
    let image = non_blank(raw.image).unwrap_or_else(|| image_for(&raw.name));

    Destination {
        id,
        name: raw.name,
        lat: raw.lat,
        lng: raw.lng,
        description: raw.description.unwrap_or_default(),
        price,
        rating,
        duration,
        highlights: raw.highlights,
        image,
    }
}

/// Unsplash keyword URL for a destination name.
pub fn image_for(name: &str) -> String {
    let keywords: Vec<&str> = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    format!("https://source.unsplash.com/400x250/?{}", keywords.join(","))
}

fn valid_coordinates(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn fingerprint(id: &str, name: &str) -> [u32; 3] {
    let mut hasher = Sha1::new();
    hasher.update(id.as_bytes());
    hasher.update(&[0u8]);
    hasher.update(name.as_bytes());
    let digest = hasher.digest().bytes();

    let word = |i: usize| u32::from_be_bytes([digest[i], digest[i + 1], digest[i + 2], digest[i + 3]]);
    [word(0), word(4), word(8)]
}

/// $400 to $2,850 in steps of $50.
fn synthetic_price(seed: u32) -> String {
    format_dollars(400 + u64::from(seed % 50) * 50)
}

/// 3.5 to 4.9.
fn synthetic_rating(seed: u32) -> f64 {
    f64::from(35 + seed % 15) / 10.0
}

/// 3 to 14 days.
fn synthetic_duration(seed: u32) -> String {
    format!("{} days", 3 + seed % 12)
}

fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + 2);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
