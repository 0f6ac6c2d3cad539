//! Reference destinations shown in degraded mode.

use super::enrich::image_for;
use super::Destination;

struct Reference {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    description: &'static str,
    price: &'static str,
    rating: f64,
    duration: &'static str,
    highlights: &'static [&'static str],
}

const REFERENCE: &[Reference] = &[
    Reference {
        id: "ref-paris",
        name: "Paris",
        lat: 48.8566,
        lng: 2.3522,
        description: "The city of light, art and café terraces along the Seine.",
        price: "$1,200",
        rating: 4.8,
        duration: "5 days",
        highlights: &["Eiffel Tower", "Louvre Museum", "Montmartre"],
    },
    Reference {
        id: "ref-kyoto",
        name: "Kyoto",
        lat: 35.0116,
        lng: 135.7681,
        description: "Former imperial capital with thousands of temples and gardens.",
        price: "$1,450",
        rating: 4.9,
        duration: "7 days",
        highlights: &["Fushimi Inari", "Arashiyama Bamboo Grove", "Gion"],
    },
    Reference {
        id: "ref-bali",
        name: "Bali",
        lat: -8.3405,
        lng: 115.092,
        description: "Volcanic island of rice terraces, surf beaches and temples.",
        price: "$950",
        rating: 4.7,
        duration: "8 days",
        highlights: &["Ubud", "Uluwatu Temple", "Tegallalang Rice Terraces"],
    },
    Reference {
        id: "ref-new-york",
        name: "New York",
        lat: 40.7128,
        lng: -74.006,
        description: "Skyscrapers, Broadway and neighbourhoods that never sleep.",
        price: "$1,600",
        rating: 4.6,
        duration: "4 days",
        highlights: &["Central Park", "Statue of Liberty", "Brooklyn Bridge"],
    },
    Reference {
        id: "ref-cape-town",
        name: "Cape Town",
        lat: -33.9249,
        lng: 18.4241,
        description: "Where mountains meet two oceans at the tip of Africa.",
        price: "$1,100",
        rating: 4.7,
        duration: "6 days",
        highlights: &["Table Mountain", "Cape Point", "Boulders Beach"],
    },
    Reference {
        id: "ref-machu-picchu",
        name: "Machu Picchu",
        lat: -13.1631,
        lng: -72.545,
        description: "Inca citadel high in the Andes above the Urubamba valley.",
        price: "$1,350",
        rating: 4.9,
        duration: "6 days",
        highlights: &["Sun Gate", "Huayna Picchu", "Sacred Valley"],
    },
];

/// The fixed set served when live data is unavailable.
pub fn reference_destinations() -> Vec<Destination> {
    REFERENCE
        .iter()
        .map(|r| Destination {
            id: r.id.to_string(),
            name: r.name.to_string(),
            lat: r.lat,
            lng: r.lng,
            description: r.description.to_string(),
            price: r.price.to_string(),
            rating: r.rating,
            duration: r.duration.to_string(),
            highlights: r.highlights.iter().map(|h| h.to_string()).collect(),
            image: image_for(r.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_set_is_complete() {
        let destinations = reference_destinations();
        assert!(!destinations.is_empty());

        let ids: HashSet<_> = destinations.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), destinations.len());

        for d in &destinations {
            assert!((-90.0..=90.0).contains(&d.lat));
            assert!((-180.0..=180.0).contains(&d.lng));
            assert!(!d.highlights.is_empty());
            assert!(d.image.ends_with(&d.name.replace(' ', ",")));
        }
    }
}
