use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub destination: &'static str,
    pub interests: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 5] = [
    Suggestion { destination: "Kyoto, Japan", interests: "Temples, Sushi, Nature" },
    Suggestion { destination: "Reykjavik, Iceland", interests: "Aurora, Hiking, Geysers" },
    Suggestion { destination: "Santorini, Greece", interests: "Sunsets, Wine, Beaches" },
    Suggestion { destination: "Amalfi Coast, Italy", interests: "Luxury, Pasta, Views" },
    Suggestion { destination: "Queenstown, NZ", interests: "Adventure, Mountains" },
];

/// Pick a curated destination to prefill the form with.
pub fn suggest_destination() -> Suggestion {
    SUGGESTIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SUGGESTIONS[0])
}
