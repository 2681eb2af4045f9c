//! Filler words prepended to a generated identifier when its base name is
//! already taken. The bank is fixed; allocation draws from it at random.

pub const WORD_BANK: &[&str] = &[
    "Amber", "Ancient", "Apex", "Arc", "Astral", "Atlas", "Aurora", "Azure",
    "Bold", "Bright", "Bronze", "Calm", "Cedar", "Civic", "Clear", "Cobalt",
    "Coral", "Crimson", "Crisp", "Delta", "Drift", "Dusk", "Eager", "Early",
    "Ember", "Fabled", "Fleet", "Frost", "Gilded", "Grand", "Granite", "Hazel",
    "Hidden", "Indigo", "Iron", "Ivory", "Jade", "Keen", "Lively", "Lunar",
    "Marble", "Mellow", "Misty", "Noble", "Northern", "Oaken", "Opal", "Pale",
    "Prime", "Quiet", "Rapid", "Regal", "Rustic", "Sable", "Scarlet", "Silent",
    "Silver", "Solar", "Stark", "Sterling", "Summit", "Swift", "Tidal", "Umber",
    "Vivid", "Wandering", "Western", "Wild", "Winter", "Zephyr",
];
