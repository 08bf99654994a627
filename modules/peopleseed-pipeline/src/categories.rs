//! Compile-time category configuration: which occupations to query per
//! category, how many results to ask for, and which supplementary query
//! variants to run.

/// Supplementary query variants beyond the primary occupation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraQuery {
    /// Anchor on presence of a TikTok handle (P7085).
    TiktokHandleHolders,
    /// Anchor on presence of a YouTube channel ID (P2397).
    YoutubeChannelHolders,
    /// People referenced as subject/depicted of internet-meme artifacts.
    MemeSubjects,
}

/// Per-category discovery configuration.
pub struct CategoryConfig {
    pub slug: &'static str,
    /// Display profession label written onto parsed candidates.
    pub profession: &'static str,
    /// Occupation QIDs for the primary query.
    pub occupations: &'static [&'static str],
    pub limit: u32,
    pub min_birth_year: i32,
    /// Optional sex-or-gender QID constraint (P21).
    pub gender_filter: Option<&'static str>,
    pub extra_queries: &'static [ExtraQuery],
}

pub const CATEGORIES: &[CategoryConfig] = &[
    CategoryConfig {
        slug: "streamer",
        profession: "Streamer",
        occupations: &[
            "Q105756500", // live streamer
            "Q16947657",  // esports player
        ],
        limit: 350,
        min_birth_year: 1980,
        gender_filter: None,
        extra_queries: &[],
    },
    CategoryConfig {
        slug: "tiktoker",
        profession: "TikToker",
        occupations: &[
            "Q94791573", // TikToker
        ],
        limit: 500,
        min_birth_year: 1985,
        gender_filter: None,
        extra_queries: &[ExtraQuery::TiktokHandleHolders],
    },
    CategoryConfig {
        slug: "athlete",
        profession: "Athlete",
        occupations: &[
            "Q3665646",  // basketball player
            "Q937857",   // American football player
            "Q11303721", // association football player
            "Q10843402", // baseball player
            "Q10833314", // tennis player
            "Q13381376", // boxer
            "Q19204627", // mixed martial arts fighter
            "Q11338576", // swimmer
            "Q18515558", // track and field athlete
        ],
        limit: 450,
        min_birth_year: 1980,
        gender_filter: None,
        extra_queries: &[],
    },
    CategoryConfig {
        slug: "actor",
        profession: "Actor",
        occupations: &[
            "Q33999",    // actor
            "Q10800557", // film actor
            "Q2405480",  // voice actor
        ],
        limit: 300,
        min_birth_year: 1975,
        gender_filter: Some("Q6581072"), // male
        extra_queries: &[],
    },
    CategoryConfig {
        slug: "actress",
        profession: "Actress",
        occupations: &["Q33999", "Q10800557", "Q2405480"],
        limit: 300,
        min_birth_year: 1975,
        gender_filter: Some("Q6581097"), // female
        extra_queries: &[],
    },
    CategoryConfig {
        slug: "youtuber",
        profession: "YouTuber",
        occupations: &[
            "Q17125263", // YouTuber
        ],
        limit: 350,
        min_birth_year: 1980,
        gender_filter: None,
        extra_queries: &[ExtraQuery::YoutubeChannelHolders],
    },
    CategoryConfig {
        slug: "internet_personality",
        profession: "Internet Personality",
        occupations: &[
            "Q4964182",  // internet celebrity
            "Q66711686", // influencer
        ],
        limit: 400,
        min_birth_year: 1975,
        gender_filter: None,
        extra_queries: &[],
    },
    CategoryConfig {
        slug: "meme",
        profession: "Internet Personality",
        occupations: &[
            "Q4964182", // internet celebrity, as fallback
        ],
        limit: 250,
        min_birth_year: 1960,
        gender_filter: None,
        extra_queries: &[ExtraQuery::MemeSubjects],
    },
];

/// Look up a category by slug. Used by QA to map final records back to
/// their configured targets.
pub fn by_slug(slug: &str) -> Option<&'static CategoryConfig> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}
