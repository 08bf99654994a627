//! SPARQL query builders for public-figure discovery.
//!
//! Every builder emits the same SELECT variable set so a single parser
//! handles all result shapes. All queries constrain to humans (P31 Q5)
//! with an image (P18) and a birth date (P569), and bound the birth year
//! to `[min_birth_year, adult_cutoff_year]` — entities without a birth
//! date can never match, so minors with unknown age are excluded at the
//! source rather than downstream.

const SELECT: &str = "SELECT DISTINCT ?person ?personLabel ?personDescription ?image ?birthDate\n       ?genderLabel ?twitterHandle ?instagramHandle ?tiktokHandle ?youtubeChannelId";

const LABEL_SERVICE: &str =
    "  SERVICE wikibase:label { bd:serviceParam wikibase:language \"en\" . }";

const SOCIAL_PROPS: [(&str, &str); 4] = [
    ("twitterHandle", "P2002"),
    ("instagramHandle", "P2003"),
    ("tiktokHandle", "P7085"),
    ("youtubeChannelId", "P2397"),
];

/// OPTIONAL blocks for gender and the social handles. `required_var`
/// names a handle variable already bound by a mandatory pattern, which
/// must not be re-bound optionally.
fn optional_blocks(required_var: Option<&str>) -> String {
    let mut out = String::from("  OPTIONAL { ?person wdt:P21 ?gender . }\n");
    for (var, prop) in SOCIAL_PROPS {
        if required_var == Some(var) {
            continue;
        }
        out.push_str(&format!("  OPTIONAL {{ ?person wdt:{prop} ?{var} . }}\n"));
    }
    out
}

/// Occupation-anchored query: humans holding any of the given occupation
/// QIDs, optionally restricted to one gender QID.
pub fn occupation_query(
    occupations: &[&str],
    limit: u32,
    min_birth_year: i32,
    adult_cutoff_year: i32,
    gender_filter: Option<&str>,
) -> String {
    let values = occupations
        .iter()
        .map(|q| format!("wd:{q}"))
        .collect::<Vec<_>>()
        .join(" ");
    let gender_clause = gender_filter
        .map(|g| format!("  ?person wdt:P21 wd:{g} .\n"))
        .unwrap_or_default();
    let optionals = optional_blocks(None);

    format!(
        "{SELECT}\nWHERE {{\n  ?person wdt:P31 wd:Q5 ;\n          wdt:P18 ?image ;\n          wdt:P569 ?birthDate .\n  VALUES ?occupation {{ {values} }}\n  ?person wdt:P106 ?occupation .\n{gender_clause}  FILTER(YEAR(?birthDate) >= {min_birth_year})\n  FILTER(YEAR(?birthDate) <= {adult_cutoff_year})\n\n{optionals}{LABEL_SERVICE}\n}}\nLIMIT {limit}\n"
    )
}

/// Handle-anchored query: humans that hold the given social property,
/// regardless of recorded occupation.
fn handle_query(
    prop: &str,
    var: &str,
    limit: u32,
    min_birth_year: i32,
    adult_cutoff_year: i32,
) -> String {
    let optionals = optional_blocks(Some(var));
    format!(
        "{SELECT}\nWHERE {{\n  ?person wdt:P31 wd:Q5 ;\n          wdt:P18 ?image ;\n          wdt:P569 ?birthDate ;\n          wdt:{prop} ?{var} .\n  FILTER(YEAR(?birthDate) >= {min_birth_year})\n  FILTER(YEAR(?birthDate) <= {adult_cutoff_year})\n\n{optionals}{LABEL_SERVICE}\n}}\nLIMIT {limit}\n"
    )
}

/// People with a TikTok handle (P7085) and an image.
pub fn tiktok_handle_query(limit: u32, min_birth_year: i32, adult_cutoff_year: i32) -> String {
    handle_query("P7085", "tiktokHandle", limit, min_birth_year, adult_cutoff_year)
}

/// People with a YouTube channel ID (P2397) and an image.
pub fn youtube_channel_query(limit: u32, min_birth_year: i32, adult_cutoff_year: i32) -> String {
    handle_query("P2397", "youtubeChannelId", limit, min_birth_year, adult_cutoff_year)
}

/// People referenced as main subject (P921) or depicted (P180) by an
/// internet-meme artifact (instance of Q2927074, transitively).
pub fn meme_subject_query(limit: u32, min_birth_year: i32, adult_cutoff_year: i32) -> String {
    let optionals = optional_blocks(None);
    format!(
        "{SELECT}\nWHERE {{\n  {{\n    ?person wdt:P31 wd:Q5 ;\n            wdt:P18 ?image ;\n            wdt:P569 ?birthDate .\n    ?meme wdt:P31/wdt:P279* wd:Q2927074 ;\n          wdt:P921 ?person .\n  }}\n  UNION\n  {{\n    ?person wdt:P31 wd:Q5 ;\n            wdt:P18 ?image ;\n            wdt:P569 ?birthDate .\n    ?meme wdt:P31/wdt:P279* wd:Q2927074 ;\n          wdt:P180 ?person .\n  }}\n  FILTER(YEAR(?birthDate) >= {min_birth_year})\n  FILTER(YEAR(?birthDate) <= {adult_cutoff_year})\n\n{optionals}{LABEL_SERVICE}\n}}\nLIMIT {limit}\n"
    )
}
