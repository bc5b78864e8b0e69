//! Fake values for seeded rows.
//!
//! Every generator takes the caller's RNG so a fixed `--seed` reproduces the
//! same database.

use chrono::{Duration, NaiveDate};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::Bs;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Sentences};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;

/// Event descriptions never exceed this many characters
pub const MAX_DESCRIPTION_CHARS: usize = 150;

/// Events are scheduled between one week and six months out
pub const EVENT_WINDOW_DAYS: (i64, i64) = (7, 180);

/// Email attempts before falling back to a numbered address
const EMAIL_RETRIES: usize = 10;

const AVATAR_COLORS: &str = "E8F5FF/1D9BF0";
const EVENT_BANNER_COLORS: &str = "1D9BF0/FFFFFF";
const GROUP_BANNER_COLORS: &str = "7E57C2/FFFFFF";

const GROUP_SUFFIXES: [&str; 8] = [
    "Volunteers",
    "Helpers",
    "Crew",
    "Collective",
    "Circle",
    "Neighbors",
    "Squad",
    "Network",
];

pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    Name().fake_with_rng(rng)
}

/// Draw an email not yet in `taken` and record it there
pub fn unique_email<R: Rng + ?Sized>(rng: &mut R, taken: &mut HashSet<String>) -> String {
    for _ in 0..EMAIL_RETRIES {
        let email: String = SafeEmail().fake_with_rng(rng);
        if taken.insert(email.clone()) {
            return email;
        }
    }

    // The faker's pool is exhausted for this RNG state; number the address instead
    let base: String = SafeEmail().fake_with_rng(rng);
    let (local, domain) = base.split_once('@').unwrap_or((base.as_str(), "example.com"));
    let mut n = taken.len();
    loop {
        let email = format!("{}{}@{}", local, n, domain);
        if taken.insert(email.clone()) {
            return email;
        }
        n += 1;
    }
}

/// `"implement user-centric solutions"` becomes `"Implement User-Centric Solutions"`
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

pub fn event_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let phrase: String = Bs().fake_with_rng(rng);
    format!("{} Drive", title_case(&phrase))
}

/// A day uniformly inside the event window counted from `today`
pub fn event_date<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> NaiveDate {
    let (from, to) = EVENT_WINDOW_DAYS;
    today + Duration::days(rng.random_range(from..=to))
}

/// Cut `text` to at most `max_chars` characters, preferring a word boundary
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    // Leave room for the closing period
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    let trimmed = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}.", trimmed.trim_end_matches([',', '.', ';', ' ']))
}

pub fn description<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentences: Vec<String> = Sentences(2..5).fake_with_rng(rng);
    truncate_text(&sentences.join(" "), MAX_DESCRIPTION_CHARS)
}

/// A single-line postal address
pub fn address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    let city: String = CityName().fake_with_rng(rng);
    let state: String = StateAbbr().fake_with_rng(rng);
    let zip: String = ZipCode().fake_with_rng(rng);
    format!("{} {}, {}, {} {}", number, street, city, state, zip)
}

pub fn group_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let city: String = CityName().fake_with_rng(rng);
    let suffix = GROUP_SUFFIXES.choose(rng).copied().unwrap_or("Volunteers");
    format!("{} {}", city, suffix)
}

pub fn group_description<R: Rng + ?Sized>(rng: &mut R) -> String {
    Sentence(8..16).fake_with_rng(rng)
}

/// Placeholder text parameter: spaces become `+`, everything else is percent-encoded
fn placeholder_text(text: &str) -> String {
    text.split(' ')
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Square avatar showing the first letter of the name
pub fn avatar_url(name: &str) -> String {
    let initial = name
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "https://placehold.co/100x100/{}?text={}",
        AVATAR_COLORS,
        placeholder_text(&initial)
    )
}

pub fn event_banner_url(event_name: &str) -> String {
    format!(
        "https://placehold.co/600x200/{}?text={}",
        EVENT_BANNER_COLORS,
        placeholder_text(event_name)
    )
}

pub fn group_banner_url(group_name: &str) -> String {
    format!(
        "https://placehold.co/600x200/{}?text={}",
        GROUP_BANNER_COLORS,
        placeholder_text(group_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_title_case() {
        assert_eq!(
            title_case("implement user-centric solutions"),
            "Implement User-Centric Solutions"
        );
        assert_eq!(title_case("e-ENABLE b2b"), "E-Enable B2b");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_event_name_ends_with_drive() {
        let mut rng = StdRng::seed_from_u64(7);
        let name = event_name(&mut rng);
        assert!(name.ends_with(" Drive"), "got {}", name);
    }

    #[test]
    fn test_event_dates_stay_in_window() {
        let mut rng = StdRng::seed_from_u64(11);
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for _ in 0..500 {
            let date = event_date(&mut rng, today);
            let offset = (date - today).num_days();
            assert!((7..=180).contains(&offset), "offset {} out of window", offset);
        }
    }

    #[test]
    fn test_unique_email_never_repeats() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut taken = HashSet::new();
        for _ in 0..300 {
            unique_email(&mut rng, &mut taken);
        }
        assert_eq!(taken.len(), 300);
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(full_name(&mut a), full_name(&mut b));
        assert_eq!(address(&mut a), address(&mut b));
    }

    #[test]
    fn test_placeholder_urls() {
        assert_eq!(
            event_banner_url("Beach Cleanup Drive"),
            "https://placehold.co/600x200/1D9BF0/FFFFFF?text=Beach+Cleanup+Drive"
        );
        assert_eq!(
            avatar_url("ada lovelace"),
            "https://placehold.co/100x100/E8F5FF/1D9BF0?text=A"
        );
        assert_eq!(
            group_banner_url("Rock & Roll Crew"),
            "https://placehold.co/600x200/7E57C2/FFFFFF?text=Rock+%26+Roll+Crew"
        );
    }

    #[test]
    fn test_address_is_single_line() {
        let mut rng = StdRng::seed_from_u64(5);
        let address = address(&mut rng);
        assert!(!address.contains('\n'));
        assert_eq!(address.matches(", ").count(), 2);
    }

    proptest! {
        #[test]
        fn prop_truncate_respects_limit(text in "\\PC{0,400}", max in 2usize..200) {
            let out = truncate_text(&text, max);
            prop_assert!(out.chars().count() <= max);
        }

        #[test]
        fn prop_short_text_is_untouched(text in "[a-z ]{0,50}") {
            prop_assert_eq!(truncate_text(&text, MAX_DESCRIPTION_CHARS), text);
        }

        #[test]
        fn prop_descriptions_fit(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = description(&mut rng);
            prop_assert!(text.chars().count() <= MAX_DESCRIPTION_CHARS);
            prop_assert!(!text.is_empty());
        }
    }
}
