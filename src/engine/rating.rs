//! Star ratings, normalized to whole stars out of five.

use regex::Regex;
use std::sync::LazyLock;

pub const MAX_STARS: u8 = 5;
const FILLED: char = '★';
const EMPTY: char = '☆';
const HALF: char = '½';

static FILM_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"★+½?").expect("valid film rating pattern"));
static BOOK_RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)rating:\s*([0-5])").expect("valid book rating pattern"));

/// Rating embedded in a Letterboxd title, e.g. "Heat, 1995 - ★★★½".
///
/// Half stars round half-to-even: "★★★½" is 4, "★★½" is 2.
pub fn film_rating(title: &str) -> Option<u8> {
    let run = FILM_STARS.find(title)?.as_str();
    let filled = run.chars().filter(|&c| c == FILLED).count() as f64;
    let half = if run.ends_with(HALF) { 0.5 } else { 0.0 };
    let rounded = (filled + half).round_ties_even();
    Some(rounded.min(MAX_STARS as f64) as u8)
}

/// Rating embedded in a Goodreads summary as "rating: N" (any case).
pub fn book_rating(summary: &str) -> Option<u8> {
    let caps = BOOK_RATING.captures(summary)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Fixed-width star string: `n` filled glyphs then `5 - n` empty ones.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(MAX_STARS) as usize;
    let mut out = String::with_capacity(MAX_STARS as usize * FILLED.len_utf8());
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(MAX_STARS as usize - filled));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_half_star_rounds_up_from_odd() {
        assert_eq!(film_rating("Movie Title ★★★½"), Some(4));
        assert_eq!(stars(4), "★★★★☆");
    }

    #[test]
    fn test_film_half_star_rounds_to_even() {
        // 2.5 -> 2, 4.5 -> 4, 0.5 never matches (no filled glyph)
        assert_eq!(film_rating("Arrival, 2016 - ★★½"), Some(2));
        assert_eq!(film_rating("Heat, 1995 - ★★★★½"), Some(4));
        assert_eq!(film_rating("Cats, 2019 - ½"), None);
    }

    #[test]
    fn test_film_whole_stars() {
        assert_eq!(film_rating("Paddington 2, 2017 - ★★★★★"), Some(5));
        assert_eq!(film_rating("Heat ★"), Some(1));
    }

    #[test]
    fn test_film_first_run_only() {
        assert_eq!(film_rating("★★ then ★★★★"), Some(2));
    }

    #[test]
    fn test_film_overlong_run_clamps() {
        assert_eq!(film_rating("★★★★★★★"), Some(5));
    }

    #[test]
    fn test_film_no_rating() {
        assert_eq!(film_rating("The Thing, 1982"), None);
        assert_eq!(film_rating(""), None);
    }

    #[test]
    fn test_book_rating_case_insensitive() {
        assert_eq!(book_rating("author: Le Guin<br/>Rating: 3<br/>"), Some(3));
        assert_eq!(book_rating("RATING:5"), Some(5));
        assert_eq!(book_rating("rating:   0"), Some(0));
        assert_eq!(stars(3), "★★★☆☆");
    }

    #[test]
    fn test_book_rating_out_of_range_or_missing() {
        assert_eq!(book_rating("rating: 7"), None);
        assert_eq!(book_rating("average rating 4.12"), None);
        assert_eq!(book_rating(""), None);
    }

    #[test]
    fn test_stars_bounds() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(stars(2).chars().count(), 5);
    }
}
