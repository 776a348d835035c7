use strsim::normalized_levenshtein;

use crate::models::Candidate;
use crate::resolver::normalize::normalize;

/// Closest candidate title to a single word, if any clears `cutoff`.
///
/// Scores are normalized Levenshtein similarity in `[0, 1]` between the word
/// and the normalized title. Ties keep the higher-ranked candidate.
pub fn fuzzy_match<'a>(word: &str, candidates: &'a [Candidate], cutoff: f64) -> Option<&'a Candidate> {
    let word = normalize(word);
    if word.is_empty() {
        return None;
    }

    let mut best: Option<(&Candidate, f64)> = None;
    for candidate in candidates {
        let score = normalized_levenshtein(&word, &normalize(&candidate.title));
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    if let Some((candidate, score)) = best {
        log::debug!(
            "Fuzzy match for '{}': '{}' (score {:.2})",
            word,
            candidate.title,
            score
        );
    }
    best.map(|(c, _)| c)
}
