//! Token-overlap relevance scoring for search results.
//!
//! Product names mix brand words with generic ones, and search services
//! happily return reviews of the wrong product. We keep a result when enough
//! of the query's tokens show up in its title or channel name: all of them for
//! short queries, roughly two thirds for longer ones.

/// Characters replaced by spaces before tokenizing a query.
pub const STRIPPED_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Thresholds used when deciding whether a result matches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceFilter {
    /// Queries with at most this many tokens need every token to match.
    pub strict_up_to: usize,
    /// Required share of tokens (percent, rounded up) for longer queries.
    pub overlap_percent: usize,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self {
            strict_up_to: 2,
            overlap_percent: 66,
        }
    }
}

impl RelevanceFilter {
    /// Number of tokens that must match for a query of `token_count` tokens.
    pub fn required_matches(&self, token_count: usize) -> usize {
        if token_count <= self.strict_up_to {
            token_count
        } else {
            (token_count * self.overlap_percent).div_ceil(100)
        }
    }

    /// Prepares `query` for repeated matching.
    pub fn query(&self, query: &str) -> RelevanceQuery {
        let tokens = relevance_tokens(query);
        let required = self.required_matches(tokens.len());
        RelevanceQuery { tokens, required }
    }
}

/// A tokenized query ready to be matched against many candidate texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceQuery {
    tokens: Vec<String>,
    required: usize,
}

impl RelevanceQuery {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn required(&self) -> usize {
        self.required
    }

    /// Counts query tokens occurring as substrings of `text` (case-insensitive).
    pub fn match_count(&self, text: &str) -> usize {
        let haystack = text.to_lowercase();
        self.tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count()
    }

    /// Empty queries match everything.
    pub fn matches(&self, text: &str) -> bool {
        self.tokens.is_empty() || self.match_count(text) >= self.required
    }
}

/// Lowercases, strips punctuation, splits on whitespace and drops
/// single-character tokens.
pub fn relevance_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .chars()
        .map(|ch| if STRIPPED_PUNCTUATION.contains(ch) { ' ' } else { ch })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// One-shot check with the default thresholds.
pub fn is_relevant(candidate_text: &str, query: &str) -> bool {
    RelevanceFilter::default().query(query).matches(candidate_text)
}
