//! Identifier Extractor
//!
//! Best-effort heuristic that pulls a coin symbol or name out of free text.
//! Passes run in order and the first hit wins:
//!
//! 1. **Symbol**: first fully uppercase token of 2-6 characters (`BTC`, `DOGE`)
//! 2. **Name**: longest run of capitalized, non-stopword tokens (`Shiba Inu`)
//! 3. **Alias**: first [`COIN_ALIASES`] key contained anywhere in the
//!    lowercased query, in table order
//!
//! Punctuation is stripped before tokenizing, so `"BTC?"` and `"BTC"` are
//! the same token.

/// Lowercase words that never belong to a coin name
pub const STOPWORDS: &[&str] = &[
    "of", "the", "for", "and", "about", "price", "news", "market", "cap", "tell", "me", "what",
    "what's", "is", "latest", "current",
];

/// Common lowercase names/symbols and their display names.
///
/// Order matters: the first key found as a substring wins, so a short key
/// can shadow a later one (`"ada"` matches inside `"canada"`).
pub const COIN_ALIASES: &[(&str, &str)] = &[
    ("bitcoin", "Bitcoin"),
    ("btc", "Bitcoin"),
    ("ethereum", "Ethereum"),
    ("eth", "Ethereum"),
    ("solana", "Solana"),
    ("sol", "Solana"),
    ("ripple", "XRP"),
    ("xrp", "XRP"),
    ("cardano", "Cardano"),
    ("ada", "Cardano"),
    ("dogecoin", "Dogecoin"),
    ("doge", "Dogecoin"),
    ("shiba inu", "Shiba Inu"),
    ("shib", "Shiba Inu"),
    ("binance coin", "BNB"),
    ("bnb", "BNB"),
    ("avalanche", "Avalanche"),
    ("avax", "Avalanche"),
    ("polkadot", "Polkadot"),
    ("dot", "Polkadot"),
    ("tron", "TRON"),
    ("trx", "TRON"),
    ("chainlink", "Chainlink"),
    ("link", "Chainlink"),
    ("polygon", "Polygon"),
    ("matic", "Polygon"),
    ("litecoin", "Litecoin"),
    ("ltc", "Litecoin"),
    ("uniswap", "Uniswap"),
    ("uni", "Uniswap"),
    ("stellar", "Stellar"),
    ("xlm", "Stellar"),
    ("aptos", "Aptos"),
    ("apt", "Aptos"),
    ("arbitrum", "Arbitrum"),
    ("arb", "Arbitrum"),
    ("internet computer", "Internet Computer"),
    ("icp", "Internet Computer"),
    ("vechain", "VeChain"),
    ("vet", "VeChain"),
];

/// Extract a candidate coin identifier from a raw user query
pub fn extract(query: &str) -> Option<String> {
    let cleaned: String = query.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if let Some(symbol) = symbol_candidate(&tokens) {
        tracing::debug!(symbol, "Extracted ticker symbol");
        return Some(symbol.to_string());
    }

    if let Some(name) = name_candidate(&tokens) {
        tracing::debug!(name = %name, "Extracted capitalized name");
        return Some(name);
    }

    let alias = alias_candidate(&cleaned);
    if let Some(canonical) = alias {
        tracing::debug!(canonical, "Matched alias table");
    }
    alias.map(str::to_string)
}

/// Is `token` a plausible ticker (uppercase, 2-6 characters)?
pub fn looks_like_symbol(token: &str) -> bool {
    let len = token.chars().count();
    is_upper(token) && 1 < len && len < 7
}

fn symbol_candidate<'a>(tokens: &[&'a str]) -> Option<&'a str> {
    tokens.iter().copied().find(|t| looks_like_symbol(t))
}

fn name_candidate(tokens: &[&str]) -> Option<String> {
    let mut phrase: Vec<&str> = Vec::new();
    let mut longest = String::new();

    for &token in tokens {
        if (is_upper(token) || is_title(token)) && !is_stopword(token) {
            phrase.push(token);
        } else {
            close_phrase(&mut phrase, &mut longest);
        }
    }
    close_phrase(&mut phrase, &mut longest);

    (!longest.is_empty()).then_some(longest)
}

/// Keep the joined phrase if it is strictly longer than the best so far
fn close_phrase(phrase: &mut Vec<&str>, longest: &mut String) {
    if phrase.is_empty() {
        return;
    }
    let candidate = phrase.join(" ");
    if candidate.chars().count() > longest.chars().count() {
        *longest = candidate;
    }
    phrase.clear();
}

fn alias_candidate(query: &str) -> Option<&'static str> {
    let lowered = query.to_lowercase();
    COIN_ALIASES
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|&(_, canonical)| canonical)
}

fn is_stopword(token: &str) -> bool {
    let lowered = token.to_lowercase();
    STOPWORDS.contains(&lowered.as_str())
}

/// At least one uppercase letter and no lowercase ones
fn is_upper(token: &str) -> bool {
    token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase)
}

/// Uppercase first letter, no uppercase after it
///
/// Digits do not start a new word: `2Pac` and `Btc2X` are not title case,
/// while `Web3` is.
fn is_title(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(char::is_uppercase) && chars.all(|c| !c.is_uppercase())
}
