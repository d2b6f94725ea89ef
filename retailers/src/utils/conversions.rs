use std::sync::LazyLock;

use regex::Regex;

static NON_PRICE_CHARACTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\d.]+").expect("Regex should compile as nothing has changed")
});

/// Trims the title, then swaps commas for spaces so the title can sit in a
/// comma separated line
pub(crate) fn normalize_title(title: &str) -> String {
    title.trim().replace(',', " ")
}

/// Drops everything but digits and `.`, "$1,299.99" turns into "1299.99"
pub(crate) fn normalize_price(price: &str) -> String {
    NON_PRICE_CHARACTERS.replace_all(price, "").into_owned()
}
