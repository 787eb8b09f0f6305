use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stampy_core::{BuyerType, Region};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub price: Option<Decimal>,
    /// Regions named in the question, always in England, Scotland, Wales
    /// order. Empty means the question never named one.
    pub regions: Vec<Region>,
    pub buyer_type: Option<BuyerType>,
    pub wants_comparison: bool,
    pub confidence_score: u8,
    pub clarification_prompt: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct IntentExtractor;

impl IntentExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> QueryIntent {
        let normalized_text = normalize_text(text);
        let tokens = tokenize(&normalized_text);

        let price = extract_price(&tokens);
        let regions = extract_regions(&normalized_text);
        let buyer_type = extract_buyer_type(&normalized_text);
        let wants_comparison = detect_comparison(&normalized_text);

        let confidence_score =
            confidence_score(price.is_some(), !regions.is_empty(), buyer_type.is_some());

        let clarification_prompt = if price.is_none() {
            Some(
                "I need a purchase price to work anything out. Add one like £450,000 or 450k."
                    .to_string(),
            )
        } else {
            None
        };

        QueryIntent {
            price,
            regions,
            buyer_type,
            wants_comparison,
            confidence_score,
            clarification_prompt,
        }
    }
}

/// Parses a money token into pounds: accepts `£450,000`, `450000`, `450k`,
/// and `1.2m`, with `$` tolerated as a stray symbol.
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let stripped = token.trim_start_matches('£').trim_start_matches('$').replace(',', "");
    let stripped = stripped.trim_end_matches('.');
    if stripped.is_empty() {
        return None;
    }

    let (number_part, multiplier) = if let Some(prefix) = stripped.strip_suffix('k') {
        (prefix, Decimal::from(1_000))
    } else if let Some(prefix) = stripped.strip_suffix('m') {
        (prefix, Decimal::from(1_000_000))
    } else {
        (stripped, Decimal::ONE)
    };

    let amount = number_part.parse::<Decimal>().ok()?;
    Some(amount * multiplier)
}

fn normalize_text(text: &str) -> String {
    text.to_ascii_lowercase()
}

fn tokenize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_ascii_alphanumeric() || matches!(character, '£' | '$' | '.' | ',') {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized.split_whitespace().map(|token| token.to_string()).collect()
}

fn extract_price(tokens: &[String]) -> Option<Decimal> {
    let price_context = [
        "price", "priced", "budget", "cost", "costing", "costs", "worth", "at", "for", "on",
        "around", "about", "under", "buying", "pay", "paying", "spend", "property", "house",
        "home", "flat",
    ];

    for (index, token) in tokens.iter().enumerate() {
        let has_symbol = token.starts_with('£') || token.starts_with('$');
        let has_suffix = has_money_suffix(token);
        let previous_in_context =
            index > 0 && price_context.contains(&tokens[index - 1].as_str());
        let next_in_context = tokens
            .get(index + 1)
            .is_some_and(|next| price_context.contains(&next.as_str()));

        if !(has_symbol || has_suffix || previous_in_context || next_in_context) {
            continue;
        }
        if let Some(amount) = parse_amount(token) {
            // A bare number picked up only from context must look like a
            // price, not a door number.
            let plausible = has_symbol || has_suffix || amount >= Decimal::from(1_000);
            if amount > Decimal::ZERO && plausible {
                return Some(amount);
            }
        }
    }
    None
}

fn has_money_suffix(token: &str) -> bool {
    let stripped = token.trim_start_matches('£').trim_start_matches('$');
    let stripped = stripped.trim_end_matches(|character| matches!(character, '.' | ','));
    match stripped.strip_suffix('k').or_else(|| stripped.strip_suffix('m')) {
        Some(number_part) => {
            !number_part.is_empty()
                && number_part
                    .chars()
                    .all(|character| character.is_ascii_digit() || matches!(character, '.' | ','))
        }
        None => false,
    }
}

fn extract_regions(normalized_text: &str) -> Vec<Region> {
    let mut regions = Vec::new();
    if normalized_text.contains("england")
        || normalized_text.contains("english")
        || normalized_text.contains("northern ireland")
    {
        regions.push(Region::England);
    }
    if normalized_text.contains("scotland") || normalized_text.contains("scottish") {
        regions.push(Region::Scotland);
    }
    if normalized_text.contains("wales") || normalized_text.contains("welsh") {
        regions.push(Region::Wales);
    }
    regions
}

fn extract_buyer_type(normalized_text: &str) -> Option<BuyerType> {
    // "ftb" counts only as a standalone word; it hides inside "softball".
    let mentions_ftb = normalized_text
        .split(|character: char| !character.is_ascii_alphanumeric())
        .any(|word| word == "ftb");
    if mentions_ftb
        || normalized_text.contains("first time")
        || normalized_text.contains("first-time")
        || normalized_text.contains("first home")
    {
        return Some(BuyerType::FirstTime);
    }
    if normalized_text.contains("additional")
        || normalized_text.contains("second home")
        || normalized_text.contains("second property")
        || normalized_text.contains("buy to let")
        || normalized_text.contains("buy-to-let")
        || normalized_text.contains("investment property")
        || normalized_text.contains("landlord")
        || normalized_text.contains("holiday home")
    {
        return Some(BuyerType::Additional);
    }
    None
}

fn detect_comparison(normalized_text: &str) -> bool {
    let comparison_keywords = [
        "compare",
        "comparison",
        "versus",
        " vs ",
        "vs.",
        "difference",
        "cheaper",
        "cheapest",
        "save",
        "saving",
    ];
    comparison_keywords.iter().any(|keyword| normalized_text.contains(keyword))
}

fn confidence_score(has_price: bool, has_region: bool, has_buyer_type: bool) -> u8 {
    let mut score = 10u8;
    if has_price {
        score += 45;
    }
    if has_region {
        score += 25;
    }
    if has_buyer_type {
        score += 20;
    }
    score.min(100)
}
