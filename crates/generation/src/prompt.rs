use budget::BudgetPolicy;

use crate::{GenerationConfig, UserPreferences};

/// Builds the instruction text sent to the generation service.
///
/// The budget band is only a soft hint here; the budget filter enforces it
/// on whatever comes back.
pub fn build_prompt(
    prefs: &UserPreferences,
    policy: &BudgetPolicy,
    cfg: &GenerationConfig,
) -> String {
    let band = policy.band(prefs.budget);
    let currency = cfg.currency.as_str();
    let relation = match prefs.relation.trim() {
        "" => "unknown",
        relation => relation,
    };
    let vibe = if prefs.vibe.is_empty() {
        "any".to_string()
    } else {
        prefs.vibe.join(", ")
    };
    let bulk = if prefs.is_bulk_order {
        "yes (many identical small gifts, e.g. for colleagues or guests)"
    } else {
        "no"
    };

    format!(
        r#"Suggest exactly {count} gift ideas.

Requirements:
- Recipient: {gender}, age {age}
- Relation: {relation}
- Occasion: {occasion}
- Budget: {budget} {currency} (acceptable range {min}-{max} {currency})
- Bulk order: {bulk}
- Vibe: {vibe}

Rules:
- Suggest specific, real products with their brand names. No generic categories.
- Write product names in {language} where a local name exists.
- Prices are realistic market estimates, as whole numbers in {currency}.
- Do not suggest anything below {min} {currency} or above {max} {currency}.
- Keep description and reason under 80 characters each.

Answer with a JSON array only, no commentary, in this shape:
[{{"name": "Brand - Product", "price": {budget}, "description": "...", "reason": "...", "category": "..."}}]
Language: {language}."#,
        count = prefs.item_count,
        gender = prefs.recipient_gender.as_str(),
        age = prefs.recipient_age.as_str(),
        occasion = prefs.situation,
        budget = prefs.budget,
        min = band.min,
        max = band.max,
        language = cfg.language,
    )
}
