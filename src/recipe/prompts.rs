use super::types::{RecipeRecord, ThumbnailDescription};

const EXTRACTION_PROMPT: &str = "\
You are looking at food items or cooking ingredients. List the name of every item you can \
identify with certainty, as a plain comma-separated list and nothing else. Be specific \
(\"red onion\", not \"vegetable\"). Never guess: if you are unsure whether an item is \
present, leave it out.";

const RECIPE_PROMPT: &str = "\
You are a master chef who knows every traditional Indian dish by heart. Given a list of \
ingredients, pick the conventional, real-world dish that best fits them and write its recipe \
for an Indian home cook. Only fall back to a Western dish when no Indian dish fits.

Rules:
1. Use only the listed ingredients. Common Indian spices may be assumed.
2. First decide what the ingredients are best suited for (sweet or savoury; snack, starter, \
main course or dessert), then choose the dish.
3. You do not have to use every ingredient. Prefer a coherent dish over using everything.
4. Never invent dishes or odd pairings such as fruit fried in oil in a spicy curry.
5. The recipe name is two or three words.
6. Never suggest a dish from the exclusion list below.
7. Reply with a single JSON object and nothing else, exactly in this shape:

{\"recipe_name\":\"\",\"ingredients\":[\"...\"],\"instructions\":\"\"}

\"recipe_name\" is the dish name, \"ingredients\" lists the ingredients the recipe uses, and \
\"instructions\" holds the method as Markdown. Do not rename, add or drop keys.";

const REPAIR_PROMPT: &str = "\
The text below was supposed to be a single JSON object but a strict JSON parser rejected it. \
The parser's error message follows the text. Fix the syntax so that it parses, keeping the \
same keys and values. Reply with the corrected JSON only: no Markdown fences, no headings, \
no commentary.";

const THUMBNAIL_PROMPT: &str = "\
Read the recipe below and describe the finished dish for a food photographer. Reply with a \
single JSON object and nothing else, exactly in this shape:

{\"dish_name\":\"\",\"visual_cues\":\"\"}

\"dish_name\" is the commonly searched name of the dish. \"visual_cues\" is one sentence on \
colour, texture, garnish and serving vessel.";

pub fn extraction_prompt() -> &'static str {
    EXTRACTION_PROMPT
}

/// Builds the recipe request. Every excluded name is written out verbatim so
/// the model can see what to avoid.
pub fn recipe_prompt(ingredients: &str, exclusions: &[String]) -> String {
    let exclusions: Vec<&str> = exclusions
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();

    let exclusion_list = if exclusions.is_empty() {
        "(none)".to_string()
    } else {
        exclusions
            .iter()
            .map(|name| format!("- {}", name))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{}\n\nINGREDIENTS:\n{}\n\nRECIPES YOU MUST NOT SUGGEST:\n{}",
        RECIPE_PROMPT,
        ingredients.trim(),
        exclusion_list
    )
}

pub fn repair_prompt(invalid: &str, reason: &str) -> String {
    format!(
        "{}\n\nTEXT:\n{}\n\nPARSER ERROR:\n{}",
        REPAIR_PROMPT, invalid, reason
    )
}

pub fn thumbnail_prompt(recipe: &RecipeRecord) -> String {
    // Serializing a plain struct into a String cannot fail.
    let recipe_json = serde_json::to_string_pretty(recipe).unwrap_or_else(|_| recipe.name.clone());
    format!("{}\n\nRECIPE:\n{}", THUMBNAIL_PROMPT, recipe_json)
}

pub fn photo_prompt(thumbnail: &ThumbnailDescription) -> String {
    let mut prompt = format!(
        "Appetizing, professional food photograph of {}",
        thumbnail.dish_name.trim()
    );
    let cues = thumbnail.visual_cues.trim();
    if !cues.is_empty() {
        prompt.push_str(". ");
        prompt.push_str(cues.trim_end_matches('.'));
    }
    prompt.push_str(". Plated and served, soft natural light, shallow depth of field.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Instructions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recipe_prompt_lists_exclusions_verbatim() {
        let exclusions = vec!["Aloo Gobi".to_string(), "Paneer Tikka Masala".to_string()];
        let prompt = recipe_prompt("potato, cauliflower", &exclusions);

        assert!(prompt.contains("- Aloo Gobi"));
        assert!(prompt.contains("- Paneer Tikka Masala"));
        assert!(prompt.contains("potato, cauliflower"));
    }

    #[test]
    fn test_recipe_prompt_without_exclusions() {
        let prompt = recipe_prompt("rice", &[]);
        assert!(prompt.ends_with("RECIPES YOU MUST NOT SUGGEST:\n(none)"));
    }

    #[test]
    fn test_recipe_prompt_skips_blank_exclusions() {
        let prompt = recipe_prompt("rice", &["  ".to_string()]);
        assert!(prompt.contains("(none)"));
    }

    #[test]
    fn test_repair_prompt_embeds_text_and_error() {
        let invalid = r#"{"recipe_name":"X" "ingredients":[]}"#;
        let reason = "expected `,` or `}` at line 1 column 20";

        let prompt = repair_prompt(invalid, reason);
        assert!(prompt.contains(invalid));
        assert!(prompt.contains(reason));
    }

    #[test]
    fn test_repair_prompt_is_deterministic() {
        assert_eq!(repair_prompt("{", "eof"), repair_prompt("{", "eof"));
    }

    #[test]
    fn test_thumbnail_prompt_includes_recipe() {
        let recipe = RecipeRecord {
            name: "Masala Dosa".to_string(),
            ingredients: vec!["rice".to_string(), "urad dal".to_string()],
            instructions: Instructions::Text("Ferment the batter.".to_string()),
        };

        let prompt = thumbnail_prompt(&recipe);
        assert!(prompt.contains("Masala Dosa"));
        assert!(prompt.contains("Ferment the batter."));
    }

    #[test]
    fn test_photo_prompt() {
        let thumbnail = ThumbnailDescription {
            dish_name: "Masala Dosa".to_string(),
            visual_cues: "Golden crisp crepe with coconut chutney.".to_string(),
        };

        assert_eq!(
            photo_prompt(&thumbnail),
            "Appetizing, professional food photograph of Masala Dosa. Golden crisp crepe with \
             coconut chutney. Plated and served, soft natural light, shallow depth of field."
        );
    }

    #[test]
    fn test_photo_prompt_without_cues() {
        let thumbnail = ThumbnailDescription {
            dish_name: "Kheer".to_string(),
            visual_cues: String::new(),
        };

        assert!(photo_prompt(&thumbnail).starts_with("Appetizing, professional food photograph of Kheer. Plated"));
    }
}
