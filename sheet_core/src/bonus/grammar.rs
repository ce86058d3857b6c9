//! Grammar for the human-authored text carried by bonuses and modifiers
//!
//! Every production returns `None` (or nothing) when the text does not
//! match. Callers treat that as "skip this text", never as an error.
//!
//! ```text
//! signed     := ws* ("+" | "-") ws* digit+
//! attribute  := key signed ws*                 key := letter+
//! dr         := "DR" ("+" | "-") digit+ rest   (first occurrence anywhere in the text)
//!                                              rest := fragment ("," fragment)*
//! defense    := "[" signed ws+ "DB" ws* "]"    (any number, anywhere in the text)
//! reaction   := "Reaction" signed situation
//! modifier   := int description (("#" tag) | ("@" ref) | text)*
//! ```

/// A parsed `DR+N fragments` bonus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrBonus {
    pub amount: i32,
    /// Location name fragments; empty means every location
    pub fragments: Vec<String>,
}

/// A parsed standing roll modifier such as `+2 Aim #allRolls`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedModifier {
    pub amount: i32,
    pub description: String,
    /// Hashtags without the leading `#`
    pub tags: Vec<String>,
    /// `@` references without the leading `@`
    pub references: Vec<String>,
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn parse_digits(digits: &str) -> Option<i32> {
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// `signed`: a mandatory sign followed by digits. Returns the value and the remaining text.
pub fn signed(s: &str) -> Option<(i32, &str)> {
    let s = s.trim_start();
    let (negative, rest) = match s.chars().next()? {
        '+' => (false, &s[1..]),
        '-' => (true, &s[1..]),
        _ => return None,
    };
    let (digits, rest) = split_digits(rest.trim_start());
    let value = parse_digits(digits)?;
    Some((if negative { -value } else { value }, rest))
}

/// Leading integer with optional sign: `"9F"` is 9, `"No"` is `None`
pub fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    if s.starts_with(['+', '-']) {
        return signed(s).map(|(value, _)| value);
    }
    let (digits, _) = split_digits(s);
    parse_digits(digits)
}

/// `attribute`: `ST+2`, `dodge -1`. The key is returned uppercased.
pub fn attribute(text: &str) -> Option<(String, i32)> {
    let text = text.trim();
    let key_end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
        .map(|(i, _)| i)?;
    if key_end == 0 {
        return None;
    }
    let (key, rest) = text.split_at(key_end);
    let (amount, rest) = signed(rest)?;
    if !rest.trim().is_empty() {
        return None;
    }
    Some((key.to_ascii_uppercase(), amount))
}

/// `dr`: `DR+2 arm, leg`, possibly after a label (`Helm: DR+3 skull`).
/// The sign must follow `DR` immediately; the first such `DR` wins.
pub fn dr(text: &str) -> Option<DrBonus> {
    text.match_indices("DR")
        .find_map(|(i, _)| dr_at(&text[i + 2..]))
}

fn dr_at(rest: &str) -> Option<DrBonus> {
    if !rest.starts_with(['+', '-']) {
        return None;
    }
    let (amount, rest) = signed(rest)?;
    let fragments = rest
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    Some(DrBonus { amount, fragments })
}

fn defense_at(s: &str) -> Option<i32> {
    let (amount, rest) = signed(s)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let tag = rest.get(..2)?;
    if !tag.eq_ignore_ascii_case("DB") {
        return None;
    }
    rest[2..].trim_start().starts_with(']').then_some(amount)
}

/// `defense`: every `[+N DB]` occurring in the text
pub fn defense(text: &str) -> Vec<i32> {
    text.match_indices('[')
        .filter_map(|(i, _)| defense_at(&text[i + 1..]))
        .collect()
}

/// `reaction`: `Reaction+2 from elves`. Returns the amount and the situation.
pub fn reaction(text: &str) -> Option<(i32, String)> {
    let text = text.trim_start();
    let keyword = text.get(..8)?;
    if !keyword.eq_ignore_ascii_case("reaction") {
        return None;
    }
    let (amount, rest) = signed(&text[8..])?;
    Some((amount, rest.trim().to_string()))
}

fn marked_words(text: &str, marker: char) -> Vec<String> {
    text.split(marker)
        .skip(1)
        .filter_map(|chunk| {
            let word: String = chunk
                .chars()
                .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
                .collect();
            (!word.is_empty()).then_some(word)
        })
        .collect()
}

/// Hashtags embedded in the text, without the `#`
pub fn hashtags(text: &str) -> Vec<String> {
    marked_words(text, '#')
}

/// `@` references embedded in the text, without the `@`
pub fn references(text: &str) -> Vec<String> {
    marked_words(text, '@')
}

/// `modifier`: leading integer amount, then the description up to the first
/// tag or reference marker.
pub fn modifier(text: &str) -> Option<ParsedModifier> {
    let text = text.trim_start();
    let amount = leading_int(text)?;
    let body = text.trim_start_matches(['+', '-']).trim_start();
    let (_, body) = split_digits(body);
    let description_end = body.find(['#', '@']).unwrap_or(body.len());
    Some(ParsedModifier {
        amount,
        description: body[..description_end].trim().to_string(),
        tags: hashtags(body),
        references: references(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed() {
        assert_eq!(signed("+3 rest"), Some((3, " rest")));
        assert_eq!(signed(" - 2"), Some((-2, "")));
        assert_eq!(signed("3"), None);
        assert_eq!(signed("+x"), None);
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("9F"), Some(9));
        assert_eq!(leading_int("-1U"), Some(-1));
        assert_eq!(leading_int("No"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_attribute() {
        assert_eq!(attribute("ST+2"), Some(("ST".to_string(), 2)));
        assert_eq!(attribute("dodge -1"), Some(("DODGE".to_string(), -1)));
        assert_eq!(attribute("ST+2 when angry"), None);
        assert_eq!(attribute("+2"), None);
    }

    #[test]
    fn test_dr() {
        let bonus = dr("DR+2 arm, leg").unwrap();
        assert_eq!(bonus.amount, 2);
        assert_eq!(bonus.fragments, vec!["arm".to_string(), "leg".to_string()]);

        let bonus = dr("DR-1").unwrap();
        assert_eq!(bonus.amount, -1);
        assert!(bonus.fragments.is_empty());

        let bonus = dr("Helm: DR+3 skull").unwrap();
        assert_eq!(bonus.amount, 3);
        assert_eq!(bonus.fragments, vec!["skull".to_string()]);

        let bonus = dr("Toughness (DR 1) DR+2 torso").unwrap();
        assert_eq!(bonus.amount, 2);
        assert_eq!(bonus.fragments, vec!["torso".to_string()]);

        assert_eq!(dr("DR 2 torso"), None);
        assert_eq!(dr("dr+2 torso"), None);
        assert_eq!(dr("DR+ torso"), None);
    }

    #[test]
    fn test_defense() {
        assert_eq!(defense("Shield [+2 DB]"), vec![2]);
        assert_eq!(defense("[+1 DB] and [-1 db ]"), vec![1, -1]);
        assert!(defense("[+1DB]").is_empty());
        assert!(defense("[DB]").is_empty());
    }

    #[test]
    fn test_reaction() {
        assert_eq!(
            reaction("Reaction+2 from elves"),
            Some((2, "from elves".to_string()))
        );
        assert_eq!(reaction("reaction -1"), Some((-1, String::new())));
        assert_eq!(reaction("React+1"), None);
    }

    #[test]
    fn test_modifier() {
        let parsed = modifier("+2 Aim #allRolls").unwrap();
        assert_eq!(parsed.amount, 2);
        assert_eq!(parsed.description, "Aim");
        assert_eq!(parsed.tags, vec!["allRolls".to_string()]);

        let parsed = modifier("-1 for Bad Footing #combatOnly #dodge @Broadsword").unwrap();
        assert_eq!(parsed.amount, -1);
        assert_eq!(parsed.description, "for Bad Footing");
        assert_eq!(parsed.tags.len(), 2);
        assert_eq!(parsed.references, vec!["Broadsword".to_string()]);

        assert!(modifier("Aim #allRolls").is_none());
    }
}
