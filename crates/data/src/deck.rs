use crate::schema::DeckEntry;
use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const SECTION_HEADERS: &[&str] = &["deck", "sideboard", "commander", "companion", "maybeboard"];

/// Parses the client's text export, `<qty> <name> [(SET) <number>]` per
/// line. Repeated names are summed in first-seen order.
pub fn parse_deck_list(text: &str) -> anyhow::Result<Vec<DeckEntry>> {
    let mut entries: Vec<DeckEntry> = Vec::new();
    let mut in_about = false;
    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }
        let lowered = line.to_ascii_lowercase();
        if lowered == "about" {
            in_about = true;
            continue;
        }
        if SECTION_HEADERS.contains(&lowered.as_str()) {
            in_about = false;
            continue;
        }
        if in_about {
            continue;
        }
        let (quantity, name) = split_line(line)
            .with_context(|| format!("line {}: {}", number + 1, line))?;
        if quantity == 0 {
            bail!("line {}: quantity must be positive: {}", number + 1, line);
        }
        match entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => entries.push(DeckEntry {
                name: name.to_string(),
                quantity,
            }),
        }
    }
    Ok(entries)
}

fn split_line(line: &str) -> anyhow::Result<(u32, &str)> {
    let Some((count, rest)) = line.split_once(char::is_whitespace) else {
        bail!("expected `<quantity> <name>`");
    };
    let count = count.trim_end_matches(|c| c == 'x' || c == 'X');
    let quantity: u32 = count
        .parse()
        .with_context(|| format!("invalid quantity `{}`", count))?;
    let name = strip_set_suffix(rest.trim());
    if name.is_empty() {
        bail!("missing card name");
    }
    Ok((quantity, name))
}

/// Drops a trailing `(SET) 123` printing marker.
fn strip_set_suffix(name: &str) -> &str {
    let Some(open) = name.rfind(" (") else {
        return name;
    };
    let tail = &name[open + 2..];
    let Some(close) = tail.find(')') else {
        return name;
    };
    let code = &tail[..close];
    let after = tail[close + 1..].trim();
    let looks_like_set = !code.is_empty()
        && code.len() <= 6
        && code.chars().all(|c| c.is_ascii_alphanumeric());
    let looks_like_number = after.split_whitespace().count() <= 1;
    if looks_like_set && looks_like_number {
        name[..open].trim_end()
    } else {
        name
    }
}

pub fn load_deck_list(path: &Path) -> anyhow::Result<Vec<DeckEntry>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_deck_list(&raw).with_context(|| format!("parse {}", path.display()))
}

/// Owned copies, keyed by card name. Same text format as a deck list.
pub fn load_collection(path: &Path) -> anyhow::Result<BTreeMap<String, u32>> {
    let entries = load_deck_list(path)?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.name, entry.quantity))
        .collect())
}

/// Copies still missing per card, `max(deck - owned, 0)`, zero rows omitted.
pub fn missing_quantities(
    deck: &[DeckEntry],
    owned: &BTreeMap<String, u32>,
) -> BTreeMap<String, u32> {
    deck.iter()
        .filter_map(|entry| {
            let have = owned.get(&entry.name).copied().unwrap_or(0);
            let missing = entry.quantity.saturating_sub(have);
            (missing > 0).then(|| (entry.name.clone(), missing))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_export() {
        let text = "\
About
Name Golgari Midrange

Deck
4 Cut Down (DMU) 89
2 Sheoldred, the Apocalypse (DMU) 107
1 Swamp
3x Fable of the Mirror-Breaker

Sideboard
2 Duress (M21) 96
1 Cut Down
";
        let entries = parse_deck_list(text).expect("parse");
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Cut Down",
                "Sheoldred, the Apocalypse",
                "Swamp",
                "Fable of the Mirror-Breaker",
                "Duress"
            ]
        );
        assert_eq!(entries[0].quantity, 5);
        assert_eq!(entries[3].quantity, 3);
    }

    #[test]
    fn keeps_parentheses_that_are_part_of_the_name() {
        let odd = "Who // What // When (Extra Words Here)";
        assert_eq!(strip_set_suffix(odd), odd);
        assert_eq!(strip_set_suffix("Plains (FDN) 272"), "Plains");
        assert_eq!(strip_set_suffix("Island"), "Island");
    }

    #[test]
    fn rejects_lines_without_quantity() {
        let err = parse_deck_list("Deck\nLightning Bolt\n").expect_err("no quantity");
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = parse_deck_list("Deck\n4 Cut Down\n0 Duress (M21) 96\n").expect_err("zero");
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn missing_is_floored_at_zero() {
        let deck = vec![
            DeckEntry {
                name: "Cut Down".to_string(),
                quantity: 4,
            },
            DeckEntry {
                name: "Duress".to_string(),
                quantity: 2,
            },
        ];
        let mut owned = BTreeMap::new();
        owned.insert("Cut Down".to_string(), 1);
        owned.insert("Duress".to_string(), 6);
        let missing = missing_quantities(&deck, &owned);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing.get("Cut Down"), Some(&3));
    }
}
