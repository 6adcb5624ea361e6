//! Free-text stealth classifier.
//!
//! A keyword heuristic, not a semantic parse: "quietly draw my sword and
//! attack" counts as maintaining stealth because maintaining keywords are
//! checked first. Callers that know the action type should pass it
//! explicitly instead.

/// Words and phrases that keep a character hidden. Checked first.
const MAINTAINING: &[&str] = &[
    "sneak",
    "sneaks",
    "sneaking",
    "hide",
    "hides",
    "hiding",
    "creep",
    "creeps",
    "tiptoe",
    "tiptoes",
    "quietly",
    "silently",
    "stealthily",
    "carefully",
    "stay hidden",
    "stay still",
    "keep low",
    "hold my breath",
    "observe",
    "watch",
    "listen",
    "wait",
    "peek",
];

/// Words and phrases that reveal a character.
const BREAKING: &[&str] = &[
    "attack",
    "attacks",
    "strike",
    "stab",
    "shoot",
    "fire",
    "cast",
    "charge",
    "fight",
    "shout",
    "shouts",
    "yell",
    "yells",
    "scream",
    "call out",
    "sing",
    "talk",
    "speak",
    "greet",
    "run",
    "sprint",
    "smash",
    "break",
    "kick",
    "throw",
    "light a torch",
    "reveal",
    "step out",
];

/// Whether a described action ends the character's hiding.
pub fn action_breaks_stealth(description: &str) -> bool {
    let words = tokenize(description);
    if MAINTAINING.iter().any(|k| contains_phrase(&words, k)) {
        return false;
    }
    BREAKING.iter().any(|k| contains_phrase(&words, k))
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whole-word match of a (possibly multi-word) phrase.
fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
}
