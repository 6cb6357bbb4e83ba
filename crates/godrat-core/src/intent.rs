//! Classification of incoming chat text into bot intents.
//!
//! Matchers are pure functions evaluated in a fixed priority order; the first
//! one that recognizes the text wins.

use crate::class::NewClass;

/// Field separator of the structured add format.
pub const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 5;

/// Reserved command keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    AddClass,
    FindClass,
    ListClasses,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Start,
        Command::AddClass,
        Command::FindClass,
        Command::ListClasses,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::AddClass => "/addclass",
            Command::FindClass => "/findclass",
            Command::ListClasses => "/listclasses",
        }
    }
}

/// Why a piece of user input was rejected before touching the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Four separators present but the text does not split into five fields.
    MalformedFields,
    /// The semester field is not an integer.
    NonNumericSemester,
    /// The search term contains characters that are not plain text.
    InvalidSearchTerm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Command(Command),
    AddClass(NewClass),
    Search(String),
    Rejected(InputError),
}

type Matcher = fn(&str) -> Option<Intent>;

const MATCHERS: &[Matcher] = &[match_command, match_structured_add, match_search];

/// Classify one message body. `None` means the message is ignored (no reply).
pub fn classify(text: &str) -> Option<Intent> {
    MATCHERS.iter().find_map(|m| m(text))
}

fn match_command(text: &str) -> Option<Intent> {
    let trimmed = text.trim();
    Command::ALL
        .into_iter()
        .find(|c| is_command(trimmed, c.keyword()))
        .map(Intent::Command)
}

/// `keyword` alone, or `keyword@BotName` as group chats address commands.
fn is_command(text: &str, keyword: &str) -> bool {
    match text.strip_prefix(keyword) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('@')
            .is_some_and(|bot| !bot.is_empty() && !bot.contains(char::is_whitespace)),
        None => false,
    }
}

fn match_structured_add(text: &str) -> Option<Intent> {
    if text.matches(FIELD_SEPARATOR).count() != FIELD_COUNT - 1 {
        return None;
    }
    Some(match parse_new_class(text) {
        Ok(new) => Intent::AddClass(new),
        Err(e) => Intent::Rejected(e),
    })
}

fn match_search(text: &str) -> Option<Intent> {
    let term = text.trim();
    if term.is_empty() {
        return None;
    }
    if !is_plain_text(term) {
        return Some(Intent::Rejected(InputError::InvalidSearchTerm));
    }
    Some(Intent::Search(term.to_string()))
}

/// Parse `name | instructor | link | semester | primary-flag`.
pub fn parse_new_class(text: &str) -> Result<NewClass, InputError> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [name, instructor, link, semester, kind] = fields.as_slice() else {
        return Err(InputError::MalformedFields);
    };

    if semester.parse::<i64>().is_err() {
        return Err(InputError::NonNumericSemester);
    }

    Ok(NewClass {
        name: name.to_string(),
        instructor: instructor.to_string(),
        link: link.to_string(),
        semester: semester.to_string(),
        is_primary: is_primary_flag(kind),
    })
}

/// Per-character simple lowercase, so `İ` folds to a plain `i`.
fn is_primary_flag(kind: &str) -> bool {
    kind.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .eq("primary".chars())
}

/// U+FFFD marks a lossy decode upstream; control characters are not text.
fn is_plain_text(s: &str) -> bool {
    !s.chars()
        .any(|c| c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_keywords_map_to_commands() {
        assert_eq!(classify("/start"), Some(Intent::Command(Command::Start)));
        assert_eq!(classify("/addclass"), Some(Intent::Command(Command::AddClass)));
        assert_eq!(classify("/findclass"), Some(Intent::Command(Command::FindClass)));
        assert_eq!(
            classify("/listclasses"),
            Some(Intent::Command(Command::ListClasses))
        );
    }

    #[test]
    fn bot_mention_suffix_is_accepted() {
        assert_eq!(
            classify("/listclasses@godrat_bot"),
            Some(Intent::Command(Command::ListClasses))
        );
        assert_eq!(classify(" /start "), Some(Intent::Command(Command::Start)));
    }

    #[test]
    fn unknown_slash_text_falls_through_to_search() {
        assert_eq!(
            classify("/listclasses now"),
            Some(Intent::Search("/listclasses now".to_string()))
        );
        assert_eq!(classify("/help"), Some(Intent::Search("/help".to_string())));
    }

    #[test]
    fn structured_add_example() {
        let intent = classify("Algorithms | Dr. Lee | https://t.me/algo101 | 4041 | primary");
        assert_eq!(
            intent,
            Some(Intent::AddClass(NewClass {
                name: "Algorithms".to_string(),
                instructor: "Dr. Lee".to_string(),
                link: "https://t.me/algo101".to_string(),
                semester: "4041".to_string(),
                is_primary: true,
            }))
        );
    }

    #[test]
    fn primary_flag_is_case_insensitive_and_defaults_false() {
        let flag = |kind: &str| match parse_new_class(&format!("a|b|c|1|{kind}")) {
            Ok(n) => n.is_primary,
            Err(e) => panic!("unexpected {e:?}"),
        };
        assert!(flag("primary"));
        assert!(flag("  PRIMARY "));
        assert!(flag("Primary"));
        assert!(!flag("other"));
        assert!(!flag(""));
        assert!(!flag("primary!"));
    }

    #[test]
    fn non_numeric_semester_is_rejected() {
        assert_eq!(
            classify("Algorithms | Dr. Lee | https://t.me/algo101 | four | primary"),
            Some(Intent::Rejected(InputError::NonNumericSemester))
        );
        assert_eq!(
            parse_new_class("a|b|c|  |primary"),
            Err(InputError::NonNumericSemester)
        );
        assert_eq!(parse_new_class("a|b|c|12.5|x"), Err(InputError::NonNumericSemester));
    }

    #[test]
    fn signed_semester_parses_like_an_integer() {
        assert_eq!(parse_new_class("a|b|c|+3|x").unwrap().semester, "+3");
    }

    #[test]
    fn empty_fields_are_kept_as_empty_text() {
        let n = parse_new_class("a||c|1|x").unwrap();
        assert_eq!(n.instructor, "");
        assert!(!n.is_primary);

        match classify(" | | | 1 | primary") {
            Some(Intent::AddClass(n)) => {
                assert_eq!((n.name.as_str(), n.instructor.as_str(), n.link.as_str()), ("", "", ""));
                assert_eq!(n.semester, "1");
                assert!(n.is_primary);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn split_that_is_not_five_fields_is_malformed() {
        assert_eq!(parse_new_class("a|b|c|1"), Err(InputError::MalformedFields));
        assert_eq!(parse_new_class("a|b|c|1|x|y"), Err(InputError::MalformedFields));
    }

    #[test]
    fn primary_flag_uses_unicode_lowercase() {
        assert!(parse_new_class("a|b|c|1|PRİMARY").unwrap().is_primary);
        assert!(parse_new_class("a|b|c|1|prİmary").unwrap().is_primary);
        assert!(!parse_new_class("a|b|c|1|PRIMARYİ").unwrap().is_primary);
    }

    #[test]
    fn mention_must_be_the_whole_trailing_token() {
        assert_eq!(
            classify("/listclasses@bot now"),
            Some(Intent::Search("/listclasses@bot now".to_string()))
        );
        assert_eq!(
            classify("/start@"),
            Some(Intent::Search("/start@".to_string()))
        );
        assert_eq!(classify("/startx"), Some(Intent::Search("/startx".to_string())));
        assert!(matches!(
            classify("/start@x | b | c | 1 | p"),
            Some(Intent::AddClass(n)) if n.name == "/start@x" && !n.is_primary
        ));
    }

    #[test]
    fn other_separator_counts_are_search_text() {
        assert_eq!(
            classify("a | b | c"),
            Some(Intent::Search("a | b | c".to_string()))
        );
        assert_eq!(
            classify("a|b|c|1|x|y"),
            Some(Intent::Search("a|b|c|1|x|y".to_string()))
        );
    }

    #[test]
    fn fields_are_trimmed() {
        let n = parse_new_class("  Data Mining\t|  Dr. K |\nhttps://x.y  | 4021 | other").unwrap();
        assert_eq!(n.name, "Data Mining");
        assert_eq!(n.instructor, "Dr. K");
        assert_eq!(n.link, "https://x.y");
        assert_eq!(n.semester, "4021");
    }

    #[test]
    fn blank_text_is_ignored() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \n\t "), None);
    }

    #[test]
    fn search_term_is_trimmed() {
        assert_eq!(
            classify("  سیستم‌عامل  "),
            Some(Intent::Search("سیستم‌عامل".to_string()))
        );
    }

    #[test]
    fn garbled_search_term_is_rejected() {
        assert_eq!(
            classify("alg\u{FFFD}rithms"),
            Some(Intent::Rejected(InputError::InvalidSearchTerm))
        );
        assert_eq!(
            classify("alg\u{0007}"),
            Some(Intent::Rejected(InputError::InvalidSearchTerm))
        );
    }
}
