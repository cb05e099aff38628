//! SQL keyword model used by the lenient tokenizer.
//!
//! Only clause-boundary keywords (and the handful of words that combine with
//! them, like `BY` and `INTO`) are classified. Everything else, including
//! `AND`, `NOT` or type names, stays an identifier so that the table and
//! alias scanners can treat any keyword as a hard stop.
//!
//! Keywords are matched case-insensitively via `from_upper`, which expects an
//! already upper-cased word. `as_str` returns the canonical upper-case form.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Group,
    Order,
    By,
    Having,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Outer,
    Natural,
    On,
    Using,
    Limit,
    Offset,
    Union,
    Intersect,
    Except,
    Insert,
    Into,
    Update,
    Delete,
    Set,
    Values,
    As,
    With,
}

impl Keyword {
    /// Modifiers that only ever appear in front of `JOIN`.
    pub const JOIN_MODIFIERS: [Self; 7] = [
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Cross,
        Keyword::Outer,
        Keyword::Natural,
    ];

    pub const ALL: [Self; 30] = [
        Keyword::Select,
        Keyword::From,
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::By,
        Keyword::Having,
        Keyword::Join,
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Cross,
        Keyword::Outer,
        Keyword::Natural,
        Keyword::On,
        Keyword::Using,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Intersect,
        Keyword::Except,
        Keyword::Insert,
        Keyword::Into,
        Keyword::Update,
        Keyword::Delete,
        Keyword::Set,
        Keyword::Values,
        Keyword::As,
        Keyword::With,
    ];

    /// Attempt to classify an *upper-cased* word into a `Keyword`.
    ///
    /// NOTE: The caller is responsible for upper-casing the input.
    pub fn from_upper(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "SELECT" => Select,
            "FROM" => From,
            "WHERE" => Where,
            "GROUP" => Group,
            "ORDER" => Order,
            "BY" => By,
            "HAVING" => Having,
            "JOIN" => Join,
            "INNER" => Inner,
            "LEFT" => Left,
            "RIGHT" => Right,
            "FULL" => Full,
            "CROSS" => Cross,
            "OUTER" => Outer,
            "NATURAL" => Natural,
            "ON" => On,
            "USING" => Using,
            "LIMIT" => Limit,
            "OFFSET" => Offset,
            "UNION" => Union,
            "INTERSECT" => Intersect,
            "EXCEPT" => Except,
            "INSERT" => Insert,
            "INTO" => Into,
            "UPDATE" => Update,
            "DELETE" => Delete,
            "SET" => Set,
            "VALUES" => Values,
            "AS" => As,
            "WITH" => With,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical upper-case string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "SELECT",
            From => "FROM",
            Where => "WHERE",
            Group => "GROUP",
            Order => "ORDER",
            By => "BY",
            Having => "HAVING",
            Join => "JOIN",
            Inner => "INNER",
            Left => "LEFT",
            Right => "RIGHT",
            Full => "FULL",
            Cross => "CROSS",
            Outer => "OUTER",
            Natural => "NATURAL",
            On => "ON",
            Using => "USING",
            Limit => "LIMIT",
            Offset => "OFFSET",
            Union => "UNION",
            Intersect => "INTERSECT",
            Except => "EXCEPT",
            Insert => "INSERT",
            Into => "INTO",
            Update => "UPDATE",
            Delete => "DELETE",
            Set => "SET",
            Values => "VALUES",
            As => "AS",
            With => "WITH",
        }
    }

    /// True for `JOIN` itself and every modifier that can precede it.
    pub fn is_join_like(self) -> bool {
        self == Keyword::Join || Self::JOIN_MODIFIERS.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_keywords() {
        for w in [
            "SELECT", "FROM", "WHERE", "GROUP", "ORDER", "BY", "HAVING", "JOIN", "LEFT", "INSERT",
            "INTO", "UPDATE", "DELETE", "SET", "VALUES", "AS", "ON",
        ] {
            assert!(Keyword::from_upper(w).is_some(), "{w} should be recognized");
        }
    }

    #[test]
    fn rejects_unknown_words() {
        for w in ["FOO", "AND", "NOT", "COUNT", "select", "users"] {
            assert!(
                Keyword::from_upper(w).is_none(),
                "{w} should NOT be recognized"
            );
        }
    }

    #[test]
    fn round_trips_through_as_str() {
        for w in ["SELECT", "NATURAL", "INTERSECT", "WITH"] {
            let kw = Keyword::from_upper(w).expect("known keyword");
            assert_eq!(kw.as_str(), w);
            assert_eq!(kw.to_string(), w);
        }
    }

    #[test]
    fn join_like_covers_modifiers() {
        assert!(Keyword::Join.is_join_like());
        assert!(Keyword::Left.is_join_like());
        assert!(Keyword::Natural.is_join_like());
        assert!(!Keyword::From.is_join_like());
        assert!(!Keyword::On.is_join_like());
    }

    #[test]
    fn all_keywords_classify_back() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::from_upper(kw.as_str()), Some(kw));
        }
    }
}
