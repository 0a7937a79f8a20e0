//! Transition symbols.

/// The symbol an edge is labeled with.
///
/// Edges carry their label as a string; an empty label is an epsilon (λ)
/// transition and a single character consumes that character. Longer labels
/// do not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Epsilon,
    Char(char),
}

impl Symbol {
    /// Parse an edge label. Returns `None` for labels longer than one char.
    pub fn parse(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Some(Symbol::Epsilon),
            (Some(c), None) => Some(Symbol::Char(c)),
            (Some(_), Some(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Symbol::parse(""), Some(Symbol::Epsilon));
        assert_eq!(Symbol::parse("a"), Some(Symbol::Char('a')));
        assert_eq!(Symbol::parse("λ"), Some(Symbol::Char('λ')));
        assert_eq!(Symbol::parse("ab"), None);
    }
}
