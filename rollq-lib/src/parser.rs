use pest::iterators::Pair;
use pest::Parser as _;
use pest_derive::Parser;

/// Pest parser
#[derive(Parser)]
#[grammar = "rollq.pest"]
pub struct Parser;

/// Raw captures of one term in a roll query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch<'a> {
    /// `+` or `-` when written
    pub sign: Option<&'a str>,
    /// Digits before `d`, possibly empty, or `None` for a constant
    pub count: Option<&'a str>,
    /// Faces of the dice, or the value of a constant
    pub sides: &'a str,
}

impl TermMatch<'_> {
    pub fn is_constant(&self) -> bool {
        self.count.is_none()
    }

    pub fn is_negative(&self) -> bool {
        self.sign == Some("-")
    }
}

impl Parser {
    /// Check that the whole text is a roll query
    pub fn is_query(text: &str) -> bool {
        Self::parse(Rule::query, text).is_ok()
    }

    /// Split a roll query in its terms, or `None` when the text is not a roll query
    pub fn terms(text: &str) -> Option<Vec<TermMatch<'_>>> {
        let query = match Self::parse(Rule::query, text) {
            Ok(mut pairs) => pairs.next()?,
            Err(error) => {
                tracing::debug!(%error, "rejected roll query");
                return None;
            }
        };
        Some(
            query
                .into_inner()
                .filter(|pair| pair.as_rule() == Rule::term)
                .map(Self::extract_term)
                .collect(),
        )
    }

    fn extract_term(term: Pair<'_, Rule>) -> TermMatch<'_> {
        let mut found = TermMatch {
            sign: None,
            count: None,
            sides: "",
        };
        for inner in term.into_inner() {
            match inner.as_rule() {
                Rule::sign => found.sign = Some(inner.as_str()),
                Rule::sides => found.sides = inner.as_str(),
                Rule::dice => {
                    for part in inner.into_inner() {
                        match part.as_rule() {
                            Rule::count => found.count = Some(part.as_str()),
                            Rule::sides => found.sides = part.as_str(),
                            _ => unreachable!("{:?}", part),
                        }
                    }
                }
                _ => unreachable!("{:?}", inner),
            }
        }
        found
    }
}
