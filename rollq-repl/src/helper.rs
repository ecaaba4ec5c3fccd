use colored::Colorize;
use rollq_lib::RollQuery;
use rustyline::completion::Completer;
use rustyline::completion::Pair;
use rustyline::highlight::Highlighter;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::Hinter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::Context;
use rustyline::Result;
use rustyline_derive::Helper;
use std::borrow::Cow;
use std::borrow::Cow::Borrowed;
use std::borrow::Cow::Owned;

const KEYWORDS: [&str; 7] = ["adv", "dis", "multi", "hits", "net", "bounds", "last"];

#[derive(Helper)]
pub(crate) struct ReplHelper {
    pub(crate) highlighter: MatchingBracketHighlighter,
    pub(crate) hinter: HistoryHinter,
    pub(crate) colored: String,
}

/// Bounds of the line when it is a plain roll query
fn bounds_hint(line: &str) -> Option<String> {
    RollQuery::parse(line.trim()).map(|query| format!("  [{}..{}]", query.min(), query.max()))
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>)> {
        let word = &line[..pos];
        if word.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let candidates = KEYWORDS
            .iter()
            .chain(std::iter::once(&"help"))
            .filter(|keyword| keyword.starts_with(word))
            .map(|keyword| Pair {
                display: keyword.to_string(),
                replacement: format!("{keyword} "),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter
            .hint(line, pos, ctx)
            .or_else(|| (pos == line.len()).then(|| bounds_hint(line)).flatten())
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

impl Validator for ReplHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }

    fn validate_while_typing(&self) -> bool {
        false
    }
}
