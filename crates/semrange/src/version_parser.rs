//! Version and range grammars
//!
//! Each grammar scans the whole input into tokens first and then folds the
//! tokens into a value. Nothing is kept between calls.

use std::mem;

use crate::error::{ErrorKind, ParseError};
use crate::lexer::{Lexer, Token, TokenKind, DIGITS, TAG_CHARS, WHITESPACE, WILDCARDS};
use crate::range::{PartialVersion, Prefix, Range, Set};
use crate::Version;

/// Parser for versions and ranges.
///
/// The default parser tolerates leading whitespace and a `v`/`V` prefix on
/// versions, and a `v`/`V` prefix on each version inside a range. The strict
/// parser accepts canonical text only.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser {
    strict: bool,
}

impl VersionParser {
    /// Create a lenient parser
    pub fn new() -> Self {
        VersionParser { strict: false }
    }

    /// Create a parser that rejects leading whitespace and the `v` prefix
    pub fn strict() -> Self {
        VersionParser { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Check if a version string is valid
    pub fn is_valid(&self, version: &str) -> bool {
        self.parse_version(version).is_ok()
    }

    /// Parse `major.minor.patch[-prerelease][+build]`
    pub fn parse_version(&self, text: &str) -> Result<Version, ParseError> {
        let mut lexer = Lexer::new(text);
        lex_version(&mut lexer, self.strict)?;

        let mut numbers = [0u64; 3];
        let mut prerelease = Vec::new();
        let mut build = Vec::new();

        for token in lexer.finish() {
            match token.kind {
                TokenKind::Major => numbers[0] = parse_number(&token)?,
                TokenKind::Minor => numbers[1] = parse_number(&token)?,
                TokenKind::Patch => numbers[2] = parse_number(&token)?,
                TokenKind::Prerelease => prerelease.push(token.text.to_string()),
                TokenKind::Build => build.push(token.text.to_string()),
                _ => {}
            }
        }

        let [major, minor, patch] = numbers;
        Ok(Version::new(major, minor, patch)
            .with_prerelease(prerelease)
            .with_build(build))
    }

    /// Parse a range expression into its expanded comparator sets
    pub fn parse_range(&self, text: &str) -> Result<Range, ParseError> {
        let mut lexer = Lexer::new(text);
        lex_range(&mut lexer, self.strict)?;

        let mut tokens = lexer.finish().into_iter().peekable();
        let mut sets = Vec::new();
        let mut set = Vec::new();
        let mut prefix = Prefix::default();
        let mut partial = PartialVersion::default();
        let mut hyphen_from: Option<PartialVersion> = None;

        while let Some(token) = tokens.next() {
            match token.kind {
                TokenKind::Whitespace | TokenKind::Period | TokenKind::Dash => {}
                TokenKind::Operator(p) => prefix = p,
                TokenKind::Major => partial.major = parse_component(&token)?,
                TokenKind::Minor => partial.minor = parse_component(&token)?,
                TokenKind::Patch => partial.patch = parse_component(&token)?,
                TokenKind::Prerelease => partial.prerelease.push(token.text.to_string()),
                TokenKind::Build => partial.build.push(token.text.to_string()),
                TokenKind::Complete => {
                    let completed = mem::take(&mut partial);

                    if let Some(from) = hyphen_from.take() {
                        set.extend(PartialVersion::expand_hyphen(from, completed));
                    } else {
                        while tokens.next_if(|t| t.kind == TokenKind::Whitespace).is_some() {}

                        if tokens.next_if(|t| t.kind == TokenKind::Dash).is_some() {
                            hyphen_from = Some(completed);
                        } else {
                            set.extend(completed.expand(prefix));
                        }
                    }

                    prefix = Prefix::default();
                }
                TokenKind::Pipe => sets.push(Set::new(mem::take(&mut set))),
            }
        }

        sets.push(Set::new(set));
        Ok(Range::new(sets))
    }
}

fn parse_number(token: &Token<'_>) -> Result<u64, ParseError> {
    token
        .text
        .parse()
        .map_err(|e| ParseError::new(token.offset, ErrorKind::InvalidNumber(e)))
}

/// A wildcard leaves the component unspecified
fn parse_component(token: &Token<'_>) -> Result<Option<u64>, ParseError> {
    if token.text.len() == 1 && WILDCARDS.contains(token.text) {
        return Ok(None);
    }
    parse_number(token).map(Some)
}

fn skip_whitespace(lexer: &mut Lexer<'_>) {
    if lexer.accept_run(WHITESPACE) > 0 {
        lexer.ignore();
    }
}

fn emit_whitespace(lexer: &mut Lexer<'_>) {
    if lexer.accept_run(WHITESPACE) > 0 {
        lexer.emit(TokenKind::Whitespace);
    }
}

fn lex_version(lexer: &mut Lexer<'_>, strict: bool) -> Result<(), ParseError> {
    if !strict {
        skip_whitespace(lexer);
        if lexer.accept_one("vV") {
            lexer.ignore();
        }
        skip_whitespace(lexer);
    }

    if lexer.accept_run(DIGITS) == 0 {
        return lexer.fail(ErrorKind::InvalidMajor);
    }
    lexer.emit(TokenKind::Major);

    if !lexer.accept_one(".") {
        return lexer.fail(if lexer.is_eof() {
            ErrorKind::MissingMinor
        } else {
            ErrorKind::MissingMajorSeparator
        });
    }
    lexer.ignore();

    if lexer.accept_run(DIGITS) == 0 {
        return lexer.fail(ErrorKind::InvalidMinor);
    }
    lexer.emit(TokenKind::Minor);

    if !lexer.accept_one(".") {
        return lexer.fail(if lexer.is_eof() {
            ErrorKind::MissingPatch
        } else {
            ErrorKind::MissingMinorSeparator
        });
    }
    lexer.ignore();

    if lexer.accept_run(DIGITS) == 0 {
        return lexer.fail(ErrorKind::InvalidPatch);
    }
    lexer.emit(TokenKind::Patch);

    if lexer.accept_one("-") {
        lexer.ignore();
        lex_identifiers(lexer, TokenKind::Prerelease, ErrorKind::InvalidPrerelease)?;
    }

    if lexer.accept_one("+") {
        lexer.ignore();
        lex_identifiers(lexer, TokenKind::Build, ErrorKind::InvalidBuild)?;
    }

    if !lexer.is_eof() {
        return lexer.fail(ErrorKind::TrailingJunk);
    }

    Ok(())
}

/// Dot-separated identifiers after `-` or `+`
fn lex_identifiers(lexer: &mut Lexer<'_>, kind: TokenKind, error: ErrorKind) -> Result<(), ParseError> {
    loop {
        if lexer.accept_run(TAG_CHARS) == 0 {
            return lexer.fail(error);
        }
        lexer.emit(kind);

        if !lexer.accept_one(".") {
            return Ok(());
        }
        lexer.ignore();
    }
}

fn lex_range(lexer: &mut Lexer<'_>, strict: bool) -> Result<(), ParseError> {
    loop {
        emit_whitespace(lexer);

        if lexer.is_eof() {
            return Ok(());
        }

        for (symbol, prefix) in Prefix::symbols() {
            if lexer.accept_literal(symbol) {
                lexer.emit(TokenKind::Operator(*prefix));
                break;
            }
        }

        emit_whitespace(lexer);
        lex_partial_version(lexer, strict)?;
        expect_term_end(lexer)?;
        emit_whitespace(lexer);

        if lexer.accept_one("-") {
            lexer.emit(TokenKind::Dash);
            emit_whitespace(lexer);
            lex_partial_version(lexer, strict)?;
            expect_term_end(lexer)?;
        }

        emit_whitespace(lexer);

        if lexer.accept_literal("||") {
            lexer.emit(TokenKind::Pipe);
        }
    }
}

/// A term is followed by whitespace, a hyphen, `||` or the end of input
fn expect_term_end(lexer: &Lexer<'_>) -> Result<(), ParseError> {
    match lexer.peek() {
        Some(b) if !WHITESPACE.as_bytes().contains(&b) && b != b'-' && b != b'|' => {
            lexer.fail(ErrorKind::TrailingJunk)
        }
        _ => Ok(()),
    }
}

fn lex_partial_version(lexer: &mut Lexer<'_>, strict: bool) -> Result<(), ParseError> {
    if !strict && lexer.accept_one("vV") {
        lexer.ignore();
    }

    let components = [
        (TokenKind::Major, ErrorKind::InvalidMajor),
        (TokenKind::Minor, ErrorKind::InvalidMinor),
        (TokenKind::Patch, ErrorKind::InvalidPatch),
    ];

    for (index, (kind, error)) in components.iter().enumerate() {
        if index > 0 {
            if !lexer.accept_one(".") {
                lexer.emit(TokenKind::Complete);
                return Ok(());
            }
            lexer.emit(TokenKind::Period);
        }

        if lexer.accept_one(WILDCARDS) {
            lexer.emit(*kind);
            return lex_wildcard_tail(lexer, &components[index + 1..]);
        }

        if lexer.accept_run(DIGITS) == 0 {
            return lexer.fail(error.clone());
        }
        lexer.emit(*kind);
    }

    if lexer.accept_one("-") {
        lexer.ignore();
        if lex_qualifier(lexer, TokenKind::Prerelease, ErrorKind::InvalidPrerelease)? {
            return Ok(());
        }
    }

    if lexer.accept_one("+") {
        lexer.ignore();
        if lex_qualifier(lexer, TokenKind::Build, ErrorKind::InvalidBuild)? {
            return Ok(());
        }
    }

    lexer.emit(TokenKind::Complete);
    Ok(())
}

/// Components after a wildcard are accepted but carry no meaning
fn lex_wildcard_tail(lexer: &mut Lexer<'_>, rest: &[(TokenKind, ErrorKind)]) -> Result<(), ParseError> {
    for (_, error) in rest {
        if !lexer.accept_one(".") {
            break;
        }
        if !lexer.accept_one(WILDCARDS) && lexer.accept_run(DIGITS) == 0 {
            return lexer.fail(error.clone());
        }
        lexer.ignore();
    }

    lexer.emit(TokenKind::Complete);
    Ok(())
}

/// Prerelease or build identifiers inside a range. Returns true when a `*`
/// ended the partial version early.
fn lex_qualifier(lexer: &mut Lexer<'_>, kind: TokenKind, error: ErrorKind) -> Result<bool, ParseError> {
    loop {
        if lexer.accept_one("*") {
            lexer.emit(TokenKind::Complete);
            return Ok(true);
        }

        if lexer.accept_run(TAG_CHARS) == 0 {
            return lexer.fail(error);
        }
        lexer.emit(kind);

        if !lexer.accept_one(".") {
            return Ok(false);
        }
        lexer.emit(TokenKind::Period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(text);
        lex_range(&mut lexer, false).unwrap();
        lexer.finish().into_iter().map(|t| t.kind).collect()
    }

    fn version_error(text: &str) -> ErrorKind {
        VersionParser::new().parse_version(text).unwrap_err().kind().clone()
    }

    fn range_error(text: &str) -> ErrorKind {
        VersionParser::new().parse_range(text).unwrap_err().kind().clone()
    }

    #[test]
    fn test_parse_version() {
        let v = VersionParser::new().parse_version("1.2.3-a.b+x.y.z").unwrap();
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 2);
        assert_eq!(v.patch(), 3);
        assert_eq!(v.prerelease(), ["a", "b"]);
        assert_eq!(v.build(), ["x", "y", "z"]);
    }

    #[test]
    fn test_parse_version_identifiers() {
        let parser = VersionParser::new();
        assert_eq!(parser.parse_version("1.0.0-alpha-1").unwrap().prerelease(), ["alpha-1"]);
        assert_eq!(parser.parse_version("1.0.0+build").unwrap().prerelease().len(), 0);
        assert_eq!(parser.parse_version("1.0.0-x.7.z.92").unwrap().prerelease().len(), 4);
        assert_eq!(parser.parse_version("1.0.0-0.3.7").unwrap().to_string(), "1.0.0-0.3.7");
    }

    #[test]
    fn test_lenient_prefixes() {
        let parser = VersionParser::new();
        assert_eq!(parser.parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parser.parse_version("V1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parser.parse_version("  v 1.2.3").unwrap(), Version::new(1, 2, 3));
        assert!(parser.is_valid("\t1.2.3"));
        assert!(!parser.is_strict());
    }

    #[test]
    fn test_strict_rejects_prefixes() {
        let parser = VersionParser::strict();
        assert!(parser.is_strict());
        assert!(parser.is_valid("1.2.3"));

        let err = parser.parse_version("v1.2.3").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidMajor);
        assert_eq!(err.offset(), 0);

        assert!(!parser.is_valid(" 1.2.3"));
        assert!(parser.parse_range("v1.2.3").is_err());
        assert!(parser.parse_range(">= 1.2.3").is_ok());
    }

    #[test]
    fn test_version_errors() {
        assert_eq!(version_error(""), ErrorKind::InvalidMajor);
        assert_eq!(version_error("a.b.c"), ErrorKind::InvalidMajor);
        assert_eq!(version_error("1"), ErrorKind::MissingMinor);
        assert_eq!(version_error("1-2.3"), ErrorKind::MissingMajorSeparator);
        assert_eq!(version_error("1."), ErrorKind::InvalidMinor);
        assert_eq!(version_error("1.2"), ErrorKind::MissingPatch);
        assert_eq!(version_error("1.2-3"), ErrorKind::MissingMinorSeparator);
        assert_eq!(version_error("1.2."), ErrorKind::InvalidPatch);
        assert_eq!(version_error("1.2.3-"), ErrorKind::InvalidPrerelease);
        assert_eq!(version_error("1.2.3-a..b"), ErrorKind::InvalidPrerelease);
        assert_eq!(version_error("1.2.3+"), ErrorKind::InvalidBuild);
        assert_eq!(version_error("1.2.3-a+b."), ErrorKind::InvalidBuild);
        assert_eq!(version_error("1.2.3.4"), ErrorKind::TrailingJunk);
        assert_eq!(version_error("1.2.3 "), ErrorKind::TrailingJunk);
        assert_eq!(version_error("1.2.3-béta"), ErrorKind::TrailingJunk);
    }

    #[test]
    fn test_version_error_offsets() {
        let parser = VersionParser::new();
        assert_eq!(parser.parse_version("1.2.3.4").unwrap_err().offset(), 5);
        assert_eq!(parser.parse_version("1.2").unwrap_err().offset(), 3);
        assert_eq!(parser.parse_version("v1.x.3").unwrap_err().offset(), 3);
    }

    #[test]
    fn test_number_overflow() {
        let err = VersionParser::new()
            .parse_version("1.99999999999999999999999.0")
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidNumber(_)));
        assert_eq!(err.offset(), 2);

        let max = format!("{}.0.0", u64::MAX);
        assert_eq!(VersionParser::new().parse_version(&max).unwrap().major(), u64::MAX);

        assert!(matches!(range_error("^99999999999999999999999"), ErrorKind::InvalidNumber(_)));
    }

    #[test]
    fn test_range_tokens() {
        use TokenKind::*;

        assert_eq!(kinds("1.2.3"), vec![Major, Period, Minor, Period, Patch, Complete]);
        assert_eq!(kinds("*"), vec![Major, Complete]);
        assert_eq!(
            kinds(" 1 - 2 "),
            vec![Whitespace, Major, Complete, Whitespace, Dash, Whitespace, Major, Complete, Whitespace]
        );
        assert_eq!(
            kinds("1||2"),
            vec![Major, Complete, Pipe, Major, Complete]
        );
        assert_eq!(
            kinds("1.2.3-rc.*"),
            vec![Major, Period, Minor, Period, Patch, Prerelease, Period, Complete]
        );

        let tokens = kinds(">=1");
        assert_eq!(tokens[0], Operator(Prefix::Plain(crate::Operator::GreaterThanOrEqual)));
    }

    #[test]
    fn test_parse_range_expansions() {
        let parser = VersionParser::new();
        let render = |text: &str| parser.parse_range(text).unwrap().to_string();

        assert_eq!(render("1.2.3"), "1.2.3");
        assert_eq!(render("=1.2.3"), "=1.2.3");
        assert_eq!(render("1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(render("1"), ">=1.0.0 <2.0.0");
        assert_eq!(render("1.x"), ">=1.0.0 <2.0.0");
        assert_eq!(render("1.2.*"), ">=1.2.0 <1.3.0");
        assert_eq!(render("x.x.x"), ">=0.0.0-0");
        assert_eq!(render("1.x.3"), ">=1.0.0 <2.0.0");
        assert_eq!(render("~1.2"), ">=1.2.0 <1.3.0");
        assert_eq!(render("~1"), ">=1.0.0 <2.0.0");
        assert_eq!(render("^0.1.2"), ">=0.1.2 <0.2.0");
        assert_eq!(render("^0"), ">=0.0.0 <0.0.1");
        assert_eq!(render("^0.0"), ">=0.0.0 <0.0.1");
        assert_eq!(render("^0.x"), ">=0.0.0 <0.0.1");
        assert_eq!(render("^ 1.2"), ">=1.2.0 <2.0.0");
        assert_eq!(render(">1.2"), ">=1.3.0");
        assert_eq!(render("<= 1.2"), "<1.3.0");
        assert_eq!(render(">=v1.2.3"), ">=1.2.3");
        assert_eq!(render("1.2.3-beta.2+sha"), "1.2.3-beta.2+sha");
        assert_eq!(render("1.2.3 - 2.3"), ">=1.2.3 <2.4.0");
        assert_eq!(render("1.2 - 2.3.4"), ">=1.2.0 <=2.3.4");
        assert_eq!(render("1.0.0 - *"), ">=1.0.0 >=0.0.0-0");
        assert_eq!(render("~1.2.1 >=1.2.3"), ">=1.2.1 <1.3.0 >=1.2.3");
        assert_eq!(render(">1.0.0 <3.0.0 || >=4.0.0"), ">1.0.0 <3.0.0 || >=4.0.0");
        assert_eq!(render("1.0.0 ||"), "1.0.0 || ");
        assert_eq!(render("   "), "");
    }

    #[test]
    fn test_hyphen_overrides_written_operator() {
        let range = VersionParser::new().parse_range("<1.0.0 - 2.0.0").unwrap();
        assert_eq!(range.to_string(), ">=1.0.0 <=2.0.0");
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(range_error(">="), ErrorKind::InvalidMajor);
        assert_eq!(range_error("|| 1.0.0"), ErrorKind::InvalidMajor);
        assert_eq!(range_error("1.0.0 -"), ErrorKind::InvalidMajor);
        assert_eq!(range_error("1."), ErrorKind::InvalidMinor);
        assert_eq!(range_error("1.2."), ErrorKind::InvalidPatch);
        assert_eq!(range_error("*.a"), ErrorKind::InvalidMinor);
        assert_eq!(range_error("1.2.3-"), ErrorKind::InvalidPrerelease);
        assert_eq!(range_error("1.2.3+!"), ErrorKind::InvalidBuild);
        assert_eq!(range_error("1.0.0, 2.0.0"), ErrorKind::TrailingJunk);

        let err = VersionParser::new().parse_range("1.0.0 || foo").unwrap_err();
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn test_terms_need_a_separator() {
        let parser = VersionParser::new();
        for (text, offset) in [("1.2.3x", 5), ("1x", 1), ("1.2.3v1.0.0", 5), (">=1.0.0<2.0.0", 7), ("1 - 2x", 5)] {
            let err = parser.parse_range(text).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::TrailingJunk, "{}", text);
            assert_eq!(err.offset(), offset, "{}", text);
        }

        assert!(parser.parse_range("1.2.3 v1.0.0").is_ok());
        assert!(parser.parse_range("1.2-2").is_ok());
        assert!(parser.parse_range("1||2").is_ok());
        assert!(parser.parse_range("1.2.3-rc.*").is_ok());
    }
}
