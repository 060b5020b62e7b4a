//! C lexer producing the parser's token stream.
//!
//! The lexer is tolerant where the parser can recover (stray bytes
//! become `Unknown` tokens) and fails only where no token stream can be
//! formed at all (unterminated block comment or literal). Identifier
//! and literal spellings are interned; tokens carry handles, never
//! text.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::tokens::{InternId, Token, TokenKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated string literal starting at byte {0}")]
    UnterminatedString(usize),
    #[error("unterminated character constant starting at byte {0}")]
    UnterminatedCharacter(usize),
}

/// Interned identifier/lexeme storage.
#[derive(Debug, Default)]
pub struct Interner {
    map: FxHashMap<String, InternId>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Interner {
        Interner::default()
    }

    pub fn intern(&mut self, text: &str) -> InternId {
        if let Some(&id) = self.map.get(text) {
            return id;
        }
        let id = InternId(self.strings.len() as u32);
        self.strings.push(text.to_string());
        self.map.insert(text.to_string(), id);
        id
    }

    pub fn text(&self, id: InternId) -> &str {
        &self.strings[id.0 as usize]
    }
}

/// Lex `input` to a token stream ending in `Eof`.
pub fn lex(input: &str) -> Result<(Vec<Token>, Interner), LexError> {
    let mut lexer = Lexer::new(input);
    let tokens = lexer.run()?;
    Ok((tokens, lexer.interner))
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    interner: Interner,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Lexer<'a> {
        Lexer { input: input.as_bytes(), pos: 0, interner: Interner::new() }
    }

    fn run(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        if self.pos >= self.input.len() {
            return Ok(Token::punct(TokenKind::Eof));
        }

        let ch = self.input[self.pos];

        if ch.is_ascii_digit()
            || (ch == b'.' && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()))
        {
            return Ok(self.lex_number());
        }

        if ch == b'"' {
            return self.lex_string(TokenKind::StringLiteral);
        }

        if ch == b'\'' {
            return self.lex_char(TokenKind::CharacterConstant);
        }

        if ch == b'_' || ch.is_ascii_alphabetic() {
            // Encoding prefixes bind tighter than identifiers.
            if let Some(tok) = self.try_lex_prefixed_literal()? {
                return Ok(tok);
            }
            return Ok(self.lex_identifier_or_keyword());
        }

        Ok(self.lex_punctuator())
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos + 1 < self.input.len()
                && self.input[self.pos] == b'/'
                && self.input[self.pos + 1] == b'/'
            {
                while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            if self.pos + 1 < self.input.len()
                && self.input[self.pos] == b'/'
                && self.input[self.pos + 1] == b'*'
            {
                let start = self.pos;
                self.pos += 2;
                loop {
                    if self.pos + 1 >= self.input.len() {
                        return Err(LexError::UnterminatedComment(start));
                    }
                    if self.input[self.pos] == b'*' && self.input[self.pos + 1] == b'/' {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }
            return Ok(());
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// `L"..."`, `u8"..."`, `u"..."`, `U"..."`, `L'...'`, `u'...'`,
    /// `U'...'`.
    fn try_lex_prefixed_literal(&mut self) -> Result<Option<Token>, LexError> {
        let (len, string_kind, char_kind) = match self.input[self.pos] {
            b'L' => (1, TokenKind::StringLiteralL, Some(TokenKind::CharacterConstantL)),
            b'U' => (1, TokenKind::StringLiteralU32, Some(TokenKind::CharacterConstantU32)),
            b'u' => {
                if self.peek_at(1) == Some(b'8') && self.peek_at(2) == Some(b'"') {
                    (2, TokenKind::StringLiteralU8, None)
                } else {
                    (1, TokenKind::StringLiteralU16, Some(TokenKind::CharacterConstantU16))
                }
            }
            _ => return Ok(None),
        };
        match self.peek_at(len) {
            Some(b'"') => {
                self.pos += len;
                Ok(Some(self.lex_string(string_kind)?))
            }
            Some(b'\'') if char_kind.is_some() => {
                self.pos += len;
                Ok(Some(self.lex_char(char_kind.unwrap())?))
            }
            _ => Ok(None),
        }
    }

    fn lex_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.input.len()
            && (self.input[self.pos] == b'_' || self.input[self.pos].is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("");
        if let Some(kind) = keyword_kind(text) {
            return Token::punct(kind);
        }
        let id = self.interner.intern(text);
        Token { kind: TokenKind::Identifier, ident: Some(id), lexeme: None }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        let mut is_float = false;

        if self.input[self.pos] == b'0'
            && matches!(self.peek_at(1), Some(b'x') | Some(b'X'))
        {
            self.pos += 2;
            while self.pos < self.input.len()
                && (self.input[self.pos].is_ascii_hexdigit() || self.input[self.pos] == b'.')
            {
                if self.input[self.pos] == b'.' {
                    is_float = true;
                }
                self.pos += 1;
            }
            // Binary exponent of a hex float.
            if matches!(self.peek_at(0), Some(b'p') | Some(b'P')) {
                is_float = true;
                self.pos += 1;
                if matches!(self.peek_at(0), Some(b'+') | Some(b'-')) {
                    self.pos += 1;
                }
                while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
            }
        } else {
            while self.pos < self.input.len()
                && (self.input[self.pos].is_ascii_digit() || self.input[self.pos] == b'.')
            {
                if self.input[self.pos] == b'.' {
                    is_float = true;
                }
                self.pos += 1;
            }
            if matches!(self.peek_at(0), Some(b'e') | Some(b'E')) {
                let next = self.peek_at(1);
                if next.is_some_and(|c| c.is_ascii_digit())
                    || (matches!(next, Some(b'+') | Some(b'-'))
                        && self.peek_at(2).is_some_and(|c| c.is_ascii_digit()))
                {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.peek_at(0), Some(b'+') | Some(b'-')) {
                        self.pos += 1;
                    }
                    while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
                        self.pos += 1;
                    }
                }
            }
        }

        // Suffixes: integer (u/l combinations) or floating (f/l).
        while self.pos < self.input.len()
            && matches!(self.input[self.pos], b'u' | b'U' | b'l' | b'L' | b'f' | b'F')
        {
            if matches!(self.input[self.pos], b'f' | b'F') {
                is_float = true;
            }
            self.pos += 1;
        }

        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("");
        let id = self.interner.intern(text);
        let kind = if is_float { TokenKind::FloatingConstant } else { TokenKind::IntegerConstant };
        Token { kind, ident: None, lexeme: Some(id) }
    }

    fn lex_string(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let content_start = self.pos;
        loop {
            match self.peek_at(0) {
                None | Some(b'\n') => return Err(LexError::UnterminatedString(start)),
                Some(b'\\') => self.pos += 2,
                Some(b'"') => break,
                Some(_) => self.pos += 1,
            }
        }
        let text = std::str::from_utf8(&self.input[content_start..self.pos]).unwrap_or("");
        let id = self.interner.intern(text);
        self.pos += 1; // closing quote
        Ok(Token { kind, ident: None, lexeme: Some(id) })
    }

    fn lex_char(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let content_start = self.pos;
        loop {
            match self.peek_at(0) {
                None | Some(b'\n') => return Err(LexError::UnterminatedCharacter(start)),
                Some(b'\\') => self.pos += 2,
                Some(b'\'') => break,
                Some(_) => self.pos += 1,
            }
        }
        let text = std::str::from_utf8(&self.input[content_start..self.pos]).unwrap_or("");
        let id = self.interner.intern(text);
        self.pos += 1; // closing quote
        Ok(Token { kind, ident: None, lexeme: Some(id) })
    }

    fn lex_punctuator(&mut self) -> Token {
        use TokenKind::*;
        let rest = &self.input[self.pos..];
        // Maximal munch: longest punctuators first.
        let table: &[(&[u8], TokenKind)] = &[
            (b"...", Ellipsis),
            (b"<<=", LessLessEquals),
            (b">>=", GreaterGreaterEquals),
            (b"->", Arrow),
            (b"++", PlusPlus),
            (b"--", MinusMinus),
            (b"<<", LessLess),
            (b">>", GreaterGreater),
            (b"<=", LessEquals),
            (b">=", GreaterEquals),
            (b"==", EqualsEquals),
            (b"!=", ExclamationEquals),
            (b"&&", AmpersandAmpersand),
            (b"||", BarBar),
            (b"+=", PlusEquals),
            (b"-=", MinusEquals),
            (b"*=", AsteriskEquals),
            (b"/=", SlashEquals),
            (b"%=", PercentEquals),
            (b"&=", AmpersandEquals),
            (b"|=", BarEquals),
            (b"^=", CaretEquals),
            (b"(", OpenParen),
            (b")", CloseParen),
            (b"[", OpenBracket),
            (b"]", CloseBracket),
            (b"{", OpenBrace),
            (b"}", CloseBrace),
            (b",", Comma),
            (b";", Semicolon),
            (b":", Colon),
            (b"?", Question),
            (b".", Dot),
            (b"+", Plus),
            (b"-", Minus),
            (b"*", Asterisk),
            (b"/", Slash),
            (b"%", Percent),
            (b"&", Ampersand),
            (b"|", Bar),
            (b"^", Caret),
            (b"~", Tilde),
            (b"!", Exclamation),
            (b"<", Less),
            (b">", Greater),
            (b"=", Equals),
        ];
        for (spelling, kind) in table {
            if rest.starts_with(spelling) {
                self.pos += spelling.len();
                return Token::punct(*kind);
            }
        }
        let text = std::str::from_utf8(&rest[..1]).unwrap_or("?");
        let id = self.interner.intern(text);
        self.pos += 1;
        Token { kind: TokenKind::Unknown, ident: None, lexeme: Some(id) }
    }
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "typedef" => KwTypedef,
        "extern" => KwExtern,
        "static" => KwStatic,
        "auto" => KwAuto,
        "register" => KwRegister,
        "_Thread_local" => KwThreadLocal,
        "__thread" => KwGnuThread,
        "void" => KwVoid,
        "char" => KwChar,
        "short" => KwShort,
        "int" => KwInt,
        "long" => KwLong,
        "float" => KwFloat,
        "double" => KwDouble,
        "signed" => KwSigned,
        "unsigned" => KwUnsigned,
        "_Bool" => KwBool,
        "_Complex" => KwComplex,
        "char16_t" => KwChar16T,
        "char32_t" => KwChar32T,
        "wchar_t" => KwWcharT,
        "struct" => KwStruct,
        "union" => KwUnion,
        "enum" => KwEnum,
        "const" | "__const" | "__const__" => KwConst,
        "volatile" | "__volatile" | "__volatile__" => KwVolatile,
        "restrict" | "__restrict" | "__restrict__" => KwRestrict,
        "_Atomic" => KwAtomic,
        "inline" | "__inline" | "__inline__" => KwInline,
        "_Noreturn" => KwNoreturn,
        "_Alignas" => KwAlignas,
        "_Alignof" | "__alignof" | "__alignof__" => KwAlignof,
        "if" => KwIf,
        "else" => KwElse,
        "switch" => KwSwitch,
        "case" => KwCase,
        "default" => KwDefault,
        "while" => KwWhile,
        "do" => KwDo,
        "for" => KwFor,
        "goto" => KwGoto,
        "continue" => KwContinue,
        "break" => KwBreak,
        "return" => KwReturn,
        "sizeof" => KwSizeof,
        "_Generic" => KwGeneric,
        "_Static_assert" => KwStaticAssert,
        "true" => KwTrue,
        "false" => KwFalse,
        "NULL" => KwNull,
        "nullptr" => KwNullptr,
        "__attribute__" | "__attribute" => KwGnuAttribute,
        "asm" | "__asm" | "__asm__" => KwGnuAsm,
        "typeof" | "__typeof" | "__typeof__" => KwGnuTypeof,
        "__extension__" => KwGnuExtension,
        "_Exists" => KwExists,
        "_Forall" => KwForall,
        "_Template" => KwTemplate,
        "_Omit" => KwOmission,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, _) = lex(src).expect("lexes");
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuators_maximal_munch() {
        use TokenKind::*;
        assert_eq!(
            kinds("a <<= b >> c >= = =="),
            vec![
                Identifier,
                LessLessEquals,
                Identifier,
                GreaterGreater,
                Identifier,
                GreaterEquals,
                Equals,
                EqualsEquals,
                Eof
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        use TokenKind::*;
        assert_eq!(
            kinds("typedef int T; T x;"),
            vec![
                KwTypedef, KwInt, Identifier, Semicolon, Identifier, Identifier, Semicolon, Eof
            ]
        );
    }

    #[test]
    fn gnu_keyword_spellings() {
        use TokenKind::*;
        assert_eq!(
            kinds("__asm__ __volatile__ __typeof__ __attribute__"),
            vec![KwGnuAsm, KwVolatile, KwGnuTypeof, KwGnuAttribute, Eof]
        );
    }

    #[test]
    fn constants() {
        use TokenKind::*;
        assert_eq!(
            kinds("0 0x1fUL 1.5 1e9 0x1.8p3 'a' L'a' \"s\" L\"s\" u8\"s\" u\"s\" U\"s\""),
            vec![
                IntegerConstant,
                IntegerConstant,
                FloatingConstant,
                FloatingConstant,
                FloatingConstant,
                CharacterConstant,
                CharacterConstantL,
                StringLiteral,
                StringLiteralL,
                StringLiteralU8,
                StringLiteralU16,
                StringLiteralU32,
                Eof
            ]
        );
    }

    #[test]
    fn identifier_interning_shares_handles() {
        let (tokens, interner) = lex("x y x").expect("lexes");
        assert_eq!(tokens[0].ident, tokens[2].ident);
        assert_ne!(tokens[0].ident, tokens[1].ident);
        assert_eq!(interner.text(tokens[0].ident.unwrap()), "x");
    }

    #[test]
    fn stray_byte_is_unknown_token() {
        use TokenKind::*;
        assert_eq!(kinds("int @ ;"), vec![KwInt, Unknown, Semicolon, Eof]);
    }

    #[test]
    fn unterminated_block_comment_is_fatal() {
        assert_eq!(lex("int /* oops").unwrap_err(), LexError::UnterminatedComment(4));
    }

    #[test]
    fn unterminated_string_is_fatal() {
        assert!(matches!(lex("\"abc").unwrap_err(), LexError::UnterminatedString(0)));
    }
}
