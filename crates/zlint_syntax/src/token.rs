use zlint_span::Span;

/// A lexical token. `TokenId` is a dense index into `Tokens`, never a
/// pointer — the same arena-of-indices discipline the semantic model uses
/// for symbols and scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenId(pub u32);

impl TokenId {
    pub const ROOT: TokenId = TokenId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Builtin, // @name
    Number,
    String,
    CharLiteral,
    DocComment,

    // Keywords
    KwConst,
    KwVar,
    KwFn,
    KwPub,
    KwReturn,
    KwIf,
    KwElse,
    KwWhile,
    KwFor,
    KwSwitch,
    KwComptime,
    KwStruct,
    KwEnum,
    KwUnion,
    KwError,
    KwTest,
    KwTry,
    KwCatch,
    KwDefer,
    KwErrdefer,
    KwBreak,
    KwContinue,
    KwUndefined,
    KwTrue,
    KwFalse,
    KwNull,
    KwUsingnamespace,
    KwExport,
    KwExtern,
    KwAnd,
    KwOr,
    KwOrelse,
    KwPacked,
    KwAsync,
    KwAwait,
    KwInline,
    KwNoinline,
    KwAnytype,
    KwThreadlocal,
    KwVolatile,
    KwAllowzero,
    KwNoalias,
    KwOpaque,
    KwLinksection,
    KwCallconv,
    KwResume,
    KwSuspend,
    KwNosuspend,
    KwUnreachable,
    KwAsm,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,
    DotDot,
    DotDotDot,
    EqualArrow, // =>
    Equal,
    EqualEqual,
    BangEqual,
    Bang,
    QuestionMark,
    Pipe,
    PipePipe,
    Ampersand,
    Plus,
    PlusEqual,
    PlusPlus,
    Minus,
    MinusEqual,
    MinusArrow, // ->  (unused in Zig but harmless to recognize)
    Star,
    StarEqual,
    Slash,
    SlashEqual,
    Percent,
    PercentEqual,
    Caret,
    Tilde,
    LAngle,
    LAngleEqual,
    LAngleLAngle,
    RAngle,
    RAngleEqual,
    RAngleRAngle,
    AmpersandEqual,
    PipeEqual,
    CaretEqual,
    At,

    Eof,
    Unknown,
}

impl TokenKind {
    pub fn from_keyword(ident: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match ident {
            "const" => KwConst,
            "var" => KwVar,
            "fn" => KwFn,
            "pub" => KwPub,
            "return" => KwReturn,
            "if" => KwIf,
            "else" => KwElse,
            "while" => KwWhile,
            "for" => KwFor,
            "switch" => KwSwitch,
            "comptime" => KwComptime,
            "struct" => KwStruct,
            "enum" => KwEnum,
            "union" => KwUnion,
            "error" => KwError,
            "test" => KwTest,
            "try" => KwTry,
            "catch" => KwCatch,
            "defer" => KwDefer,
            "errdefer" => KwErrdefer,
            "break" => KwBreak,
            "continue" => KwContinue,
            "undefined" => KwUndefined,
            "true" => KwTrue,
            "false" => KwFalse,
            "null" => KwNull,
            "usingnamespace" => KwUsingnamespace,
            "export" => KwExport,
            "extern" => KwExtern,
            "and" => KwAnd,
            "or" => KwOr,
            "orelse" => KwOrelse,
            "packed" => KwPacked,
            "async" => KwAsync,
            "await" => KwAwait,
            "inline" => KwInline,
            "noinline" => KwNoinline,
            "anytype" => KwAnytype,
            "threadlocal" => KwThreadlocal,
            "volatile" => KwVolatile,
            "allowzero" => KwAllowzero,
            "noalias" => KwNoalias,
            "opaque" => KwOpaque,
            "linksection" => KwLinksection,
            "callconv" => KwCallconv,
            "resume" => KwResume,
            "suspend" => KwSuspend,
            "nosuspend" => KwNosuspend,
            "unreachable" => KwUnreachable,
            "asm" => KwAsm,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// All tokens for one file, plus a byte-sorted index so the directive
/// parser and formatters can locate "the comment on line N" efficiently.
#[derive(Debug, Clone, Default)]
pub struct Tokens {
    tokens: Vec<Token>,
}

impl Tokens {
    pub fn push(&mut self, token: Token) -> TokenId {
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token);
        id
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> Token {
        self.tokens[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.tokens[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: TokenId) -> Span {
        self.tokens[id.index()].span
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, Token)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, tok)| (TokenId(idx as u32), *tok))
    }

    pub fn slice<'a>(&self, id: TokenId, source: &'a str) -> &'a str {
        self.span(id).text(source)
    }
}
