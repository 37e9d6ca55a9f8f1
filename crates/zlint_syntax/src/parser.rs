use zlint_span::Span;

use crate::ast::{
    Ast, AssignOp, BinaryOp, ContainerKind, DeclFlags, Node, NodeId, NodeKind, UnaryOp,
};
use crate::token::{TokenId, TokenKind, Tokens};
use crate::ParseError;

/// A recursive-descent parser over Zig's surface syntax. Like the lexer, it
/// covers every construct the semantic model and rule catalog need —
/// generic parameters, inline `for`, and async/await are recognized just
/// enough to skip over, not modeled in the tree.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Tokens,
    pos: u32,
    nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, tokens: Tokens) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> (Ast, Vec<ParseError>) {
        let root_token = self.cur_id();
        let mut fields = Vec::new();
        let mut decls = Vec::new();
        self.parse_container_members(&mut fields, &mut decls, TokenKind::Eof);
        let root = self.push(root_token, NodeKind::Root { decls });
        let ast = Ast::new(self.nodes, root, self.tokens);
        (ast, self.errors)
    }

    // -- token cursor -----------------------------------------------------

    fn cur_id(&self) -> TokenId {
        TokenId(self.pos)
    }

    fn cur(&self) -> TokenKind {
        self.tokens.kind(self.cur_id())
    }

    fn cur_span(&self) -> Span {
        self.tokens.span(self.cur_id())
    }

    fn at_eof(&self) -> bool {
        matches!(self.cur(), TokenKind::Eof)
    }

    fn bump(&mut self) -> TokenId {
        let id = self.cur_id();
        if !self.at_eof() {
            self.pos += 1;
        }
        id
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.cur() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Option<TokenId> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &'static str) -> TokenId {
        if let Some(id) = self.eat(kind) {
            return id;
        }
        self.errors.push(ParseError::UnexpectedToken {
            context,
            span: self.cur_span(),
        });
        // Error recovery: don't consume, the caller's loop termination check
        // (EOF or a sync token) prevents us from looping forever.
        self.cur_id()
    }

    fn push(&mut self, main_token: TokenId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { main_token, kind });
        id
    }

    fn ident_text(&self, id: TokenId) -> &'a str {
        self.tokens.slice(id, self.source)
    }

    // -- container members --------------------------------------------------

    fn parse_container_members(
        &mut self,
        fields: &mut Vec<NodeId>,
        decls: &mut Vec<NodeId>,
        terminator: TokenKind,
    ) {
        loop {
            if self.at(terminator) || self.at_eof() {
                break;
            }
            if self.eat(TokenKind::Comma).is_some() {
                continue;
            }
            match self.cur() {
                TokenKind::KwPub
                | TokenKind::KwExport
                | TokenKind::KwExtern
                | TokenKind::KwConst
                | TokenKind::KwVar
                | TokenKind::KwFn
                | TokenKind::KwUsingnamespace
                | TokenKind::KwTest
                | TokenKind::KwThreadlocal => {
                    decls.push(self.parse_top_level_decl());
                }
                TokenKind::KwComptime => {
                    // `comptime { ... }` is a decl; `comptime name: T` is a field.
                    if self.peek_is_block_comptime() {
                        decls.push(self.parse_top_level_decl());
                    } else {
                        fields.push(self.parse_container_field());
                    }
                }
                TokenKind::Identifier => {
                    fields.push(self.parse_container_field());
                }
                _ => {
                    self.errors.push(ParseError::UnexpectedToken {
                        context: "container member",
                        span: self.cur_span(),
                    });
                    self.bump();
                }
            }
        }
    }

    fn peek_is_block_comptime(&self) -> bool {
        self.tokens.kind(TokenId(self.pos + 1)) == TokenKind::LBrace
    }

    fn parse_container_field(&mut self) -> NodeId {
        let mut flags = DeclFlags::empty();
        if self.eat(TokenKind::KwComptime).is_some() {
            flags |= DeclFlags::COMPTIME;
        }
        let name_token = self.expect(TokenKind::Identifier, "field name");
        self.expect(TokenKind::Colon, "`:` after field name");
        let ty = Some(self.parse_type_expr());
        let default = if self.eat(TokenKind::Equal).is_some() {
            Some(self.parse_expr())
        } else {
            None
        };
        let _ = flags;
        self.push(
            name_token,
            NodeKind::ContainerField {
                name_token,
                ty,
                default,
            },
        )
    }

    fn parse_top_level_decl(&mut self) -> NodeId {
        let main_token = self.cur_id();
        let mut flags = DeclFlags::empty();
        loop {
            match self.cur() {
                TokenKind::KwPub => {
                    self.bump();
                    flags |= DeclFlags::PUB;
                }
                TokenKind::KwExport => {
                    self.bump();
                    flags |= DeclFlags::EXPORT;
                }
                TokenKind::KwExtern => {
                    self.bump();
                    flags |= DeclFlags::EXTERN;
                }
                TokenKind::KwThreadlocal => {
                    self.bump();
                    flags |= DeclFlags::THREADLOCAL;
                }
                _ => break,
            }
        }
        match self.cur() {
            TokenKind::KwConst | TokenKind::KwVar => self.parse_var_decl(main_token, flags),
            TokenKind::KwFn => self.parse_fn_decl(main_token, flags),
            TokenKind::KwUsingnamespace => {
                self.bump();
                let expr = self.parse_expr();
                self.expect(TokenKind::Semicolon, "`;` after usingnamespace");
                self.push(main_token, NodeKind::UsingNamespace { expr })
            }
            TokenKind::KwTest => {
                self.bump();
                let name_token = match self.cur() {
                    TokenKind::String | TokenKind::Identifier => Some(self.bump()),
                    _ => None,
                };
                let body = self.parse_block();
                self.push(main_token, NodeKind::TestDecl { name_token, body })
            }
            TokenKind::KwComptime => {
                self.bump();
                let body = self.parse_block();
                self.push(main_token, NodeKind::Comptime { body })
            }
            _ => {
                self.errors.push(ParseError::UnexpectedToken {
                    context: "top-level declaration",
                    span: self.cur_span(),
                });
                self.bump();
                self.push(main_token, NodeKind::UnreachableLiteral { token: main_token })
            }
        }
    }

    fn parse_var_decl(&mut self, main_token: TokenId, mut flags: DeclFlags) -> NodeId {
        if self.eat(TokenKind::KwConst).is_some() {
            flags |= DeclFlags::CONST;
        } else {
            self.expect(TokenKind::KwVar, "`var` or `const`");
        }
        let name_token = self.expect(TokenKind::Identifier, "variable name");
        let ty = if self.eat(TokenKind::Colon).is_some() {
            Some(self.parse_type_expr())
        } else {
            None
        };
        let init = if self.eat(TokenKind::Equal).is_some() {
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "`;` after declaration");
        self.push(
            main_token,
            NodeKind::VarDecl {
                flags,
                name_token,
                ty,
                init,
            },
        )
    }

    fn parse_fn_decl(&mut self, main_token: TokenId, flags: DeclFlags) -> NodeId {
        self.expect(TokenKind::KwFn, "`fn`");
        let name_token = self.eat(TokenKind::Identifier);
        self.expect(TokenKind::LParen, "`(`");
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            params.push(self.parse_param());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`");
        let return_type = if self.at(TokenKind::LBrace) || self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_type_expr())
        };
        let body = if self.at(TokenKind::LBrace) {
            Some(self.parse_block())
        } else {
            self.expect(TokenKind::Semicolon, "`;` after extern function prototype");
            None
        };
        self.push(
            main_token,
            NodeKind::FnDecl {
                flags,
                name_token,
                params,
                return_type,
                body,
            },
        )
    }

    fn parse_param(&mut self) -> NodeId {
        let main_token = self.cur_id();
        let mut flags = DeclFlags::empty();
        loop {
            match self.cur() {
                TokenKind::KwComptime => {
                    self.bump();
                    flags |= DeclFlags::COMPTIME;
                }
                TokenKind::KwNoalias => {
                    self.bump();
                    flags |= DeclFlags::NOALIAS;
                }
                _ => break,
            }
        }
        let name_token = if self.at(TokenKind::Identifier)
            && self.tokens.kind(TokenId(self.pos + 1)) == TokenKind::Colon
        {
            let id = self.bump();
            self.bump(); // colon
            Some(id)
        } else {
            None
        };
        let ty = if self.at(TokenKind::KwAnytype) {
            self.bump();
            None
        } else {
            Some(self.parse_type_expr())
        };
        self.push(main_token, NodeKind::Param { flags, name_token, ty })
    }

    // -- statements ----------------------------------------------------------

    fn parse_block(&mut self) -> NodeId {
        let main_token = self.expect(TokenKind::LBrace, "`{`");
        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            stmts.push(self.parse_statement());
        }
        self.expect(TokenKind::RBrace, "`}`");
        self.push(main_token, NodeKind::Block { stmts })
    }

    fn parse_body(&mut self) -> NodeId {
        if self.at(TokenKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_statement()
        }
    }

    fn parse_statement(&mut self) -> NodeId {
        match self.cur() {
            TokenKind::KwConst | TokenKind::KwVar => {
                let main_token = self.cur_id();
                self.parse_var_decl(main_token, DeclFlags::empty())
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::KwReturn => {
                let main_token = self.bump();
                let expr = if self.at(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(TokenKind::Semicolon, "`;` after return");
                self.push(main_token, NodeKind::Return { expr })
            }
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwWhile => self.parse_while(),
            TokenKind::KwFor => self.parse_for(),
            TokenKind::KwSwitch => self.parse_switch(),
            TokenKind::KwComptime => {
                let main_token = self.bump();
                let body = self.parse_body();
                self.push(main_token, NodeKind::Comptime { body })
            }
            TokenKind::KwDefer => {
                let main_token = self.bump();
                let expr = self.parse_body();
                self.push(main_token, NodeKind::Defer { expr })
            }
            TokenKind::KwErrdefer => {
                let main_token = self.bump();
                let payload = self.parse_optional_payload();
                let expr = self.parse_body();
                self.push(main_token, NodeKind::ErrDefer { payload, expr })
            }
            TokenKind::KwBreak => {
                let main_token = self.bump();
                let label = self.eat(TokenKind::Colon).map(|_| {
                    self.expect(TokenKind::Identifier, "label after `:`")
                });
                let expr = if self.at(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(TokenKind::Semicolon, "`;` after break");
                self.push(main_token, NodeKind::Break { label, expr })
            }
            TokenKind::KwContinue => {
                let main_token = self.bump();
                let label = self.eat(TokenKind::Colon).map(|_| {
                    self.expect(TokenKind::Identifier, "label after `:`")
                });
                self.expect(TokenKind::Semicolon, "`;` after continue");
                self.push(main_token, NodeKind::Continue { label })
            }
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_expr_statement(&mut self) -> NodeId {
        let main_token = self.cur_id();
        let lhs = self.parse_expr();
        let op = match self.cur() {
            TokenKind::Equal => Some(AssignOp::Assign),
            TokenKind::PlusEqual => Some(AssignOp::Add),
            TokenKind::MinusEqual => Some(AssignOp::Sub),
            TokenKind::StarEqual => Some(AssignOp::Mul),
            TokenKind::SlashEqual => Some(AssignOp::Div),
            TokenKind::PercentEqual => Some(AssignOp::Mod),
            TokenKind::AmpersandEqual => Some(AssignOp::BitAnd),
            TokenKind::PipeEqual => Some(AssignOp::BitOr),
            TokenKind::CaretEqual => Some(AssignOp::BitXor),
            _ => None,
        };
        let node = if let Some(op) = op {
            self.bump();
            let rhs = self.parse_expr();
            self.push(main_token, NodeKind::Assign { op, lhs, rhs })
        } else {
            self.push(main_token, NodeKind::ExprStmt { expr: lhs })
        };
        // Block-like trailing expressions (`if`, `while`, `for`, `switch`,
        // blocks) don't require a trailing semicolon in Zig; everything
        // else does. We only ever reach them as an `ExprStmt` or `Assign`
        // wrapping a non-block primary here, since `parse_statement`
        // dispatches those directly, so always require `;`.
        self.expect(TokenKind::Semicolon, "`;` after statement");
        node
    }

    fn parse_optional_payload(&mut self) -> Option<TokenId> {
        if self.eat(TokenKind::Pipe).is_some() {
            let id = self.expect(TokenKind::Identifier, "payload name");
            self.expect(TokenKind::Pipe, "closing `|`");
            Some(id)
        } else {
            None
        }
    }

    fn parse_payload_list(&mut self) -> Vec<TokenId> {
        let mut names = Vec::new();
        if self.eat(TokenKind::Pipe).is_some() {
            loop {
                names.push(self.expect(TokenKind::Identifier, "payload name"));
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::Pipe, "closing `|`");
        }
        names
    }

    fn parse_if(&mut self) -> NodeId {
        let main_token = self.expect(TokenKind::KwIf, "`if`");
        self.expect(TokenKind::LParen, "`(`");
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen, "`)`");
        let payload = self.parse_optional_payload();
        let then_branch = self.parse_body();
        let (else_branch, else_payload) = if self.eat(TokenKind::KwElse).is_some() {
            let else_payload = self.parse_optional_payload();
            (Some(self.parse_body()), else_payload)
        } else {
            (None, None)
        };
        self.push(
            main_token,
            NodeKind::If {
                cond,
                payload,
                then_branch,
                else_branch,
                else_payload,
            },
        )
    }

    fn parse_while(&mut self) -> NodeId {
        let main_token = self.expect(TokenKind::KwWhile, "`while`");
        self.expect(TokenKind::LParen, "`(`");
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen, "`)`");
        let payload = self.parse_optional_payload();
        let continue_expr = if self.eat(TokenKind::Colon).is_some() {
            self.expect(TokenKind::LParen, "`(`");
            let e = self.parse_expr();
            self.expect(TokenKind::RParen, "`)`");
            Some(e)
        } else {
            None
        };
        let body = self.parse_body();
        let else_branch = if self.eat(TokenKind::KwElse).is_some() {
            Some(self.parse_body())
        } else {
            None
        };
        self.push(
            main_token,
            NodeKind::While {
                cond,
                payload,
                continue_expr,
                body,
                else_branch,
            },
        )
    }

    fn parse_for(&mut self) -> NodeId {
        let main_token = self.expect(TokenKind::KwFor, "`for`");
        self.expect(TokenKind::LParen, "`(`");
        let mut inputs = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            inputs.push(self.parse_expr());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, "`)`");
        let payloads = self.parse_payload_list();
        let body = self.parse_body();
        let else_branch = if self.eat(TokenKind::KwElse).is_some() {
            Some(self.parse_body())
        } else {
            None
        };
        self.push(
            main_token,
            NodeKind::For {
                inputs,
                payloads,
                body,
                else_branch,
            },
        )
    }

    fn parse_switch(&mut self) -> NodeId {
        let main_token = self.expect(TokenKind::KwSwitch, "`switch`");
        self.expect(TokenKind::LParen, "`(`");
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen, "`)`");
        self.expect(TokenKind::LBrace, "`{`");
        let mut cases = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            cases.push(self.parse_switch_case());
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "`}`");
        self.push(main_token, NodeKind::Switch { cond, cases })
    }

    fn parse_switch_case(&mut self) -> NodeId {
        let main_token = self.cur_id();
        let (values, is_else) = if self.eat(TokenKind::KwElse).is_some() {
            (Vec::new(), true)
        } else {
            let mut values = vec![self.parse_expr()];
            while self.eat(TokenKind::Comma).is_some() {
                if self.at(TokenKind::EqualArrow) {
                    break;
                }
                values.push(self.parse_expr());
            }
            (values, false)
        };
        self.expect(TokenKind::EqualArrow, "`=>`");
        let payload = self.parse_optional_payload();
        let body = self.parse_body();
        self.push(
            main_token,
            NodeKind::SwitchCase {
                values,
                is_else,
                payload,
                body,
            },
        )
    }

    // -- expressions -----------------------------------------------------

    fn parse_type_expr(&mut self) -> NodeId {
        self.parse_expr()
    }

    fn parse_expr(&mut self) -> NodeId {
        self.parse_orelse()
    }

    fn parse_orelse(&mut self) -> NodeId {
        let mut lhs = self.parse_or();
        while self.at(TokenKind::KwOrelse) {
            let main_token = self.bump();
            let rhs = self.parse_or();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::Orelse,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_or(&mut self) -> NodeId {
        let mut lhs = self.parse_and();
        while self.at(TokenKind::KwOr) {
            let main_token = self.bump();
            let rhs = self.parse_and();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::BoolOr,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_and(&mut self) -> NodeId {
        let mut lhs = self.parse_compare();
        while self.at(TokenKind::KwAnd) {
            let main_token = self.bump();
            let rhs = self.parse_compare();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::BoolAnd,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_compare(&mut self) -> NodeId {
        let mut lhs = self.parse_bitor();
        loop {
            let op = match self.cur() {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::BangEqual => BinaryOp::Neq,
                TokenKind::LAngle => BinaryOp::Lt,
                TokenKind::LAngleEqual => BinaryOp::LtEq,
                TokenKind::RAngle => BinaryOp::Gt,
                TokenKind::RAngleEqual => BinaryOp::GtEq,
                _ => break,
            };
            let main_token = self.bump();
            let rhs = self.parse_bitor();
            lhs = self.push(main_token, NodeKind::BinaryExpr { op, lhs, rhs });
        }
        lhs
    }

    fn parse_bitor(&mut self) -> NodeId {
        let mut lhs = self.parse_bitxor();
        while self.at(TokenKind::Pipe) {
            let main_token = self.bump();
            let rhs = self.parse_bitxor();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::BitOr,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_bitxor(&mut self) -> NodeId {
        let mut lhs = self.parse_bitand();
        while self.at(TokenKind::Caret) {
            let main_token = self.bump();
            let rhs = self.parse_bitand();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::BitXor,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_bitand(&mut self) -> NodeId {
        let mut lhs = self.parse_shift();
        while self.at(TokenKind::Ampersand) {
            let main_token = self.bump();
            let rhs = self.parse_shift();
            lhs = self.push(
                main_token,
                NodeKind::BinaryExpr {
                    op: BinaryOp::BitAnd,
                    lhs,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_shift(&mut self) -> NodeId {
        let mut lhs = self.parse_additive();
        loop {
            let op = match self.cur() {
                TokenKind::LAngleLAngle => BinaryOp::Shl,
                TokenKind::RAngleRAngle => BinaryOp::Shr,
                _ => break,
            };
            let main_token = self.bump();
            let rhs = self.parse_additive();
            lhs = self.push(main_token, NodeKind::BinaryExpr { op, lhs, rhs });
        }
        lhs
    }

    fn parse_additive(&mut self) -> NodeId {
        let mut lhs = self.parse_multiplicative();
        loop {
            let op = match self.cur() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                TokenKind::DotDot => BinaryOp::Range,
                _ => break,
            };
            let main_token = self.bump();
            let rhs = self.parse_multiplicative();
            lhs = self.push(main_token, NodeKind::BinaryExpr { op, lhs, rhs });
        }
        lhs
    }

    fn parse_multiplicative(&mut self) -> NodeId {
        let mut lhs = self.parse_unary();
        loop {
            let op = match self.cur() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let main_token = self.bump();
            let rhs = self.parse_unary();
            lhs = self.push(main_token, NodeKind::BinaryExpr { op, lhs, rhs });
        }
        lhs
    }

    fn parse_unary(&mut self) -> NodeId {
        match self.cur() {
            TokenKind::Minus => {
                let main_token = self.bump();
                let expr = self.parse_unary();
                self.push(
                    main_token,
                    NodeKind::UnaryExpr {
                        op: UnaryOp::Negate,
                        expr,
                    },
                )
            }
            TokenKind::Bang => {
                let main_token = self.bump();
                // Prefix `!T` denotes an inferred error-set union; `!expr`
                // denotes logical negation. Both parse the same shape.
                let expr = self.parse_unary();
                self.push(main_token, NodeKind::ErrorUnion { error_set: None, payload: expr })
            }
            TokenKind::Ampersand => {
                let main_token = self.bump();
                let expr = self.parse_unary();
                self.push(
                    main_token,
                    NodeKind::UnaryExpr {
                        op: UnaryOp::AddressOf,
                        expr,
                    },
                )
            }
            TokenKind::KwTry => {
                let main_token = self.bump();
                let expr = self.parse_unary();
                self.push(main_token, NodeKind::Try { expr })
            }
            TokenKind::QuestionMark => {
                let main_token = self.bump();
                let inner = self.parse_unary();
                self.push(main_token, NodeKind::OptionalType { inner })
            }
            TokenKind::Star => {
                let main_token = self.bump();
                let is_const = self.eat(TokenKind::KwConst).is_some();
                let inner = self.parse_unary();
                self.push(main_token, NodeKind::PointerType { inner, is_const })
            }
            TokenKind::LBracket => {
                let main_token = self.bump();
                let len = if self.at(TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(TokenKind::RBracket, "`]`");
                let _ = self.eat(TokenKind::KwConst);
                let inner = self.parse_unary();
                if len.is_some() {
                    self.push(main_token, NodeKind::ArrayType { len, inner })
                } else {
                    self.push(main_token, NodeKind::SliceType { inner })
                }
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> NodeId {
        let mut expr = self.parse_primary();
        loop {
            match self.cur() {
                TokenKind::Dot => {
                    let main_token = self.bump();
                    match self.cur() {
                        TokenKind::Star => {
                            self.bump();
                            expr = self.push(
                                main_token,
                                NodeKind::UnaryExpr {
                                    op: UnaryOp::Deref,
                                    expr,
                                },
                            );
                        }
                        TokenKind::QuestionMark => {
                            self.bump();
                            // `.?` unwraps an optional; modeled like deref
                            // since rules only care that it's a suffix.
                            expr = self.push(
                                main_token,
                                NodeKind::UnaryExpr {
                                    op: UnaryOp::Deref,
                                    expr,
                                },
                            );
                        }
                        _ => {
                            let field_token = self.expect(TokenKind::Identifier, "field name");
                            expr = self.push(
                                main_token,
                                NodeKind::FieldAccess { lhs: expr, field_token },
                            );
                        }
                    }
                }
                TokenKind::LParen => {
                    let main_token = self.bump();
                    let mut args = Vec::new();
                    while !self.at(TokenKind::RParen) && !self.at_eof() {
                        args.push(self.parse_expr());
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen, "`)`");
                    expr = self.push(main_token, NodeKind::Call { callee: expr, args });
                }
                TokenKind::KwCatch => {
                    let main_token = self.bump();
                    let payload = self.parse_optional_payload();
                    let fallback = self.parse_unary();
                    expr = self.push(
                        main_token,
                        NodeKind::Catch {
                            expr,
                            payload,
                            fallback,
                        },
                    );
                }
                TokenKind::LBrace => {
                    // Struct-literal initializer, `Type{ .field = value, ... }`.
                    // Field names aren't kept as nodes; only the value
                    // expressions matter to the rule catalog.
                    let main_token = self.bump();
                    let mut args = Vec::new();
                    while !self.at(TokenKind::RBrace) && !self.at_eof() {
                        if self.eat(TokenKind::Dot).is_some() {
                            self.expect(TokenKind::Identifier, "field name");
                            self.expect(TokenKind::Equal, "`=` in field initializer");
                        }
                        args.push(self.parse_expr());
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBrace, "`}`");
                    expr = self.push(main_token, NodeKind::Call { callee: expr, args });
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_primary(&mut self) -> NodeId {
        let main_token = self.cur_id();
        match self.cur() {
            TokenKind::Number => {
                self.bump();
                self.push(main_token, NodeKind::NumberLiteral { token: main_token })
            }
            TokenKind::String => {
                self.bump();
                self.push(main_token, NodeKind::StringLiteral { token: main_token })
            }
            TokenKind::CharLiteral => {
                self.bump();
                self.push(main_token, NodeKind::CharLiteral { token: main_token })
            }
            TokenKind::KwTrue => {
                self.bump();
                self.push(
                    main_token,
                    NodeKind::BoolLiteral {
                        token: main_token,
                        value: true,
                    },
                )
            }
            TokenKind::KwFalse => {
                self.bump();
                self.push(
                    main_token,
                    NodeKind::BoolLiteral {
                        token: main_token,
                        value: false,
                    },
                )
            }
            TokenKind::KwNull => {
                self.bump();
                self.push(main_token, NodeKind::NullLiteral { token: main_token })
            }
            TokenKind::KwUndefined => {
                self.bump();
                self.push(main_token, NodeKind::UndefinedLiteral { token: main_token })
            }
            TokenKind::KwUnreachable => {
                self.bump();
                self.push(main_token, NodeKind::UnreachableLiteral { token: main_token })
            }
            TokenKind::Identifier => {
                self.bump();
                self.push(main_token, NodeKind::Identifier { token: main_token })
            }
            TokenKind::Builtin => {
                self.bump();
                self.expect(TokenKind::LParen, "`(` after builtin");
                let mut args = Vec::new();
                while !self.at(TokenKind::RParen) && !self.at_eof() {
                    args.push(self.parse_expr());
                    if self.eat(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                self.expect(TokenKind::RParen, "`)`");
                self.push(
                    main_token,
                    NodeKind::BuiltinCall {
                        name_token: main_token,
                        args,
                    },
                )
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr();
                self.expect(TokenKind::RParen, "`)`");
                self.push(main_token, NodeKind::Grouped { inner })
            }
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwSwitch => self.parse_switch(),
            TokenKind::KwStruct => self.parse_container_decl_expr(ContainerKind::Struct),
            TokenKind::KwEnum => self.parse_container_decl_expr(ContainerKind::Enum),
            TokenKind::KwUnion => self.parse_container_decl_expr(ContainerKind::Union),
            TokenKind::KwError => {
                self.bump();
                if self.eat(TokenKind::LBrace).is_some() {
                    let mut fields = Vec::new();
                    while !self.at(TokenKind::RBrace) && !self.at_eof() {
                        let name_token = self.expect(TokenKind::Identifier, "error name");
                        fields.push(self.push(
                            name_token,
                            NodeKind::ContainerField {
                                name_token,
                                ty: None,
                                default: None,
                            },
                        ));
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBrace, "`}`");
                    self.push(
                        main_token,
                        NodeKind::ContainerDecl {
                            kind: ContainerKind::ErrorSet,
                            fields,
                            decls: Vec::new(),
                        },
                    )
                } else {
                    // `Error!T`-style explicit error set, referenced by name.
                    self.push(main_token, NodeKind::Identifier { token: main_token })
                }
            }
            TokenKind::KwComptime => {
                self.bump();
                let expr = self.parse_unary();
                self.push(main_token, NodeKind::Comptime { body: expr })
            }
            TokenKind::Dot => {
                self.bump();
                if self.eat(TokenKind::LBrace).is_some() {
                    // Anonymous struct/array literal, `.{ .field = value }`.
                    let mut args = Vec::new();
                    while !self.at(TokenKind::RBrace) && !self.at_eof() {
                        if self.eat(TokenKind::Dot).is_some() {
                            self.expect(TokenKind::Identifier, "field name");
                            self.expect(TokenKind::Equal, "`=` in field initializer");
                        }
                        args.push(self.parse_expr());
                        if self.eat(TokenKind::Comma).is_none() {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBrace, "`}`");
                    let callee = self.push(main_token, NodeKind::Identifier { token: main_token });
                    self.push(main_token, NodeKind::Call { callee, args })
                } else {
                    // Enum literal, `.some_variant`.
                    let name = self.expect(TokenKind::Identifier, "enum literal name");
                    self.push(main_token, NodeKind::Identifier { token: name })
                }
            }
            _ => {
                self.errors.push(ParseError::UnexpectedToken {
                    context: "expression",
                    span: self.cur_span(),
                });
                if !self.at_eof() {
                    self.bump();
                }
                self.push(main_token, NodeKind::Identifier { token: main_token })
            }
        }
    }

    fn parse_container_decl_expr(&mut self, kind: ContainerKind) -> NodeId {
        let main_token = self.bump();
        // Skip an optional backing-type/layout expression, e.g. `enum(u8)`.
        if self.eat(TokenKind::LParen).is_some() {
            let _ = self.parse_expr();
            self.expect(TokenKind::RParen, "`)`");
        }
        self.expect(TokenKind::LBrace, "`{`");
        let mut fields = Vec::new();
        let mut decls = Vec::new();
        self.parse_container_members(&mut fields, &mut decls, TokenKind::RBrace);
        self.expect(TokenKind::RBrace, "`}`");
        self.push(main_token, NodeKind::ContainerDecl { kind, fields, decls })
    }
}

#[allow(dead_code)]
fn debug_ident<'a>(p: &Parser<'a>, id: TokenId) -> &'a str {
    p.ident_text(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::ast::NodeTag;

    fn parse(source: &str) -> (Ast, Vec<ParseError>) {
        let (tokens, _) = Lexer::new(source).tokenize();
        Parser::new(source, tokens).parse()
    }

    #[test]
    fn parses_simple_var_decl() {
        let (ast, errors) = parse("const x: i32 = 1;");
        assert!(errors.is_empty());
        let root = ast.children(ast.root());
        assert_eq!(root.len(), 1);
        assert_eq!(ast.tag(root[0]), NodeTag::VarDecl);
    }

    #[test]
    fn parses_function_with_if_and_try() {
        let src = r#"
            fn doThing() !void {
                if (condition) {
                    try doOther();
                } else {
                    return;
                }
            }
        "#;
        let (ast, errors) = parse(src);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        let root = ast.children(ast.root());
        assert_eq!(ast.tag(root[0]), NodeTag::FnDecl);
    }

    #[test]
    fn parses_struct_with_fields_and_decls() {
        let src = r#"
            const Point = struct {
                x: f32,
                y: f32 = 0,

                pub fn origin() Point {
                    return Point{ .x = 0, .y = 0 };
                }
            };
        "#;
        let (ast, errors) = parse(src);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        assert_eq!(ast.children(ast.root()).len(), 1);
    }
}
