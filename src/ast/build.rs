//! Construction helpers for synthetic trees (codemod output, tests).

use super::*;
use crate::loc::Loc;
use std::rc::Rc;

pub fn program(loc: Loc, body: Vec<Rc<Statement>>) -> Rc<Program> {
    Rc::new(Program { loc, body })
}

pub fn ident(loc: Loc, name: &str) -> Rc<Identifier> {
    Rc::new(Identifier {
        loc,
        name: name.to_owned(),
    })
}

pub fn ident_expr(loc: Loc, name: &str) -> Rc<Expression> {
    expr(loc, ExpressionKind::Identifier(ident(loc, name)))
}

pub fn expr(loc: Loc, kind: ExpressionKind) -> Rc<Expression> {
    Rc::new(Expression { loc, kind })
}

pub fn stmt(loc: Loc, kind: StatementKind) -> Rc<Statement> {
    Rc::new(Statement { loc, kind })
}

pub fn pattern(loc: Loc, kind: PatternKind) -> Rc<Pattern> {
    Rc::new(Pattern { loc, kind })
}

pub fn number(loc: Loc, value: f64, raw: &str) -> Rc<Literal> {
    Rc::new(Literal {
        loc,
        value: LiteralValue::Number(value),
        raw: raw.to_owned(),
    })
}

pub fn string(loc: Loc, value: &str) -> Rc<Literal> {
    Rc::new(Literal {
        loc,
        value: LiteralValue::String(value.to_owned()),
        raw: format!("\"{}\"", value),
    })
}

pub fn number_expr(loc: Loc, value: f64, raw: &str) -> Rc<Expression> {
    expr(loc, ExpressionKind::Literal(number(loc, value, raw)))
}

pub fn expr_stmt(loc: Loc, expression: Rc<Expression>) -> Rc<Statement> {
    stmt(loc, StatementKind::Expression { expression })
}

pub fn block(loc: Loc, body: Vec<Rc<Statement>>) -> Rc<Block> {
    Rc::new(Block { loc, body })
}

pub fn block_stmt(loc: Loc, body: Vec<Rc<Statement>>) -> Rc<Statement> {
    stmt(loc, StatementKind::Block(block(loc, body)))
}

pub fn ident_pattern(loc: Loc, name: &str) -> Rc<Pattern> {
    pattern(
        loc,
        PatternKind::Identifier {
            name: ident(loc, name),
            annot: None,
            optional: false,
        },
    )
}

pub fn declarator(loc: Loc, id: Rc<Pattern>, init: Option<Rc<Expression>>) -> Rc<VariableDeclarator> {
    Rc::new(VariableDeclarator { loc, id, init })
}

pub fn var_decl(
    loc: Loc,
    kind: VariableKind,
    declarations: Vec<Rc<VariableDeclarator>>,
) -> Rc<VariableDeclaration> {
    Rc::new(VariableDeclaration {
        loc,
        kind,
        declarations,
    })
}

pub fn var_decl_stmt(
    loc: Loc,
    kind: VariableKind,
    declarations: Vec<Rc<VariableDeclarator>>,
) -> Rc<Statement> {
    stmt(
        loc,
        StatementKind::VariableDeclaration(var_decl(loc, kind, declarations)),
    )
}

pub fn call(loc: Loc, callee: Rc<Expression>, arguments: Vec<CallArgument>) -> Rc<Expression> {
    expr(
        loc,
        ExpressionKind::Call {
            callee,
            targs: None,
            arguments,
        },
    )
}

pub fn call_stmt(loc: Loc, callee_name: &str) -> Rc<Statement> {
    expr_stmt(loc, call(loc, ident_expr(loc, callee_name), Vec::new()))
}

pub fn params(loc: Loc, params: Vec<Rc<Pattern>>) -> Rc<FunctionParams> {
    Rc::new(FunctionParams {
        loc,
        params,
        rest: None,
    })
}

pub fn function(
    loc: Loc,
    id: Option<Rc<Identifier>>,
    params: Rc<FunctionParams>,
    body: FunctionBody,
) -> Rc<Function> {
    let return_loc = params.loc.end_of();
    Rc::new(Function {
        loc,
        id,
        params,
        body,
        is_async: false,
        generator: false,
        predicate: None,
        return_type: TypeAnnotationHint::Missing(return_loc),
        tparams: None,
    })
}

pub fn arrow_expr(loc: Loc, params: Rc<FunctionParams>, body: Rc<Expression>) -> Rc<Expression> {
    expr(
        loc,
        ExpressionKind::Arrow(function(loc, None, params, FunctionBody::Expression(body))),
    )
}

pub fn type_annotation(loc: Loc, ty: Ty) -> Rc<TypeAnnotation> {
    Rc::new(TypeAnnotation { loc, ty })
}

pub fn if_stmt(
    loc: Loc,
    test: Rc<Expression>,
    consequent: Rc<Statement>,
    alternate: Option<Rc<Statement>>,
) -> Rc<Statement> {
    stmt(
        loc,
        StatementKind::If {
            test,
            consequent,
            alternate,
        },
    )
}

pub fn return_stmt(loc: Loc, argument: Option<Rc<Expression>>) -> Rc<Statement> {
    stmt(loc, StatementKind::Return { argument })
}

pub fn binary(
    loc: Loc,
    operator: BinaryOp,
    left: Rc<Expression>,
    right: Rc<Expression>,
) -> Rc<Expression> {
    expr(
        loc,
        ExpressionKind::Binary {
            operator,
            left,
            right,
        },
    )
}

pub fn object_expr(loc: Loc, properties: Vec<ObjectMember>) -> Rc<Expression> {
    expr(loc, ExpressionKind::Object { properties })
}

pub fn init_property(loc: Loc, key: ObjectKey, value: Rc<Expression>) -> Rc<ObjectProperty> {
    Rc::new(ObjectProperty {
        loc,
        kind: PropertyKind::Init,
        key,
        value,
        shorthand: false,
    })
}

pub fn class_property(
    loc: Loc,
    key: ObjectKey,
    value: Option<Rc<Expression>>,
    annot: Option<Rc<TypeAnnotation>>,
) -> Rc<ClassProperty> {
    Rc::new(ClassProperty {
        loc,
        key,
        value,
        annot,
        is_static: false,
        variance: None,
    })
}

pub fn class(loc: Loc, id: Option<Rc<Identifier>>, body: Vec<ClassElement>) -> Rc<Class> {
    Rc::new(Class {
        loc,
        id,
        body: Rc::new(ClassBody { loc, body }),
        tparams: None,
        extends: None,
        implements: Vec::new(),
        decorators: Vec::new(),
    })
}

pub fn class_decl_stmt(loc: Loc, id: Rc<Identifier>, body: Vec<ClassElement>) -> Rc<Statement> {
    stmt(loc, StatementKind::ClassDeclaration(class(loc, Some(id), body)))
}
