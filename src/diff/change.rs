use crate::ast::{
    ClassProperty, Expression, Identifier, ObjectProperty, Pattern, Program, Statement,
    TypeAnnotation,
};
use crate::loc::Loc;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum Change<T> {
    Replace(T, T),
    Insert(Vec<T>),
    Delete(T),
}

impl<T> Change<T> {
    // Sort rank for same-index edits: inserts land between positions, so
    // they come before the edit consuming the element at that position.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Change::Insert(_) => 0,
            Change::Delete(_) => 1,
            Change::Replace(_, _) => 2,
        }
    }
}

// The node kinds a whole-subtree Replace can carry. Growing this set is how
// the differ gains granularity: a new variant needs a comparator and lets
// edits that currently bubble up to an ancestor be expressed in place.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Program(Rc<Program>),
    Statement(Rc<Statement>),
    Expression(Rc<Expression>),
    Identifier(Rc<Identifier>),
    Pattern(Rc<Pattern>),
    TypeAnnotation(Rc<TypeAnnotation>),
    ClassProperty(Rc<ClassProperty>),
    ObjectProperty(Rc<ObjectProperty>),
}

pub type LocatedChange = (Loc, Change<Node>);

pub type EditScript = Vec<LocatedChange>;
