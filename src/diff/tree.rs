use super::change::{Change, EditScript, Node};
use super::list::{self, Algorithm, ShallowEq};
use crate::ast::*;
use log::{debug, trace};
use std::rc::Rc;

// Compute the edit script turning `origin` into `modified`. Always succeeds:
// a whole-program replacement is the last-resort edit when nothing finer can
// be represented.
pub fn program(
    algorithm: Algorithm,
    origin: &Rc<Program>,
    modified: &Rc<Program>,
) -> EditScript {
    if Rc::ptr_eq(origin, modified) {
        return Vec::new();
    }
    trace!(
        "diffing programs of {} and {} statements",
        origin.body.len(),
        modified.body.len()
    );
    let differ = Differ { algorithm };
    differ
        .statement_list(&origin.body, &modified.body)
        .unwrap_or_else(|| {
            debug!("program diff not refinable, replacing whole program");
            vec![(
                origin.loc,
                Change::Replace(
                    Node::Program(origin.clone()),
                    Node::Program(modified.clone()),
                ),
            )]
        })
}

fn opt_ptr_eq<T>(old: &Option<Rc<T>>, new: &Option<Rc<T>>) -> bool {
    match (old, new) {
        (Some(old), Some(new)) => Rc::ptr_eq(old, new),
        (None, None) => true,
        _ => false,
    }
}

fn all_ptr_eq<T>(old: &[Rc<T>], new: &[Rc<T>]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(a, b)| Rc::ptr_eq(a, b))
}

fn shallow_seq_eq<T: ShallowEq>(old: &[T], new: &[T]) -> bool {
    old.len() == new.len() && old.iter().zip(new).all(|(a, b)| a.shallow_eq(b))
}

fn object_key_eq(old: &ObjectKey, new: &ObjectKey) -> bool {
    match (old, new) {
        (ObjectKey::Identifier(a), ObjectKey::Identifier(b)) => Rc::ptr_eq(a, b),
        (ObjectKey::Literal(a), ObjectKey::Literal(b)) => Rc::ptr_eq(a, b),
        (ObjectKey::Computed(a), ObjectKey::Computed(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

// The mutually recursive comparator family. A comparator returning None
// cannot express its difference in place; the nearest caller owning a kind
// from the Node union answers with a whole-node Replace instead. Failure
// only ever flows upward, never across siblings.
struct Differ {
    algorithm: Algorithm,
}

impl Differ {
    // Sequences whose elements are themselves representable: insertions and
    // deletions anchor to a neighbouring old element, replacements recurse.
    fn diff_node_seq<T: Located>(
        &self,
        old: &[Rc<T>],
        new: &[Rc<T>],
        recurse: impl Fn(&Rc<T>, &Rc<T>) -> EditScript,
        into_node: impl Fn(&Rc<T>) -> Node,
    ) -> Option<EditScript> {
        let script = list::diff(self.algorithm, old, new)?;
        let mut changes = Vec::new();
        for (index, change) in script {
            match change {
                Change::Replace(old_elem, new_elem) => {
                    changes.extend(recurse(&old_elem, &new_elem))
                }
                Change::Insert(items) => {
                    let loc = if index < 0 {
                        old.first()?.loc().start_of()
                    } else {
                        old[index as usize].loc().end_of()
                    };
                    changes.push((loc, Change::Insert(items.iter().map(&into_node).collect())));
                }
                Change::Delete(old_elem) => {
                    changes.push((old_elem.loc(), Change::Delete(into_node(&old_elem))));
                }
            }
        }
        Some(changes)
    }

    // Sequences of elements with no stand-alone representation (declarators,
    // class elements, object members, ...): only replacements are usable, a
    // positional insert or delete has no expressible anchor.
    fn diff_inner_seq<T: Clone + ShallowEq>(
        &self,
        old: &[T],
        new: &[T],
        recurse: impl Fn(&T, &T) -> Option<EditScript>,
    ) -> Option<EditScript> {
        let script = list::diff(self.algorithm, old, new)?;
        let mut changes = Vec::new();
        for (_, change) in script {
            match change {
                Change::Replace(old_elem, new_elem) => {
                    changes.extend(recurse(&old_elem, &new_elem)?)
                }
                Change::Insert(_) | Change::Delete(_) => return None,
            }
        }
        Some(changes)
    }

    fn diff_opt<T>(
        &self,
        old: Option<&Rc<T>>,
        new: Option<&Rc<T>>,
        recurse: impl FnOnce(&Rc<T>, &Rc<T>) -> EditScript,
    ) -> Option<EditScript> {
        self.diff_opt_refine(old, new, |a, b| Some(recurse(a, b)))
    }

    fn diff_opt_refine<T>(
        &self,
        old: Option<&Rc<T>>,
        new: Option<&Rc<T>>,
        recurse: impl FnOnce(&Rc<T>, &Rc<T>) -> Option<EditScript>,
    ) -> Option<EditScript> {
        match (old, new) {
            (Some(old), Some(new)) => recurse(old, new),
            (None, None) => Some(Vec::new()),
            _ => None,
        }
    }

    fn statement_list(
        &self,
        old: &[Rc<Statement>],
        new: &[Rc<Statement>],
    ) -> Option<EditScript> {
        self.diff_node_seq(
            old,
            new,
            |a, b| self.statement(a, b),
            |s| Node::Statement(s.clone()),
        )
    }

    fn statement(&self, old: &Rc<Statement>, new: &Rc<Statement>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        self.statement_kind(old, new).unwrap_or_else(|| {
            vec![(
                old.loc,
                Change::Replace(Node::Statement(old.clone()), Node::Statement(new.clone())),
            )]
        })
    }

    fn statement_kind(&self, old: &Rc<Statement>, new: &Rc<Statement>) -> Option<EditScript> {
        use StatementKind::*;
        match (&old.kind, &new.kind) {
            (Empty, Empty) | (Debugger, Debugger) => Some(Vec::new()),
            (Block(b1), Block(b2)) => self.block(b1, b2),
            (Expression { expression: e1 }, Expression { expression: e2 }) => {
                Some(self.expression(e1, e2))
            }
            (
                If {
                    test: t1,
                    consequent: c1,
                    alternate: a1,
                },
                If {
                    test: t2,
                    consequent: c2,
                    alternate: a2,
                },
            ) => {
                let mut changes = self.expression(t1, t2);
                changes.extend(self.statement(c1, c2));
                changes.extend(
                    self.diff_opt(a1.as_ref(), a2.as_ref(), |a, b| self.statement(a, b))?,
                );
                Some(changes)
            }
            (
                Labeled {
                    label: l1,
                    body: b1,
                },
                Labeled {
                    label: l2,
                    body: b2,
                },
            ) => {
                let mut changes = self.identifier(l1, l2);
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (Break { label: l1 }, Break { label: l2 })
            | (Continue { label: l1 }, Continue { label: l2 }) => {
                self.diff_opt(l1.as_ref(), l2.as_ref(), |a, b| self.identifier(a, b))
            }
            (
                With {
                    object: o1,
                    body: b1,
                },
                With {
                    object: o2,
                    body: b2,
                },
            ) => {
                let mut changes = self.expression(o1, o2);
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (
                Switch {
                    discriminant: d1,
                    cases: c1,
                },
                Switch {
                    discriminant: d2,
                    cases: c2,
                },
            ) => {
                let mut changes = self.expression(d1, d2);
                changes.extend(self.diff_inner_seq(c1, c2, |a, b| self.switch_case(a, b))?);
                Some(changes)
            }
            (Return { argument: a1 }, Return { argument: a2 }) => {
                self.diff_opt(a1.as_ref(), a2.as_ref(), |a, b| self.expression(a, b))
            }
            (Throw { argument: a1 }, Throw { argument: a2 }) => Some(self.expression(a1, a2)),
            (
                Try {
                    block: b1,
                    handler: h1,
                    finalizer: f1,
                },
                Try {
                    block: b2,
                    handler: h2,
                    finalizer: f2,
                },
            ) => {
                let mut changes = self.block(b1, b2)?;
                changes.extend(self.diff_opt_refine(h1.as_ref(), h2.as_ref(), |a, b| {
                    self.catch_clause(a, b)
                })?);
                changes.extend(
                    self.diff_opt_refine(f1.as_ref(), f2.as_ref(), |a, b| self.block(a, b))?,
                );
                Some(changes)
            }
            (
                While {
                    test: t1,
                    body: b1,
                },
                While {
                    test: t2,
                    body: b2,
                },
            ) => {
                let mut changes = self.expression(t1, t2);
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (
                DoWhile {
                    body: b1,
                    test: t1,
                },
                DoWhile {
                    body: b2,
                    test: t2,
                },
            ) => {
                let mut changes = self.statement(b1, b2);
                changes.extend(self.expression(t1, t2));
                Some(changes)
            }
            (
                For {
                    init: i1,
                    test: t1,
                    update: u1,
                    body: b1,
                },
                For {
                    init: i2,
                    test: t2,
                    update: u2,
                    body: b2,
                },
            ) => {
                let mut changes = match (i1, i2) {
                    (Some(a), Some(b)) => self.for_init(a, b)?,
                    (None, None) => Vec::new(),
                    _ => return None,
                };
                changes.extend(
                    self.diff_opt(t1.as_ref(), t2.as_ref(), |a, b| self.expression(a, b))?,
                );
                changes.extend(
                    self.diff_opt(u1.as_ref(), u2.as_ref(), |a, b| self.expression(a, b))?,
                );
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (
                ForIn {
                    left: l1,
                    right: r1,
                    body: b1,
                    each: e1,
                },
                ForIn {
                    left: l2,
                    right: r2,
                    body: b2,
                    each: e2,
                },
            ) => {
                if e1 != e2 {
                    return None;
                }
                let mut changes = self.for_target(l1, l2)?;
                changes.extend(self.expression(r1, r2));
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (
                ForOf {
                    left: l1,
                    right: r1,
                    body: b1,
                    is_await: aw1,
                },
                ForOf {
                    left: l2,
                    right: r2,
                    body: b2,
                    is_await: aw2,
                },
            ) => {
                if aw1 != aw2 {
                    return None;
                }
                let mut changes = self.for_target(l1, l2)?;
                changes.extend(self.expression(r1, r2));
                changes.extend(self.statement(b1, b2));
                Some(changes)
            }
            (VariableDeclaration(d1), VariableDeclaration(d2)) => {
                self.variable_declaration(d1, d2)
            }
            (FunctionDeclaration(f1), FunctionDeclaration(f2)) => self.function(f1, f2),
            (ClassDeclaration(c1), ClassDeclaration(c2)) => self.class(c1, c2),
            (
                ExportNamed {
                    declaration: d1,
                    specifiers: s1,
                    source: src1,
                    export_kind: k1,
                },
                ExportNamed {
                    declaration: d2,
                    specifiers: s2,
                    source: src2,
                    export_kind: k2,
                },
            ) => {
                if k1 != k2 || !opt_ptr_eq(src1, src2) {
                    return None;
                }
                let mut changes =
                    self.diff_opt(d1.as_ref(), d2.as_ref(), |a, b| self.statement(a, b))?;
                changes.extend(self.diff_inner_seq(s1, s2, |a, b| self.export_specifier(a, b))?);
                Some(changes)
            }
            (ExportDefault { declaration: d1 }, ExportDefault { declaration: d2 }) => {
                match (d1, d2) {
                    (
                        ExportDefaultDeclaration::Declaration(s1),
                        ExportDefaultDeclaration::Declaration(s2),
                    ) => Some(self.statement(s1, s2)),
                    (
                        ExportDefaultDeclaration::Expression(e1),
                        ExportDefaultDeclaration::Expression(e2),
                    ) => Some(self.expression(e1, e2)),
                    _ => None,
                }
            }
            (
                Import {
                    import_kind: k1,
                    source: src1,
                    default_specifier: d1,
                    specifiers: s1,
                },
                Import {
                    import_kind: k2,
                    source: src2,
                    default_specifier: d2,
                    specifiers: s2,
                },
            ) => {
                if k1 != k2 || !Rc::ptr_eq(src1, src2) {
                    return None;
                }
                let mut changes =
                    self.diff_opt(d1.as_ref(), d2.as_ref(), |a, b| self.identifier(a, b))?;
                changes.extend(self.diff_inner_seq(s1, s2, |a, b| self.import_specifier(a, b))?);
                Some(changes)
            }
            _ => None,
        }
    }

    fn block(&self, old: &Rc<Block>, new: &Rc<Block>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        self.statement_list(&old.body, &new.body)
    }

    fn for_init(&self, old: &ForInit, new: &ForInit) -> Option<EditScript> {
        match (old, new) {
            (ForInit::Declaration(d1), ForInit::Declaration(d2)) => {
                self.variable_declaration(d1, d2)
            }
            (ForInit::Expression(e1), ForInit::Expression(e2)) => Some(self.expression(e1, e2)),
            _ => None,
        }
    }

    fn for_target(&self, old: &ForTarget, new: &ForTarget) -> Option<EditScript> {
        match (old, new) {
            (ForTarget::Declaration(d1), ForTarget::Declaration(d2)) => {
                self.variable_declaration(d1, d2)
            }
            (ForTarget::Pattern(p1), ForTarget::Pattern(p2)) => Some(self.pattern(p1, p2)),
            _ => None,
        }
    }

    fn variable_declaration(
        &self,
        old: &Rc<VariableDeclaration>,
        new: &Rc<VariableDeclaration>,
    ) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        if old.kind != new.kind {
            return None;
        }
        self.diff_inner_seq(&old.declarations, &new.declarations, |a, b| {
            self.variable_declarator(a, b)
        })
    }

    fn variable_declarator(
        &self,
        old: &Rc<VariableDeclarator>,
        new: &Rc<VariableDeclarator>,
    ) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        let mut changes = self.pattern(&old.id, &new.id);
        changes.extend(self.diff_opt(old.init.as_ref(), new.init.as_ref(), |a, b| {
            self.expression(a, b)
        })?);
        Some(changes)
    }

    fn switch_case(&self, old: &Rc<SwitchCase>, new: &Rc<SwitchCase>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        let mut changes = self.diff_opt(old.test.as_ref(), new.test.as_ref(), |a, b| {
            self.expression(a, b)
        })?;
        changes.extend(self.statement_list(&old.consequent, &new.consequent)?);
        Some(changes)
    }

    fn catch_clause(&self, old: &Rc<CatchClause>, new: &Rc<CatchClause>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        let mut changes = self.diff_opt(old.param.as_ref(), new.param.as_ref(), |a, b| {
            self.pattern(a, b)
        })?;
        changes.extend(self.block(&old.body, &new.body)?);
        Some(changes)
    }

    fn function(&self, old: &Rc<Function>, new: &Rc<Function>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        if !opt_ptr_eq(&old.id, &new.id)
            || !Rc::ptr_eq(&old.params, &new.params)
            || old.is_async != new.is_async
            || old.generator != new.generator
            || !opt_ptr_eq(&old.predicate, &new.predicate)
            || !opt_ptr_eq(&old.tparams, &new.tparams)
        {
            return None;
        }
        let mut changes = self.function_body(&old.body, &new.body)?;
        changes.extend(self.type_annotation_hint(&old.return_type, &new.return_type)?);
        Some(changes)
    }

    fn function_body(&self, old: &FunctionBody, new: &FunctionBody) -> Option<EditScript> {
        match (old, new) {
            (FunctionBody::Block(b1), FunctionBody::Block(b2)) => self.block(b1, b2),
            (FunctionBody::Expression(e1), FunctionBody::Expression(e2)) => {
                Some(self.expression(e1, e2))
            }
            _ => None,
        }
    }

    fn class(&self, old: &Rc<Class>, new: &Rc<Class>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        if !opt_ptr_eq(&old.id, &new.id)
            || !opt_ptr_eq(&old.tparams, &new.tparams)
            || !opt_ptr_eq(&old.extends, &new.extends)
            || !all_ptr_eq(&old.implements, &new.implements)
            || !all_ptr_eq(&old.decorators, &new.decorators)
        {
            return None;
        }
        self.class_body(&old.body, &new.body)
    }

    fn class_body(&self, old: &Rc<ClassBody>, new: &Rc<ClassBody>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        self.diff_inner_seq(&old.body, &new.body, |a, b| self.class_element(a, b))
    }

    fn class_element(&self, old: &ClassElement, new: &ClassElement) -> Option<EditScript> {
        match (old, new) {
            (ClassElement::Method(m1), ClassElement::Method(m2)) => self.class_method(m1, m2),
            (ClassElement::Property(p1), ClassElement::Property(p2)) => {
                Some(self.class_property(p1, p2))
            }
            _ => None,
        }
    }

    fn class_method(&self, old: &Rc<ClassMethod>, new: &Rc<ClassMethod>) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        if old.kind != new.kind
            || old.is_static != new.is_static
            || !object_key_eq(&old.key, &new.key)
            || !all_ptr_eq(&old.decorators, &new.decorators)
        {
            return None;
        }
        self.function(&old.value, &new.value)
    }

    fn class_property(&self, old: &Rc<ClassProperty>, new: &Rc<ClassProperty>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        let replace = || {
            vec![(
                old.loc,
                Change::Replace(
                    Node::ClassProperty(old.clone()),
                    Node::ClassProperty(new.clone()),
                ),
            )]
        };
        if old.is_static != new.is_static
            || old.variance != new.variance
            || !object_key_eq(&old.key, &new.key)
        {
            return replace();
        }
        let refined = (|| {
            let mut changes = self.diff_opt(old.value.as_ref(), new.value.as_ref(), |a, b| {
                self.expression(a, b)
            })?;
            changes.extend(self.type_annotation_opt(&old.annot, &new.annot)?);
            Some(changes)
        })();
        refined.unwrap_or_else(replace)
    }

    fn expression(&self, old: &Rc<Expression>, new: &Rc<Expression>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        self.expression_kind(old, new).unwrap_or_else(|| {
            vec![(
                old.loc,
                Change::Replace(Node::Expression(old.clone()), Node::Expression(new.clone())),
            )]
        })
    }

    fn expression_kind(&self, old: &Rc<Expression>, new: &Rc<Expression>) -> Option<EditScript> {
        use ExpressionKind::*;
        match (&old.kind, &new.kind) {
            (Identifier(i1), Identifier(i2)) => Some(self.identifier(i1, i2)),
            (
                Unary {
                    operator: op1,
                    argument: a1,
                },
                Unary {
                    operator: op2,
                    argument: a2,
                },
            ) => {
                if op1 != op2 {
                    return None;
                }
                Some(self.expression(a1, a2))
            }
            (
                Update {
                    operator: op1,
                    prefix: p1,
                    argument: a1,
                },
                Update {
                    operator: op2,
                    prefix: p2,
                    argument: a2,
                },
            ) => {
                if op1 != op2 || p1 != p2 {
                    return None;
                }
                Some(self.expression(a1, a2))
            }
            (
                Binary {
                    operator: op1,
                    left: l1,
                    right: r1,
                },
                Binary {
                    operator: op2,
                    left: l2,
                    right: r2,
                },
            ) => {
                if op1 != op2 {
                    return None;
                }
                let mut changes = self.expression(l1, l2);
                changes.extend(self.expression(r1, r2));
                Some(changes)
            }
            (
                Logical {
                    operator: op1,
                    left: l1,
                    right: r1,
                },
                Logical {
                    operator: op2,
                    left: l2,
                    right: r2,
                },
            ) => {
                if op1 != op2 {
                    return None;
                }
                let mut changes = self.expression(l1, l2);
                changes.extend(self.expression(r1, r2));
                Some(changes)
            }
            (
                Assignment {
                    operator: op1,
                    target: t1,
                    value: v1,
                },
                Assignment {
                    operator: op2,
                    target: t2,
                    value: v2,
                },
            ) => {
                if op1 != op2 {
                    return None;
                }
                let mut changes = self.pattern(t1, t2);
                changes.extend(self.expression(v1, v2));
                Some(changes)
            }
            (
                Conditional {
                    test: t1,
                    consequent: c1,
                    alternate: a1,
                },
                Conditional {
                    test: t2,
                    consequent: c2,
                    alternate: a2,
                },
            ) => {
                let mut changes = self.expression(t1, t2);
                changes.extend(self.expression(c1, c2));
                changes.extend(self.expression(a1, a2));
                Some(changes)
            }
            (
                Member {
                    object: o1,
                    property: p1,
                },
                Member {
                    object: o2,
                    property: p2,
                },
            ) => {
                let mut changes = self.expression(o1, o2);
                changes.extend(self.member_property(p1, p2)?);
                Some(changes)
            }
            (
                Call {
                    callee: c1,
                    targs: t1,
                    arguments: a1,
                },
                Call {
                    callee: c2,
                    targs: t2,
                    arguments: a2,
                },
            )
            | (
                New {
                    callee: c1,
                    targs: t1,
                    arguments: a1,
                },
                New {
                    callee: c2,
                    targs: t2,
                    arguments: a2,
                },
            ) => {
                // TODO: recurse into targs and arguments
                if !opt_ptr_eq(t1, t2) || !shallow_seq_eq(a1, a2) {
                    return None;
                }
                Some(self.expression(c1, c2))
            }
            (Object { properties: p1 }, Object { properties: p2 }) => {
                self.diff_inner_seq(p1, p2, |a, b| self.object_member(a, b))
            }
            (Function(f1), Function(f2)) | (Arrow(f1), Arrow(f2)) => self.function(f1, f2),
            (
                TypeCast {
                    expression: e1,
                    annot: a1,
                },
                TypeCast {
                    expression: e2,
                    annot: a2,
                },
            ) => {
                let mut changes = self.expression(e1, e2);
                changes.extend(self.type_annotation(a1, a2));
                Some(changes)
            }
            _ => None,
        }
    }

    fn member_property(&self, old: &MemberProperty, new: &MemberProperty) -> Option<EditScript> {
        match (old, new) {
            (MemberProperty::Identifier(i1), MemberProperty::Identifier(i2)) => {
                Some(self.identifier(i1, i2))
            }
            (MemberProperty::Computed(e1), MemberProperty::Computed(e2)) => {
                Some(self.expression(e1, e2))
            }
            _ => None,
        }
    }

    fn object_member(&self, old: &ObjectMember, new: &ObjectMember) -> Option<EditScript> {
        match (old, new) {
            (ObjectMember::Property(p1), ObjectMember::Property(p2)) => {
                Some(self.object_property(p1, p2))
            }
            (ObjectMember::Spread(s1), ObjectMember::Spread(s2)) => {
                Some(self.spread_element(s1, s2))
            }
            _ => None,
        }
    }

    fn spread_element(&self, old: &Rc<SpreadElement>, new: &Rc<SpreadElement>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        self.expression(&old.argument, &new.argument)
    }

    fn object_property(&self, old: &Rc<ObjectProperty>, new: &Rc<ObjectProperty>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        let replace = || {
            vec![(
                old.loc,
                Change::Replace(
                    Node::ObjectProperty(old.clone()),
                    Node::ObjectProperty(new.clone()),
                ),
            )]
        };
        if old.kind != new.kind || old.shorthand != new.shorthand {
            return replace();
        }
        let mut changes = match (&old.key, &new.key) {
            (ObjectKey::Identifier(i1), ObjectKey::Identifier(i2)) => self.identifier(i1, i2),
            (ObjectKey::Computed(e1), ObjectKey::Computed(e2)) => self.expression(e1, e2),
            // Literal keys are not recursed into
            _ => return replace(),
        };
        changes.extend(self.expression(&old.value, &new.value));
        changes
    }

    fn identifier(&self, old: &Rc<Identifier>, new: &Rc<Identifier>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        vec![(
            old.loc,
            Change::Replace(Node::Identifier(old.clone()), Node::Identifier(new.clone())),
        )]
    }

    fn type_annotation(&self, old: &Rc<TypeAnnotation>, new: &Rc<TypeAnnotation>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        vec![(
            old.loc,
            Change::Replace(
                Node::TypeAnnotation(old.clone()),
                Node::TypeAnnotation(new.clone()),
            ),
        )]
    }

    fn type_annotation_opt(
        &self,
        old: &Option<Rc<TypeAnnotation>>,
        new: &Option<Rc<TypeAnnotation>>,
    ) -> Option<EditScript> {
        self.diff_opt(old.as_ref(), new.as_ref(), |a, b| self.type_annotation(a, b))
    }

    fn type_annotation_hint(
        &self,
        old: &TypeAnnotationHint,
        new: &TypeAnnotationHint,
    ) -> Option<EditScript> {
        use TypeAnnotationHint::*;
        match (old, new) {
            (Available(a), Available(b)) => Some(self.type_annotation(a, b)),
            (Missing(_), Missing(_)) => Some(Vec::new()),
            (Available(a), Missing(_)) => Some(vec![(
                a.loc,
                Change::Delete(Node::TypeAnnotation(a.clone())),
            )]),
            // The missing marker remembers where an annotation would go,
            // which is exactly the insertion point.
            (Missing(loc), Available(b)) => Some(vec![(
                *loc,
                Change::Insert(vec![Node::TypeAnnotation(b.clone())]),
            )]),
        }
    }

    fn export_specifier(
        &self,
        old: &Rc<ExportSpecifier>,
        new: &Rc<ExportSpecifier>,
    ) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        let mut changes = self.identifier(&old.local, &new.local);
        changes.extend(self.diff_opt(old.exported.as_ref(), new.exported.as_ref(), |a, b| {
            self.identifier(a, b)
        })?);
        Some(changes)
    }

    fn import_specifier(
        &self,
        old: &Rc<ImportSpecifier>,
        new: &Rc<ImportSpecifier>,
    ) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        let mut changes = self.identifier(&old.remote, &new.remote);
        changes.extend(self.diff_opt(old.local.as_ref(), new.local.as_ref(), |a, b| {
            self.identifier(a, b)
        })?);
        Some(changes)
    }

    fn pattern(&self, old: &Rc<Pattern>, new: &Rc<Pattern>) -> EditScript {
        if Rc::ptr_eq(old, new) {
            return Vec::new();
        }
        self.pattern_kind(old, new).unwrap_or_else(|| {
            vec![(
                old.loc,
                Change::Replace(Node::Pattern(old.clone()), Node::Pattern(new.clone())),
            )]
        })
    }

    fn pattern_kind(&self, old: &Rc<Pattern>, new: &Rc<Pattern>) -> Option<EditScript> {
        use PatternKind::*;
        match (&old.kind, &new.kind) {
            (
                Identifier {
                    name: n1,
                    annot: a1,
                    optional: o1,
                },
                Identifier {
                    name: n2,
                    annot: a2,
                    optional: o2,
                },
            ) => {
                if o1 != o2 {
                    return None;
                }
                let mut changes = self.identifier(n1, n2);
                changes.extend(self.type_annotation_opt(a1, a2)?);
                Some(changes)
            }
            (
                Object {
                    properties: p1,
                    annot: a1,
                },
                Object {
                    properties: p2,
                    annot: a2,
                },
            ) => {
                let mut changes =
                    self.diff_inner_seq(p1, p2, |a, b| self.object_pattern_property(a, b))?;
                changes.extend(self.type_annotation_opt(a1, a2)?);
                Some(changes)
            }
            (
                Array {
                    elements: e1,
                    annot: a1,
                },
                Array {
                    elements: e2,
                    annot: a2,
                },
            ) => {
                let mut changes =
                    self.diff_inner_seq(e1, e2, |a, b| self.array_pattern_element(a, b))?;
                changes.extend(self.type_annotation_opt(a1, a2)?);
                Some(changes)
            }
            (
                Assignment {
                    left: l1,
                    right: r1,
                },
                Assignment {
                    left: l2,
                    right: r2,
                },
            ) => {
                let mut changes = self.pattern(l1, l2);
                changes.extend(self.expression(r1, r2));
                Some(changes)
            }
            (Expression(e1), Expression(e2)) => Some(self.expression(e1, e2)),
            _ => None,
        }
    }

    fn object_pattern_property(
        &self,
        old: &ObjectPatternProperty,
        new: &ObjectPatternProperty,
    ) -> Option<EditScript> {
        match (old, new) {
            (ObjectPatternProperty::Property(p1), ObjectPatternProperty::Property(p2)) => {
                self.pattern_property(p1, p2)
            }
            (ObjectPatternProperty::Rest(r1), ObjectPatternProperty::Rest(r2)) => {
                Some(self.pattern(&r1.argument, &r2.argument))
            }
            _ => None,
        }
    }

    fn pattern_property(
        &self,
        old: &Rc<PatternProperty>,
        new: &Rc<PatternProperty>,
    ) -> Option<EditScript> {
        if Rc::ptr_eq(old, new) {
            return Some(Vec::new());
        }
        if old.shorthand != new.shorthand {
            return None;
        }
        let mut changes = match (&old.key, &new.key) {
            (ObjectKey::Identifier(i1), ObjectKey::Identifier(i2)) => self.identifier(i1, i2),
            (ObjectKey::Computed(e1), ObjectKey::Computed(e2)) => self.expression(e1, e2),
            // Literal keys bubble up to the enclosing pattern
            _ => return None,
        };
        changes.extend(self.pattern(&old.pattern, &new.pattern));
        Some(changes)
    }

    fn array_pattern_element(
        &self,
        old: &Option<ArrayPatternElement>,
        new: &Option<ArrayPatternElement>,
    ) -> Option<EditScript> {
        match (old, new) {
            (None, None) => Some(Vec::new()),
            (
                Some(ArrayPatternElement::Pattern(p1)),
                Some(ArrayPatternElement::Pattern(p2)),
            ) => Some(self.pattern(p1, p2)),
            (Some(ArrayPatternElement::Rest(r1)), Some(ArrayPatternElement::Rest(r2))) => {
                Some(self.pattern(&r1.argument, &r2.argument))
            }
            // A hole facing a bound element cannot be expressed in place
            _ => None,
        }
    }
}

impl ShallowEq for ClassElement {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClassElement::Method(a), ClassElement::Method(b)) => Rc::ptr_eq(a, b),
            (ClassElement::Property(a), ClassElement::Property(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl ShallowEq for ObjectMember {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ObjectMember::Property(a), ObjectMember::Property(b)) => Rc::ptr_eq(a, b),
            (ObjectMember::Spread(a), ObjectMember::Spread(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl ShallowEq for ObjectPatternProperty {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ObjectPatternProperty::Property(a), ObjectPatternProperty::Property(b)) => {
                Rc::ptr_eq(a, b)
            }
            (ObjectPatternProperty::Rest(a), ObjectPatternProperty::Rest(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl ShallowEq for ArrayPatternElement {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayPatternElement::Pattern(a), ArrayPatternElement::Pattern(b)) => {
                Rc::ptr_eq(a, b)
            }
            (ArrayPatternElement::Rest(a), ArrayPatternElement::Rest(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl ShallowEq for CallArgument {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CallArgument::Expression(a), CallArgument::Expression(b)) => Rc::ptr_eq(a, b),
            (CallArgument::Spread(a), CallArgument::Spread(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
