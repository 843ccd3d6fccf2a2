use crate::ast::{ExpressionKind, ObjectKey, Ty};
use crate::diff::{Change, EditScript, Node};
use crate::loc::Loc;
use std::io::Write;

type Result = std::io::Result<()>;

fn key_repr(key: &ObjectKey) -> String {
    match key {
        ObjectKey::Identifier(id) => id.name.clone(),
        ObjectKey::Literal(lit) => lit.raw.clone(),
        ObjectKey::Computed(_) => "<computed>".to_owned(),
    }
}

pub trait ScriptFormatter {
    type Output: Write;
    fn output(&mut self) -> &mut Self::Output;

    fn write_loc(&mut self, loc: Loc) -> Result {
        write!(self.output(), "@{}", loc)
    }

    fn write_node(&mut self, node: &Node) -> Result {
        match node {
            Node::Program(program) => {
                write!(self.output(), "Program[{}]", program.body.len())
            }
            Node::Statement(stmt) => write!(self.output(), "Statement({})", stmt.kind.name()),
            Node::Expression(expr) => match &expr.kind {
                ExpressionKind::Identifier(id) => {
                    write!(self.output(), "Expression(Identifier {})", id.name)
                }
                ExpressionKind::Literal(lit) => {
                    write!(self.output(), "Expression(Literal {})", lit.raw)
                }
                kind => write!(self.output(), "Expression({})", kind.name()),
            },
            Node::Identifier(id) => write!(self.output(), "Identifier({})", id.name),
            Node::Pattern(pat) => write!(self.output(), "Pattern({})", pat.kind.name()),
            Node::TypeAnnotation(annot) => match &annot.ty {
                Ty::Named(name) => write!(self.output(), "TypeAnnotation({})", name),
                ty => write!(self.output(), "TypeAnnotation({:?})", ty),
            },
            Node::ClassProperty(prop) => {
                write!(self.output(), "ClassProperty({})", key_repr(&prop.key))
            }
            Node::ObjectProperty(prop) => {
                write!(self.output(), "ObjectProperty({})", key_repr(&prop.key))
            }
        }
    }

    fn write_replaced(&mut self, loc: Loc, old: &Node, new: &Node) -> Result {
        self.write_loc(loc)?;
        write!(self.output(), " CHANGED![«")?;
        self.write_node(old)?;
        write!(self.output(), "» -> «")?;
        self.write_node(new)?;
        writeln!(self.output(), "»]")
    }

    fn write_inserted(&mut self, loc: Loc, nodes: &[Node]) -> Result {
        self.write_loc(loc)?;
        write!(self.output(), " INSERTED![")?;
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                write!(self.output(), ", ")?;
            }
            self.write_node(node)?;
        }
        writeln!(self.output(), "]")
    }

    fn write_deleted(&mut self, loc: Loc, node: &Node) -> Result {
        self.write_loc(loc)?;
        write!(self.output(), " DELETED![")?;
        self.write_node(node)?;
        writeln!(self.output(), "]")
    }

    fn write_script(&mut self, script: &EditScript) -> Result {
        for (loc, change) in script {
            match change {
                Change::Replace(old, new) => self.write_replaced(*loc, old, new)?,
                Change::Insert(nodes) => self.write_inserted(*loc, nodes)?,
                Change::Delete(node) => self.write_deleted(*loc, node)?,
            }
        }
        Ok(())
    }
}

pub struct PlainScriptFormatter<O> {
    output: O,
}

impl<O> PlainScriptFormatter<O> {
    pub fn new(output: O) -> Self {
        PlainScriptFormatter { output }
    }
}

impl<O: Write> ScriptFormatter for PlainScriptFormatter<O> {
    type Output = O;
    fn output(&mut self) -> &mut O {
        &mut self.output
    }
}
