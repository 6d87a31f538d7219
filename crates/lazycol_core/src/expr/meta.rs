use indexmap::IndexSet;

use super::{Expr, wrap};
use crate::engine::handle::ExprHandle;
use crate::engine::node::ExprNode;
use crate::engine::reference::LITERAL_NAME;

/// Symbolic introspection of an expression graph. Nothing here evaluates.
#[derive(Debug, Clone, Copy)]
pub struct MetaNameSpace<'a> {
    expr: &'a Expr,
}

fn output_name(handle: &ExprHandle) -> &str {
    match handle.node() {
        ExprNode::Column(name) | ExprNode::Alias { name, .. } => name.as_str(),
        ExprNode::Literal(_) => LITERAL_NAME,
        ExprNode::Cast { input, .. } => output_name(input),
        ExprNode::Function { inputs, .. } => match inputs.first() {
            Some(input) => output_name(input),
            None => LITERAL_NAME,
        },
    }
}

fn collect_roots<'a>(handle: &'a ExprHandle, names: &mut IndexSet<&'a str>) {
    if let ExprNode::Column(name) = handle.node() {
        names.insert(name);
    }
    for input in handle.node().inputs() {
        collect_roots(input, names);
    }
}

fn undo_aliases(handle: &ExprHandle) -> ExprHandle {
    match handle.node() {
        ExprNode::Column(_) | ExprNode::Literal(_) => handle.clone(),
        ExprNode::Alias { input, .. } => undo_aliases(input),
        ExprNode::Cast {
            input,
            datatype,
            strict,
        } => ExprHandle::cast(&undo_aliases(input), datatype.clone(), *strict),
        ExprNode::Function { function, inputs } => ExprHandle::from_node(ExprNode::Function {
            function: function.clone(),
            inputs: inputs.iter().map(undo_aliases).collect(),
        }),
    }
}

impl<'a> MetaNameSpace<'a> {
    pub(crate) fn new(expr: &'a Expr) -> Self {
        MetaNameSpace { expr }
    }

    /// Name of the column this expression produces.
    pub fn output_name(&self) -> String {
        output_name(self.expr.handle()).to_string()
    }

    /// Columns referenced by this expression, depth first, without
    /// duplicates.
    pub fn root_names(&self) -> Vec<String> {
        let mut names = IndexSet::new();
        collect_roots(self.expr.handle(), &mut names);
        names.into_iter().map(|n| n.to_string()).collect()
    }

    /// Structural equality of the two graphs.
    pub fn eq(&self, other: &Expr) -> bool {
        self.expr.handle().ptr_eq(other.handle()) || self.expr == other
    }

    /// Remove all aliases from the graph.
    pub fn undo_aliases(&self) -> Expr {
        wrap(undo_aliases(self.expr.handle()))
    }

    pub fn is_column(&self) -> bool {
        matches!(self.expr.handle().node(), ExprNode::Column(_))
    }
}
