use std::collections::HashSet;

use indexmap::IndexMap;

use super::parse_error::ParseError;

pub type ScopeNodeId = usize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScopeNodeKind {
    Global,
    Module,
    Function,
    Block,
    Switch,
    /// A catch clause scope holding the catch parameter bindings together
    /// with the lexical declarations of the catch body.
    Catch { is_simple_param: bool },
    With,
}

impl ScopeNodeKind {
    /// Whether var declarations hoist into this scope.
    fn is_hoist_target(&self) -> bool {
        matches!(
            self,
            ScopeNodeKind::Global | ScopeNodeKind::Module | ScopeNodeKind::Function
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    Class,
    Import,
    Function {
        /// Whether this is a LexicallyScopedDeclaration or a
        /// VarScopedDeclaration. Only a VarScopedDeclaration when declared at
        /// the top level of a script, module, function, or static block.
        is_lexical: bool,
        /// Whether redeclaration by another function declaration is allowed,
        /// which is the case for sloppy mode functions in blocks (Annex B).
        is_duplicable: bool,
    },
    FunctionParameter,
    CatchParameter,
}

impl BindingKind {
    pub fn is_lexically_scoped(&self) -> bool {
        match self {
            BindingKind::Var | BindingKind::FunctionParameter => false,
            BindingKind::Function { is_lexical, .. } => *is_lexical,
            BindingKind::Let
            | BindingKind::Const
            | BindingKind::Class
            | BindingKind::Import
            | BindingKind::CatchParameter => true,
        }
    }

    fn is_duplicable_function(&self) -> bool {
        matches!(self, BindingKind::Function { is_duplicable: true, .. })
    }
}

struct ScopeNode {
    parent: Option<ScopeNodeId>,
    kind: ScopeNodeKind,
    /// Bindings declared in this scope. Each name maps to the last binding
    /// with that name declared in the scope.
    bindings: IndexMap<String, BindingKind>,
    /// All var declared names that are in scope at this node but declared in
    /// a child scope, kept so that later lexical declarations can detect
    /// conflicts.
    child_var_names: HashSet<String>,
}

pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
    current_node_id: ScopeNodeId,
}

/// A save point for the scope tree, used when the parser backtracks.
pub struct SavedScopeTreeState {
    current_node_id: ScopeNodeId,
    current_node_num_bindings: usize,
    num_nodes: usize,
}

const TOPLEVEL_SCOPE_ID: ScopeNodeId = 0;

type AddBindingResult = Result<(), ParseError>;

impl ScopeTree {
    pub fn new(toplevel_kind: ScopeNodeKind) -> ScopeTree {
        let toplevel_node = ScopeNode {
            parent: None,
            kind: toplevel_kind,
            bindings: IndexMap::new(),
            child_var_names: HashSet::new(),
        };

        ScopeTree {
            nodes: vec![toplevel_node],
            current_node_id: TOPLEVEL_SCOPE_ID,
        }
    }

    pub fn save(&self) -> SavedScopeTreeState {
        SavedScopeTreeState {
            current_node_id: self.current_node_id,
            current_node_num_bindings: self.nodes[self.current_node_id].bindings.len(),
            num_nodes: self.nodes.len(),
        }
    }

    pub fn restore(&mut self, saved_state: &SavedScopeTreeState) {
        self.current_node_id = saved_state.current_node_id;
        self.nodes[self.current_node_id]
            .bindings
            .truncate(saved_state.current_node_num_bindings);
        self.nodes.truncate(saved_state.num_nodes);
    }

    pub fn enter_scope(&mut self, kind: ScopeNodeKind) {
        let node = ScopeNode {
            parent: Some(self.current_node_id),
            kind,
            bindings: IndexMap::new(),
            child_var_names: HashSet::new(),
        };

        self.nodes.push(node);
        self.current_node_id = self.nodes.len() - 1;
    }

    pub fn exit_scope(&mut self) {
        self.current_node_id = self.nodes[self.current_node_id].parent.unwrap();
    }

    pub fn current_kind(&self) -> ScopeNodeKind {
        self.nodes[self.current_node_id].kind
    }

    /// Whether the current scope is one that var declarations hoist into,
    /// meaning function declarations here are var scoped in sloppy mode.
    pub fn current_is_hoist_target(&self) -> bool {
        self.nodes[self.current_node_id].kind.is_hoist_target()
    }

    /// Whether the toplevel scope declares the given name. Used to validate
    /// module exports after parsing completes.
    pub fn has_toplevel_binding(&self, name: &str) -> bool {
        self.nodes[TOPLEVEL_SCOPE_ID].bindings.contains_key(name)
    }

    /// Add a binding to the scope tree, hoisting to a higher scope if
    /// necessary. Errors if the binding conflicts with an existing binding.
    pub fn add_binding(&mut self, name: &str, kind: BindingKind) -> AddBindingResult {
        if kind.is_lexically_scoped() {
            self.add_lexically_scoped_binding(name, kind)
        } else {
            self.add_var_scoped_binding(name, kind)
        }
    }

    fn add_lexically_scoped_binding(&mut self, name: &str, kind: BindingKind) -> AddBindingResult {
        let node = &mut self.nodes[self.current_node_id];

        // Error if there is already any binding with this name in the current
        // scope. Sloppy mode function declarations in blocks may redeclare
        // each other (Annex B).
        if let Some(existing_kind) = node.bindings.get(name) {
            let both_duplicable_functions =
                existing_kind.is_duplicable_function() && kind.is_duplicable_function();
            if !both_duplicable_functions {
                return Err(ParseError::NameRedeclaration(name.to_owned()));
            }
        }

        // Then check for conflicting var scoped bindings hoisted from child
        // scopes.
        if node.child_var_names.contains(name) {
            return Err(ParseError::NameRedeclaration(name.to_owned()));
        }

        node.bindings.insert(name.to_owned(), kind);

        Ok(())
    }

    fn add_var_scoped_binding(&mut self, name: &str, kind: BindingKind) -> AddBindingResult {
        // Walk up to the hoist target scope, checking for conflicting lexical
        // bindings along the way.
        let mut node_id = self.current_node_id;
        loop {
            let node = &mut self.nodes[node_id];

            if let Some(existing_kind) = node.bindings.get(name) {
                if existing_kind.is_lexically_scoped() {
                    // Annex B allows a var to share the name of a simple catch
                    // clause parameter it is nested within.
                    let is_catch_param_exception = *existing_kind == BindingKind::CatchParameter
                        && matches!(node.kind, ScopeNodeKind::Catch { is_simple_param: true });

                    if !is_catch_param_exception {
                        return Err(ParseError::NameRedeclaration(name.to_owned()));
                    }
                }
            }

            if node.kind.is_hoist_target() {
                // Only override an existing binding if this is a new function
                // declaration, since later function declarations win.
                if !node.bindings.contains_key(name)
                    || matches!(kind, BindingKind::Function { .. })
                {
                    node.bindings.insert(name.to_owned(), kind);
                }

                return Ok(());
            } else {
                // Record the var name in all scopes up to the hoist target so
                // that later lexical declarations can check for conflicts.
                node.child_var_names.insert(name.to_owned());
            }

            node_id = node.parent.unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_decl(is_lexical: bool, is_duplicable: bool) -> BindingKind {
        BindingKind::Function { is_lexical, is_duplicable }
    }

    #[test]
    fn lexical_conflicts_in_same_scope() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.add_binding("x", BindingKind::Let).unwrap();
        assert!(tree.add_binding("x", BindingKind::Const).is_err());
        assert!(tree.add_binding("x", BindingKind::Var).is_err());
    }

    #[test]
    fn var_hoists_past_blocks() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("x", BindingKind::Var).unwrap();
        tree.exit_scope();

        // Hoisted var conflicts with a later lexical declaration at toplevel
        assert!(tree.add_binding("x", BindingKind::Let).is_err());
    }

    #[test]
    fn lexical_shadowing_in_inner_scope_is_allowed() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.add_binding("x", BindingKind::Let).unwrap();
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("x", BindingKind::Let).unwrap();
    }

    #[test]
    fn lexical_conflicts_with_child_var() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Function);
        tree.enter_scope(ScopeNodeKind::Block);
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("x", BindingKind::Var).unwrap();
        tree.exit_scope();

        assert!(tree.add_binding("x", BindingKind::Let).is_err());
    }

    #[test]
    fn var_can_redeclare_var() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.add_binding("x", BindingKind::Var).unwrap();
        tree.add_binding("x", BindingKind::Var).unwrap();
        tree.add_binding("x", function_decl(false, false)).unwrap();
    }

    #[test]
    fn sloppy_block_functions_can_redeclare() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("f", function_decl(true, true)).unwrap();
        tree.add_binding("f", function_decl(true, true)).unwrap();

        // Strict mode block functions conflict
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("g", function_decl(true, false)).unwrap();
        assert!(tree.add_binding("g", function_decl(true, false)).is_err());
    }

    #[test]
    fn simple_catch_parameter_allows_var() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Function);
        tree.enter_scope(ScopeNodeKind::Catch { is_simple_param: true });
        tree.add_binding("e", BindingKind::CatchParameter).unwrap();
        tree.add_binding("e", BindingKind::Var).unwrap();
        assert!(tree.add_binding("e", BindingKind::Let).is_err());
    }

    #[test]
    fn destructured_catch_parameter_conflicts_with_var() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Function);
        tree.enter_scope(ScopeNodeKind::Catch { is_simple_param: false });
        tree.add_binding("e", BindingKind::CatchParameter).unwrap();
        assert!(tree.add_binding("e", BindingKind::Var).is_err());
    }

    #[test]
    fn save_restore_discards_speculative_bindings() {
        let mut tree = ScopeTree::new(ScopeNodeKind::Global);
        tree.add_binding("x", BindingKind::Let).unwrap();

        let saved = tree.save();
        tree.add_binding("y", BindingKind::Let).unwrap();
        tree.enter_scope(ScopeNodeKind::Block);
        tree.add_binding("z", BindingKind::Let).unwrap();
        tree.restore(&saved);

        // y was discarded so it can be redeclared
        tree.add_binding("y", BindingKind::Let).unwrap();
        assert!(tree.add_binding("x", BindingKind::Let).is_err());
    }
}
