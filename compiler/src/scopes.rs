use std::collections::HashMap;

use vm::specs::WORD;

use crate::types::{Symbol, VarType};

/// Names declared in one frame. Offsets grow by one word per declaration and
/// start at one word, so the first variable sits right below the saved base
/// pointer.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    frame_size: u32,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh slot for `name`. Redeclaring a name points it at the
    /// new slot; the old one stays allocated. Returns `None` once the frame
    /// no longer fits an `i32` operand.
    pub fn declare(&mut self, name: &str, ty: VarType) -> Option<Symbol> {
        let offset = self.frame_size.checked_add(WORD as u32)?;
        i32::try_from(offset).ok()?;
        self.frame_size = offset;

        let symbol = Symbol { ty, offset };
        self.symbols.insert(name.to_string(), symbol);
        Some(symbol)
    }

    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Bytes needed to hold every slot handed out so far.
    pub fn frame_size(&self) -> u32 {
        self.frame_size
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
        self.frame_size = 0;
    }
}

/// The two scopes a statement can see: the script's globals, and the locals of
/// the function being defined. Inside a function only its locals are visible.
#[derive(Debug, Default, Clone)]
pub struct Scopes {
    pub globals: SymbolTable,
    pub locals: SymbolTable,
    in_function: bool,
}

impl Scopes {
    pub fn in_function(&self) -> bool {
        self.in_function
    }

    pub fn enter_function(&mut self) {
        self.locals.clear();
        self.in_function = true;
    }

    pub fn leave_function(&mut self) {
        self.locals.clear();
        self.in_function = false;
    }

    /// The table new declarations go into and names resolve against.
    pub fn current(&self) -> &SymbolTable {
        if self.in_function {
            &self.locals
        } else {
            &self.globals
        }
    }

    pub fn current_mut(&mut self) -> &mut SymbolTable {
        if self.in_function {
            &mut self.locals
        } else {
            &mut self.globals
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_start_one_word_down() {
        let mut table = SymbolTable::new();
        assert_eq!(table.declare("a", VarType::Int).unwrap().offset, 4);
        assert_eq!(table.declare("b", VarType::Float).unwrap().offset, 8);
        assert_eq!(table.frame_size(), 8);
    }

    #[test]
    fn redeclaration_takes_a_new_slot() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Int);
        table.declare("x", VarType::Float);
        assert_eq!(
            table.resolve("x"),
            Some(Symbol {
                ty: VarType::Float,
                offset: 8
            })
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.frame_size(), 8);
    }

    #[test]
    fn locals_hide_globals() {
        let mut scopes = Scopes::default();
        scopes.current_mut().declare("g", VarType::Int);

        scopes.enter_function();
        assert!(scopes.current().resolve("g").is_none());
        scopes.current_mut().declare("l", VarType::Int);
        assert_eq!(scopes.current().resolve("l").unwrap().offset, 4);

        scopes.leave_function();
        assert!(scopes.current().resolve("l").is_none());
        assert!(scopes.current().resolve("g").is_some());
    }
}
