use std::collections::HashMap;

/// Macro name to replacement text, scoped to one invocation. Lookups are
/// by key only; insertion order is irrelevant.
#[derive(Debug, Default)]
pub struct SymbolTable {
    definitions: HashMap<Vec<u8>, Vec<u8>>,
}

impl SymbolTable {
    /// Install `name -> value`, returning the previous binding if this is
    /// a redefinition so the caller can warn.
    pub fn define(&mut self, name: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        log::debug!(
            "define {:?} -> {:?}",
            String::from_utf8_lossy(&name),
            String::from_utf8_lossy(&value)
        );
        self.definitions.insert(name, value)
    }

    pub fn lookup(&self, name: &[u8]) -> Option<&[u8]> {
        self.definitions.get(name).map(Vec::as_slice)
    }
}
