//! Short-name generation for the renaming passes

use std::collections::HashSet;

/// Generates the compact replacement names used by the renaming passes:
/// a prefix followed by a hexadecimal counter (`_0`, `_1`, ... `_a`, ...
/// `_10`, ...). Names in the reserved set are skipped.
pub struct MinifiedNameGenerator {
    prefix: String,
    reserved_names: HashSet<String>,
    name_count: usize,
}

impl MinifiedNameGenerator {
    /// Create a generator with the given prefix and reserved names.
    pub fn new(prefix: &str, reserved_names: HashSet<String>) -> Self {
        Self {
            prefix: prefix.to_string(),
            reserved_names,
            name_count: 0,
        }
    }

    /// Generates the next short name.
    pub fn generate_next_name(&mut self) -> String {
        loop {
            let name = format!("{}{:x}", self.prefix, self.name_count);
            self.name_count += 1;
            if !self.reserved_names.contains(&name) {
                return name;
            }
        }
    }
}
