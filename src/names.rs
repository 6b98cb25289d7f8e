use std::collections::BTreeMap;

/// Display names attached to netlist nodes, keyed by node id.
///
/// Absence of an entry means the node is unnamed. Names are not required to be unique.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NameTable {
    names: BTreeMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Sets the name of `id`. An empty name removes the entry.
    pub fn set(&mut self, id: u32, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            self.names.remove(&id);
        } else {
            self.names.insert(id, name);
        }
    }

    /// Iterates over `(id, name)` pairs in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(&id, name)| (id, name.as_str()))
    }

    /// Rebuilds the table through an old-id to new-id map, dropping unmapped entries.
    pub(crate) fn remap(&self, map: impl Fn(u32) -> Option<u32>) -> Self {
        let names = self
            .names
            .iter()
            .filter_map(|(&id, name)| map(id).map(|new| (new, name.clone())))
            .collect();
        Self { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut names = NameTable::new();
        assert!(names.is_empty());
        names.set(3, "clk");
        names.set(1, "rst");
        assert_eq!(names.get(3), Some("clk"));
        assert_eq!(names.get(2), None);
        assert_eq!(names.iter().collect::<Vec<_>>(), vec![(1, "rst"), (3, "clk")]);
    }

    #[test]
    fn test_empty_name_removes() {
        let mut names = NameTable::new();
        names.set(1, "a");
        names.set(1, "");
        assert_eq!(names.get(1), None);
        assert_eq!(names.len(), 0);
    }

    #[test]
    fn test_remap() {
        let mut names = NameTable::new();
        names.set(1, "a");
        names.set(2, "b");
        names.set(5, "c");
        let remapped = names.remap(|id| if id == 2 { None } else { Some(id * 10) });
        assert_eq!(remapped.iter().collect::<Vec<_>>(), vec![(10, "a"), (50, "c")]);
    }
}
