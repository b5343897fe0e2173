
use std::collections::HashMap;

use tracing::debug;

use super::error::RegistryError;
use super::symbol::*;

/*
 * The set of admissible terminals, read from a coding table
 * (one `<code> <name>` pair per line). It is loaded exactly once.
 */
#[derive(Debug, Default)]
pub struct TerminalRegistry {
    allowed: HashMap<String, Terminal>,
}

impl TerminalRegistry {
    pub fn new() -> TerminalRegistry {
        TerminalRegistry {allowed: HashMap::new()}
    }

    pub fn register_all(&mut self, coding_table: &str) -> Result<(), RegistryError> {
        if self.is_loaded() {
            return Err(RegistryError::AlreadyLoaded)
        }

        let mut allowed = HashMap::new();

        for (i, line) in coding_table.lines().enumerate() {
            let line_no = i + 1;
            let malformed = |reason: String| RegistryError::Malformed {line: line_no, reason};

            let mut words = line.split_whitespace();
            let (code, name) = match (words.next(), words.next(), words.next()) {
                (None, _, _) => continue,
                (Some(code), Some(name), None) => (code, name),
                _ => return Err(malformed("expected `<code> <name>`".to_string())),
            };

            let code = code.parse::<i32>()
                .map_err(|_| malformed(format!("invalid code `{}`", code)))?;

            if name == EOF_NAME || allowed.contains_key(name) {
                return Err(malformed(format!("terminal `{}` is declared twice", name)))
            }
            allowed.insert(name.to_string(), Terminal::new(name, code));
        }

        if allowed.is_empty() {
            return Err(RegistryError::Malformed {line: 0, reason: "no terminal declared".to_string()})
        }

        allowed.insert(EOF_NAME.to_string(), Terminal::eof());
        debug!(count = allowed.len(), "registered terminals");
        self.allowed = allowed;

        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        !self.allowed.is_empty()
    }

    pub fn resolve(&self, name: &str) -> Result<Terminal, RegistryError> {
        self.allowed.get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnregisteredSymbol(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CODING_TABLE: &str = "1 int\n2 return\n\n51 id\n52 IntConst\n";

    #[test]
    fn resolve_fails_before_loading() {
        let registry = TerminalRegistry::new();
        assert_eq!(
            registry.resolve("int"),
            Err(RegistryError::UnregisteredSymbol("int".to_string()))
        );
    }

    #[test]
    fn resolve_after_loading() {
        let mut registry = TerminalRegistry::new();
        registry.register_all(CODING_TABLE).unwrap();

        let int = registry.resolve("int").unwrap();
        assert_eq!(int.name(), "int");
        assert_eq!(int.code(), 1);
        assert_eq!(registry.resolve("int").unwrap(), int);
        assert!(registry.resolve("$").unwrap().is_eof());
        assert_eq!(
            registry.resolve("float"),
            Err(RegistryError::UnregisteredSymbol("float".to_string()))
        );
    }

    #[test]
    fn loading_twice_fails() {
        let mut registry = TerminalRegistry::new();
        registry.register_all(CODING_TABLE).unwrap();
        assert_eq!(registry.register_all(CODING_TABLE), Err(RegistryError::AlreadyLoaded));
    }

    #[test]
    fn malformed_tables_are_rejected() {
        let cases = [
            ("1 int extra", 1),
            ("1 int\nx return", 2),
            ("1 int\n2 int", 2),
            ("int", 1),
        ];

        for (table, line) in cases.iter() {
            match TerminalRegistry::new().register_all(table) {
                Err(RegistryError::Malformed {line: l, ..}) => assert_eq!(l, *line, "{:?}", table),
                other => panic!("{:?} was accepted: {:?}", table, other),
            }
        }
    }
}
