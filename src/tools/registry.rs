use super::base::ToolSpec;

/// Process-lifetime catalog of available tools, in registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Inserts the tool, replacing any existing entry with the same name.
    /// A replaced tool keeps its original position in the catalog.
    pub fn register(&mut self, tool: ToolSpec) {
        if let Some(slot) = self
            .tools
            .iter_mut()
            .find(|existing| existing.name() == tool.name())
        {
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Non-throwing lookup; unknown names return `None`.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Snapshot of `(name, description)` pairs for help display. The returned
    /// vector is detached from the registry's internal state.
    pub fn list(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|tool| (tool.name().to_string(), tool.description().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRegistry;
    use crate::tools::base::ToolSpec;

    fn named_tool(name: &str, description: &str) -> ToolSpec {
        ToolSpec::builder(name, description).build(|_| Ok(String::new()))
    }

    #[test]
    fn get_returns_registered_tool_and_none_for_unknown_names() {
        let mut registry = ToolRegistry::new();
        registry.register(named_tool("calculator", "Performs basic arithmetic calculations"));

        let tool = registry.get("calculator").expect("registered tool");
        assert_eq!(tool.description(), "Performs basic arithmetic calculations");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn register_overwrites_existing_entry_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(named_tool("first", "one"));
        registry.register(named_tool("second", "two"));
        registry.register(named_tool("first", "replaced"));

        assert_eq!(
            registry.list(),
            vec![
                ("first".to_string(), "replaced".to_string()),
                ("second".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn list_snapshot_is_detached_from_the_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(named_tool("first", "one"));

        let mut snapshot = registry.list();
        snapshot.clear();

        assert_eq!(registry.list().len(), 1);
    }
}
