/// Ordered collection of callable tools
///
/// The registry is built explicitly by its owner and handed to the server.
/// It does not enforce unique names: lookup returns the first tool
/// registered under a name, so earlier registrations shadow later ones.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::tools::Tool;

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Append an already shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        if self.find(tool.name()).is_some() {
            warn!(
                tool = tool.name(),
                "Tool name already registered; the earlier registration wins lookups"
            );
        }
        self.tools.push(tool);
    }

    /// Builder-style `register`
    pub fn with<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.register(tool);
        self
    }

    /// First tool whose name equals `name` exactly
    pub fn find(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Tools in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|tool| tool.name()))
            .finish()
    }
}
