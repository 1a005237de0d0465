use serde::{Deserialize, Serialize};

/// A declared class or interface, as reported by the external analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFact {
    /// Fully-qualified name, e.g. `com.shop.order.OrderService`
    pub qualified_name: String,

    /// Package portion of the qualified name
    pub package: String,

    /// Declaration modifiers ("public", "final", ...)
    pub modifiers: Vec<String>,

    /// Marker annotations without the `@` sigil ("Service", "RestController")
    pub annotations: Vec<String>,

    /// Qualified names of direct superclasses (empty for hierarchy roots)
    pub superclasses: Vec<String>,

    /// Qualified names of implemented interfaces
    pub interfaces: Vec<String>,

    /// Is this an interface declaration?
    pub is_interface: bool,

    /// Is this an abstract class?
    pub is_abstract: bool,

    /// Starting line number (1-indexed)
    pub line_start: usize,

    /// Ending line number (1-indexed)
    pub line_end: usize,
}

impl ClassFact {
    /// Create a class fact from its fully-qualified name.
    ///
    /// The package is derived from the qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let package = qualified_name
            .rsplit_once('.')
            .map(|(pkg, _)| pkg.to_string())
            .unwrap_or_default();
        Self {
            qualified_name,
            package,
            modifiers: Vec::new(),
            annotations: Vec::new(),
            superclasses: Vec::new(),
            interfaces: Vec::new(),
            is_interface: false,
            is_abstract: false,
            line_start: 1,
            line_end: 1,
        }
    }

    /// Simple (unqualified) name of the class.
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// Builder pattern: add a marker annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Builder pattern: add a declaration modifier.
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Builder pattern: add a direct superclass by qualified name.
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclasses.push(superclass.into());
        self
    }

    /// Builder pattern: add an implemented interface by qualified name.
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Builder pattern: mark as an interface declaration.
    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Builder pattern: mark as an abstract class.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Builder pattern: set the declaration line range.
    pub fn with_lines(mut self, start: usize, end: usize) -> Self {
        self.line_start = start;
        self.line_end = end;
        self
    }
}
