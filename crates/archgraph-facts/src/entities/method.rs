use serde::{Deserialize, Serialize};

/// A declared method, as reported by the external analyzer.
///
/// The signature is kept canonical (`name(ParamType,ParamType)`) so the
/// engine can derive a stable method identifier from owner + signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFact {
    /// Canonical signature, e.g. `placeOrder(Cart,User)`
    pub signature: String,

    /// Method name
    pub name: String,

    /// Qualified name of the owning class
    pub owner: String,

    /// Declaration modifiers ("public", "static", ...)
    pub modifiers: Vec<String>,

    /// Marker annotations without the `@` sigil
    pub annotations: Vec<String>,

    /// Return type (source-level spelling)
    pub return_type: String,

    /// Parameter types in declaration order
    pub parameter_types: Vec<String>,

    /// Cyclomatic complexity, at least 1
    pub complexity: u32,

    /// Lines of code in the body
    pub lines_of_code: u32,

    /// Starting line number (1-indexed)
    pub line_start: usize,

    /// Ending line number (1-indexed)
    pub line_end: usize,
}

impl MethodFact {
    /// Create a method fact for `owner.name()` with no parameters.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            signature: format!("{name}()"),
            name,
            owner: owner.into(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            return_type: "void".to_string(),
            parameter_types: Vec::new(),
            complexity: 1,
            lines_of_code: 0,
            line_start: 1,
            line_end: 1,
        }
    }

    /// Builder pattern: set the parameter types and refresh the signature.
    pub fn with_parameters(mut self, types: &[&str]) -> Self {
        self.parameter_types = types.iter().map(|t| t.to_string()).collect();
        self.signature = format!("{}({})", self.name, self.parameter_types.join(","));
        self
    }

    /// Builder pattern: set the return type.
    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Builder pattern: add a declaration modifier.
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Builder pattern: add a marker annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Builder pattern: set cyclomatic complexity (clamped to at least 1).
    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity.max(1);
        self
    }

    /// Builder pattern: set lines of code.
    pub fn with_lines_of_code(mut self, loc: u32) -> Self {
        self.lines_of_code = loc;
        self
    }

    /// Builder pattern: set the declaration line range.
    pub fn with_lines(mut self, start: usize, end: usize) -> Self {
        self.line_start = start;
        self.line_end = end;
        self
    }

    /// Whether the method carries the given modifier.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }
}
