use serde::{Deserialize, Serialize};

/// Syntactic shape of a call expression at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionShape {
    /// Plain call on the receiver in scope, `foo()`
    Direct,
    /// Explicitly qualified with `this`, `this.foo()`
    QualifiedThis,
    /// Explicitly qualified with `super`, `super.foo()`
    QualifiedSuper,
    /// Constructor invocation, `new Foo(..)`
    Constructor,
    /// Call issued from inside a lambda body
    Lambda,
    /// Method reference, `Foo::bar`
    MethodReference,
    /// Static call, `Foo.bar()`
    Static,
    /// Call through an interface-typed receiver
    InterfaceDispatch,
}

/// The target of a call site, if the analyzer could determine it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Callee {
    /// Statically determined target
    Resolved {
        /// Qualified name of the class or interface declaring the target
        owner: String,
        /// Method name or canonical signature on that owner
        method: String,
    },
    /// Target cannot be statically determined (reflective or fully dynamic)
    Unresolved {
        /// Source text of the call expression, kept for auditing
        expression: String,
    },
}

impl Callee {
    /// Shorthand for a resolved callee.
    pub fn resolved(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Resolved {
            owner: owner.into(),
            method: method.into(),
        }
    }

    /// Shorthand for an unresolved callee.
    pub fn unresolved(expression: impl Into<String>) -> Self {
        Self::Unresolved {
            expression: expression.into(),
        }
    }

    /// Whether the target was statically determined.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Callee::Resolved { .. })
    }
}

/// A single call site observed in a method body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSiteFact {
    /// Qualified name of the class owning the calling method
    pub caller_owner: String,

    /// Canonical signature of the calling method
    pub caller_signature: String,

    /// Call target, resolved or not
    pub callee: Callee,

    /// Shape of the call expression
    pub shape: ExpressionShape,

    /// Line number of the call site (1-indexed)
    pub line: usize,
}

impl CallSiteFact {
    /// Create a call-site fact.
    pub fn new(
        caller_owner: impl Into<String>,
        caller_signature: impl Into<String>,
        callee: Callee,
        shape: ExpressionShape,
    ) -> Self {
        Self {
            caller_owner: caller_owner.into(),
            caller_signature: caller_signature.into(),
            callee,
            shape,
            line: 1,
        }
    }

    /// Builder pattern: set the call-site line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_shorthand() {
        let callee = Callee::resolved("com.shop.Cart", "total");
        assert!(callee.is_resolved());
    }

    #[test]
    fn test_unresolved_shorthand() {
        let callee = Callee::unresolved("method.invoke(target)");
        assert!(!callee.is_resolved());
    }

    #[test]
    fn test_call_site_builder() {
        let call = CallSiteFact::new(
            "com.shop.OrderService",
            "placeOrder(Cart)",
            Callee::resolved("com.shop.Cart", "total"),
            ExpressionShape::Direct,
        )
        .at_line(37);
        assert_eq!(call.line, 37);
    }
}
