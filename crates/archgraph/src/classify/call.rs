//! Call-kind classification.
//!
//! Maps call-site shape and resolution state to a [`CallKind`] plus a
//! confidence in `[0, 1]`. Confidence is a certainty score, not a measured
//! probability; the 1/N split across interface implementors is a documented
//! simplifying policy.

use crate::graph::CallKind;
use archgraph_facts::ExpressionShape;

/// Certainty assigned to deferred invocations (lambdas, method references):
/// the call is recorded where it is created, not where it eventually runs.
const DEFERRED_CONFIDENCE: f64 = 0.8;

/// Classify a call site. Never fails.
///
/// `resolved` is whether the target was statically determined;
/// `implementors` is the number of known implementors for interface
/// dispatch (ignored for other shapes). Unresolved call sites always come
/// back as `(Unknown, 0.0)` so they stay countable but are excluded from
/// reachability by default.
pub fn classify_call(
    shape: ExpressionShape,
    resolved: bool,
    implementors: usize,
) -> (CallKind, f64) {
    if !resolved {
        return (CallKind::Unknown, 0.0);
    }
    match shape {
        ExpressionShape::Direct | ExpressionShape::QualifiedThis => (CallKind::Direct, 1.0),
        ExpressionShape::QualifiedSuper => (CallKind::Inherited, 1.0),
        ExpressionShape::Constructor => (CallKind::Constructor, 1.0),
        ExpressionShape::Static => (CallKind::Static, 1.0),
        ExpressionShape::Lambda => (CallKind::Lambda, DEFERRED_CONFIDENCE),
        ExpressionShape::MethodReference => {
            (CallKind::MethodReference, DEFERRED_CONFIDENCE)
        }
        ExpressionShape::InterfaceDispatch => {
            if implementors == 0 {
                (CallKind::Unknown, 0.0)
            } else {
                (CallKind::Interface, 1.0 / implementors as f64)
            }
        }
    }
}
