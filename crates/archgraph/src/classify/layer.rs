//! Architectural-layer classification.
//!
//! An ordered cascade of signal passes, evaluated strictly in priority order
//! and stopping at the first match: marker annotations, then package
//! keywords, then simple-name suffixes, then the direct-superclass heuristic,
//! then `Unknown`. There is no scoring or voting across passes.
//!
//! Each pass walks a static table in order, so the first table entry that
//! matches wins ties within a pass as well.

use crate::graph::Layer;
use archgraph_facts::{ClassFact, MethodFact};

/// Marker annotations (declarative intent, highest confidence).
const ANNOTATION_MARKERS: &[(&str, Layer)] = &[
    ("RestController", Layer::Controller),
    ("Controller", Layer::Controller),
    ("Service", Layer::Service),
    ("Repository", Layer::Repository),
    ("Mapper", Layer::Mapper),
    ("Entity", Layer::Entity),
    ("Table", Layer::Entity),
    ("Document", Layer::Entity),
    ("Configuration", Layer::Config),
    ("ConfigurationProperties", Layer::Config),
    ("Component", Layer::Component),
];

/// Package-name keywords, matched case-insensitively as substrings.
const PACKAGE_KEYWORDS: &[(&str, Layer)] = &[
    ("controller", Layer::Controller),
    ("web", Layer::Controller),
    ("service", Layer::Service),
    ("repository", Layer::Repository),
    ("dao", Layer::Repository),
    ("mapper", Layer::Mapper),
    ("entity", Layer::Entity),
    ("domain", Layer::Entity),
    ("model", Layer::Entity),
    ("util", Layer::Util),
    ("config", Layer::Config),
];

/// Simple-name suffixes. More specific suffixes come first.
const NAME_SUFFIXES: &[(&str, Layer)] = &[
    ("Controller", Layer::Controller),
    ("ServiceImpl", Layer::Service),
    ("Service", Layer::Service),
    ("Repository", Layer::Repository),
    ("Dao", Layer::Repository),
    ("Mapper", Layer::Mapper),
    ("Entity", Layer::Entity),
    ("Utils", Layer::Util),
    ("Util", Layer::Util),
    ("Helper", Layer::Util),
    ("Configuration", Layer::Config),
    ("Config", Layer::Config),
];

/// Direct-superclass name hints, the weakest signal.
const SUPERCLASS_HINTS: &[(&str, Layer)] = &[
    ("Controller", Layer::Controller),
    ("Service", Layer::Service),
    ("Repository", Layer::Repository),
    ("Dao", Layer::Repository),
    ("Mapper", Layer::Mapper),
    ("Entity", Layer::Entity),
];

type Pass = fn(&ClassFact) -> Option<Layer>;

/// Classify a class into an architectural layer. Never fails.
pub fn classify_class(fact: &ClassFact) -> Layer {
    const CASCADE: &[Pass] = &[by_annotation, by_package, by_suffix, by_superclass];
    for pass in CASCADE {
        if let Some(layer) = pass(fact) {
            return layer;
        }
    }
    Layer::Unknown
}

/// Classify a method: a method-level marker annotation overrides, otherwise
/// the owning class's layer is inherited. Never fails.
pub fn classify_method(fact: &MethodFact, owner_layer: Layer) -> Layer {
    for (marker, layer) in ANNOTATION_MARKERS {
        if fact.annotations.iter().any(|a| a == marker) {
            return *layer;
        }
    }
    owner_layer
}

fn by_annotation(fact: &ClassFact) -> Option<Layer> {
    for (marker, layer) in ANNOTATION_MARKERS {
        if fact.annotations.iter().any(|a| a == marker) {
            return Some(*layer);
        }
    }
    None
}

fn by_package(fact: &ClassFact) -> Option<Layer> {
    let package = fact.package.to_lowercase();
    for (keyword, layer) in PACKAGE_KEYWORDS {
        if package.contains(keyword) {
            return Some(*layer);
        }
    }
    None
}

fn by_suffix(fact: &ClassFact) -> Option<Layer> {
    let name = fact.simple_name();
    for (suffix, layer) in NAME_SUFFIXES {
        if name.ends_with(suffix) {
            return Some(*layer);
        }
    }
    None
}

fn by_superclass(fact: &ClassFact) -> Option<Layer> {
    for superclass in &fact.superclasses {
        let simple = superclass.rsplit('.').next().unwrap_or(superclass);
        for (hint, layer) in SUPERCLASS_HINTS {
            if simple.ends_with(hint) {
                return Some(*layer);
            }
        }
    }
    None
}
