//! Nested label-to-parameter serialization of elements and circuits.
//!
//! [`as_mapping`](Piece::as_mapping) renders a tree as a nested mapping with
//! a single top-level key, the node's label. Element bodies are bare numbers
//! (resistance, capacitance, inductance) or a `{T, p}` pair for CPEs; RC and
//! RQ motifs serialize their derived parameter sets `{R, C}` and `{R, T, p}`.
//! Sibling label collisions are resolved by suffixing every colliding label
//! with its occurrence index, so three default-labeled resistors come out as
//! `R1`, `R2`, `R3`. Suffix numbers already taken by another sibling are
//! skipped, keeping one key per child.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::circuit::{Circuit, Piece};
use crate::element::Element;

/// An insertion-ordered label-to-value mapping.
pub type Mapping = IndexMap<String, MappingValue>;

/// A mapping entry: a bare parameter value or a nested parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingValue {
    Number(f64),
    Nested(Mapping),
}

impl fmt::Display for MappingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingValue::Number(value) => write!(f, "{value}"),
            MappingValue::Nested(mapping) => {
                write!(f, "{{")?;
                for (index, (key, value)) in mapping.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Element {
    /// Parameter mapping keyed by this element's label.
    pub fn as_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert(self.label().to_string(), self.mapping_body());
        mapping
    }

    fn mapping_body(&self) -> MappingValue {
        match self {
            Element::Resistor(r) => MappingValue::Number(r.resistance()),
            Element::Capacitor(c) => MappingValue::Number(c.capacitance()),
            Element::Cpe(q) => {
                let mut body = Mapping::new();
                body.insert("T".to_string(), MappingValue::Number(q.t()));
                body.insert("p".to_string(), MappingValue::Number(q.p()));
                MappingValue::Nested(body)
            }
            Element::Inductor(l) => MappingValue::Number(l.inductance()),
        }
    }
}

impl Circuit {
    /// Parameter mapping keyed by this circuit's label.
    pub fn as_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert(self.label(), self.mapping_body());
        mapping
    }

    fn mapping_body(&self) -> MappingValue {
        match self {
            Circuit::Series(s) => MappingValue::Nested(children_mapping(s.pieces())),
            Circuit::Parallel(p) => MappingValue::Nested(children_mapping(p.pieces())),
            Circuit::Rc(rc) => {
                let mut body = Mapping::new();
                body.insert(
                    "R".to_string(),
                    MappingValue::Number(rc.resistor().resistance()),
                );
                body.insert(
                    "C".to_string(),
                    MappingValue::Number(rc.capacitor().capacitance()),
                );
                MappingValue::Nested(body)
            }
            Circuit::Rq(rq) => {
                let mut body = Mapping::new();
                body.insert(
                    "R".to_string(),
                    MappingValue::Number(rq.resistor().resistance()),
                );
                body.insert("T".to_string(), MappingValue::Number(rq.cpe().t()));
                body.insert("p".to_string(), MappingValue::Number(rq.cpe().p()));
                MappingValue::Nested(body)
            }
        }
    }
}

impl Piece {
    /// Parameter mapping keyed by this piece's label.
    pub fn as_mapping(&self) -> Mapping {
        match self {
            Piece::Element(e) => e.as_mapping(),
            Piece::Circuit(c) => c.as_mapping(),
        }
    }

    fn mapping_entry(&self) -> (String, MappingValue) {
        match self {
            Piece::Element(e) => (e.label().to_string(), e.mapping_body()),
            Piece::Circuit(c) => (c.label(), c.mapping_body()),
        }
    }
}

/// Merge child entries into one mapping, suffixing colliding labels with
/// their 1-based occurrence index. A suffixed key that would land on another
/// sibling's label, or on a key already assigned, skips ahead to the next
/// free number, so every child keeps its own entry.
fn children_mapping(pieces: &[Piece]) -> Mapping {
    let entries: Vec<(String, MappingValue)> = pieces.iter().map(Piece::mapping_entry).collect();
    let mut totals: HashMap<String, usize> = HashMap::new();
    for (label, _) in &entries {
        *totals.entry(label.clone()).or_insert(0) += 1;
    }
    let mut occurrence: HashMap<String, usize> = HashMap::new();
    let mut mapping = Mapping::new();
    for (label, body) in entries {
        let collides = totals.get(&label).is_some_and(|n| *n > 1);
        if collides {
            let n = occurrence.entry(label.clone()).or_insert(0);
            let key = loop {
                *n += 1;
                let candidate = format!("{label}{n}");
                if !totals.contains_key(&candidate) && !mapping.contains_key(&candidate) {
                    break candidate;
                }
            };
            mapping.insert(key, body);
        } else {
            mapping.insert(label, body);
        }
    }
    mapping
}
