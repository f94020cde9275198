//! Parser for ZView ".mdl" equivalent-circuit model files.
//!
//! The format is line oriented. Every line whose key (the text before the
//! first colon) contains `Type` marks an entry; the code after the colon
//! selects an element or a parallel-group delimiter:
//!
//! | code | meaning            |
//! |------|--------------------|
//! | 1    | resistor           |
//! | 2    | capacitor          |
//! | 3    | inductor           |
//! | 11   | CPE                |
//! | -1   | open parallel group  |
//! | -2   | close parallel group |
//!
//! Element parameters sit at fixed line offsets after the marker: the label
//! at +1, the value at +3 (decimal commas normalized to points) and the
//! fixed/free flag at +4; CPEs carry the exponent at +6 and its flag at +7.
//! Unrecognized codes are skipped. Elements inside an open group combine in
//! parallel, the groups themselves in series, in file order.
//!
//! Any malformed field is a fatal error: the parser never returns a partial
//! tree.

use std::fs;
use std::path::Path;

use log::debug;

use crate::circuit::{parallel, series, Piece};
use crate::element::{Capacitor, Cpe, Element, Inductor, Resistor};
use crate::error::{Result, ZircuitError};

/// Marker substring identifying a type line.
const TYPE_MARKER: &str = "Type";

/// Field line offsets relative to the type marker line.
const NAME_OFFSET: usize = 1;
const VALUE_OFFSET: usize = 3;
const FLAG_OFFSET: usize = 4;
const EXPONENT_OFFSET: usize = 6;
const EXPONENT_FLAG_OFFSET: usize = 7;

/// Code of a leaf element entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementCode {
    Resistor,
    Capacitor,
    Inductor,
    Cpe,
}

/// Decoded type code of a marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeCode {
    Element(ElementCode),
    BeginParallel,
    EndParallel,
}

impl TypeCode {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(TypeCode::Element(ElementCode::Resistor)),
            "2" => Some(TypeCode::Element(ElementCode::Capacitor)),
            "3" => Some(TypeCode::Element(ElementCode::Inductor)),
            "11" => Some(TypeCode::Element(ElementCode::Cpe)),
            "-1" => Some(TypeCode::BeginParallel),
            "-2" => Some(TypeCode::EndParallel),
            _ => None,
        }
    }
}

/// Parse a model file's contents into a circuit tree.
pub fn parse(source: &str) -> Result<Piece> {
    MdlParser::new(source).parse()
}

/// Read and parse a model file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Piece> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|source| ZircuitError::file_read(path.display().to_string(), source))?;
    parse(&source)
}

struct MdlParser<'a> {
    lines: Vec<&'a str>,
}

impl<'a> MdlParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    fn parse(&self) -> Result<Piece> {
        let groups = self.scan_groups()?;
        groups
            .into_iter()
            .filter_map(|group| {
                group
                    .into_iter()
                    .map(Piece::Element)
                    .reduce(|acc, next| parallel(acc, next))
            })
            .reduce(|acc, next| series(acc, next))
            .ok_or(ZircuitError::EmptyModel)
    }

    /// Scan all marker lines and bucket the elements: one group per open
    /// parallel section, a singleton group per ungrouped element.
    fn scan_groups(&self) -> Result<Vec<Vec<Element>>> {
        let mut groups: Vec<Vec<Element>> = Vec::new();
        let mut open: Option<(usize, Vec<Element>)> = None;
        for (index, line) in self.lines.iter().enumerate() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            if !key.contains(TYPE_MARKER) {
                continue;
            }
            let code_text = rest.split(':').next().unwrap_or("").trim();
            let Some(code) = TypeCode::from_code(code_text) else {
                debug!(
                    "skipping unrecognized element type '{}' at line {}",
                    code_text,
                    index + 1
                );
                continue;
            };
            match code {
                TypeCode::BeginParallel => {
                    if open.is_some() {
                        return Err(ZircuitError::parse(
                            index + 1,
                            "parallel group opened inside an open group",
                        ));
                    }
                    open = Some((index + 1, Vec::new()));
                }
                TypeCode::EndParallel => match open.take() {
                    Some((opened_at, group)) => {
                        if group.is_empty() {
                            return Err(ZircuitError::EmptyGroup { line: opened_at });
                        }
                        groups.push(group);
                    }
                    None => return Err(ZircuitError::UnmatchedGroupEnd { line: index + 1 }),
                },
                TypeCode::Element(kind) => {
                    let element = self.element_at(index, kind)?;
                    match open.as_mut() {
                        Some((_, group)) => group.push(element),
                        None => groups.push(vec![element]),
                    }
                }
            }
        }
        if let Some((opened_at, _)) = open {
            return Err(ZircuitError::UnclosedGroup { line: opened_at });
        }
        Ok(groups)
    }

    /// Build the element whose marker sits at `marker` (0-based line index).
    fn element_at(&self, marker: usize, kind: ElementCode) -> Result<Element> {
        let label = self.field(marker, NAME_OFFSET, "name")?.to_string();
        let value = self.number_field(marker, VALUE_OFFSET, "value")?;
        let fixed = self.flag_field(marker, FLAG_OFFSET, "fixed flag")?;
        let element = match kind {
            ElementCode::Resistor => {
                Element::Resistor(Resistor::new(value).with_label(label).with_fixed(fixed))
            }
            ElementCode::Capacitor => {
                Element::Capacitor(Capacitor::new(value).with_label(label).with_fixed(fixed))
            }
            ElementCode::Inductor => {
                Element::Inductor(Inductor::new(value).with_label(label).with_fixed(fixed))
            }
            ElementCode::Cpe => {
                let p = self.number_field(marker, EXPONENT_OFFSET, "exponent")?;
                let p_fixed = self.flag_field(marker, EXPONENT_FLAG_OFFSET, "exponent flag")?;
                Element::Cpe(
                    Cpe::new(value, p)
                        .with_label(label)
                        .with_fixed(fixed, p_fixed),
                )
            }
        };
        Ok(element)
    }

    /// Text between the first and second colon of the line at
    /// `marker + offset`, trimmed.
    fn field(&self, marker: usize, offset: usize, name: &'static str) -> Result<&str> {
        let Some(line) = self.lines.get(marker + offset) else {
            return Err(ZircuitError::missing_field(marker + 1, name));
        };
        let Some((_, rest)) = line.split_once(':') else {
            return Err(ZircuitError::missing_field(marker + 1, name));
        };
        Ok(rest.split(':').next().unwrap_or("").trim())
    }

    fn number_field(&self, marker: usize, offset: usize, name: &'static str) -> Result<f64> {
        let text = self.field(marker, offset, name)?;
        let normalized = text.replace(',', ".");
        normalized
            .parse::<f64>()
            .map_err(|_| ZircuitError::invalid_number(marker + offset + 1, text))
    }

    fn flag_field(&self, marker: usize, offset: usize, name: &'static str) -> Result<bool> {
        let text = self.field(marker, offset, name)?;
        match text {
            "0" => Ok(false),
            "1" | "2" => Ok(true),
            _ => Err(ZircuitError::invalid_flag(marker + offset + 1, text)),
        }
    }
}
