// XPath-style subtree selection.
//
// Panorama scopes configuration under three containers (device-group,
// template, template-stack). A `Scope` renders the fixed absolute path for
// its container; `PathExpr` evaluates such paths against a parsed document.
// Only the restricted grammar the templates need is supported: absolute
// child steps with an optional `[@attr="value"]` predicate.

use tracing::debug;

use crate::error::CoreError;
use crate::xml::{Document, Element, Node};

/// Wrapper root for filtered subtrees, so both sides of the comparison
/// serialize under an identical synthetic parent.
pub const WRAPPER_ROOT: &str = "FilteredResult";

/// Which configuration container to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    DeviceGroup(String),
    Template(String),
    TemplateStack(String),
}

impl Scope {
    /// Pick a scope from the three mutually exclusive CLI inputs.
    ///
    /// Precedence when several are given is device-group, then template,
    /// then template-stack (the first present wins). Returns `None` when
    /// all are absent; callers treat that as a usage error.
    pub fn from_flags(
        device_group: Option<&str>,
        template: Option<&str>,
        template_stack: Option<&str>,
    ) -> Option<Self> {
        if let Some(name) = device_group {
            Some(Self::DeviceGroup(name.to_owned()))
        } else if let Some(name) = template {
            Some(Self::Template(name.to_owned()))
        } else {
            template_stack.map(|name| Self::TemplateStack(name.to_owned()))
        }
    }

    /// The container element name under `devices/entry`.
    pub fn container(&self) -> &'static str {
        match self {
            Self::DeviceGroup(_) => "device-group",
            Self::Template(_) => "template",
            Self::TemplateStack(_) => "template-stack",
        }
    }

    /// The selected entry name.
    pub fn name(&self) -> &str {
        match self {
            Self::DeviceGroup(name) | Self::Template(name) | Self::TemplateStack(name) => name,
        }
    }

    /// Render the fixed path template for this scope.
    pub fn xpath(&self) -> String {
        format!(
            "/response/result/config/devices/entry/{}/entry[@name=\"{}\"]",
            self.container(),
            self.name()
        )
    }
}

// ── Path expressions ────────────────────────────────────────────────

/// One step of a path: element name plus optional attribute predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    name: String,
    predicate: Option<(String, String)>,
}

impl Step {
    fn matches(&self, el: &Element) -> bool {
        if el.name != self.name {
            return false;
        }
        match &self.predicate {
            Some((attr, value)) => el.attr(attr) == Some(value.as_str()),
            None => true,
        }
    }
}

/// A parsed absolute path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    expr: String,
    steps: Vec<Step>,
}

impl PathExpr {
    /// Parse an absolute path of `name` or `name[@attr="value"]` steps.
    pub fn parse(expr: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidSelector {
            expr: expr.to_owned(),
            reason: reason.to_owned(),
        };

        let rest = expr
            .strip_prefix('/')
            .ok_or_else(|| invalid("path must be absolute (start with '/')"))?;
        if rest.is_empty() {
            return Err(invalid("path has no steps"));
        }

        let mut steps = Vec::new();
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(invalid("empty step"));
            }
            steps.push(parse_step(raw).ok_or_else(|| {
                invalid("step must be 'name' or 'name[@attr=\"value\"]'")
            })?);
        }

        Ok(Self {
            expr: expr.to_owned(),
            steps,
        })
    }

    /// The original expression text.
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

fn parse_step(raw: &str) -> Option<Step> {
    let Some((name, pred)) = raw.split_once("[@") else {
        if raw.contains(['[', ']', '@']) {
            return None;
        }
        return Some(Step {
            name: raw.to_owned(),
            predicate: None,
        });
    };

    let pred = pred.strip_suffix("\"]")?;
    let (attr, value) = pred.split_once("=\"")?;
    if name.is_empty() || attr.is_empty() {
        return None;
    }

    Some(Step {
        name: name.to_owned(),
        predicate: Some((attr.to_owned(), value.to_owned())),
    })
}

// ── Evaluation ──────────────────────────────────────────────────────

/// Find the first node matching `path`, consuming the document.
///
/// Depth-first, document-order traversal; the first full-path match wins
/// and later matches are ignored. Returns `None` when nothing matches.
pub fn first_match(doc: Document, path: &PathExpr) -> Option<Element> {
    let found = descend(doc.root, &path.steps);
    match &found {
        Some(_) => debug!(xpath = path.as_str(), "element found"),
        None => debug!(xpath = path.as_str(), "element not found"),
    }
    found
}

fn descend(el: Element, steps: &[Step]) -> Option<Element> {
    let (first, rest) = steps.split_first()?;
    if !first.matches(&el) {
        return None;
    }
    if rest.is_empty() {
        return Some(el);
    }
    for child in el.children {
        if let Node::Element(child) = child {
            if let Some(found) = descend(child, rest) {
                return Some(found);
            }
        }
    }
    None
}

/// Move a matched element under a fresh [`WRAPPER_ROOT`] document.
pub fn wrap(el: Element) -> Document {
    let mut root = Element::new(WRAPPER_ROOT);
    root.children.push(Node::Element(el));
    Document { root }
}
