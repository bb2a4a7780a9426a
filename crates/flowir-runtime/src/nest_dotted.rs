//! `nest_dotted`: turn top-level dotted field names into nested records.
//!
//! `{"a.b":1,"a.c":2,d:3}` becomes `{a:{b:1,c:2},d:3}`. The regrouping only
//! depends on the record's field names, so the plan for each distinct shape
//! is computed once and reused for every record of that shape.

use std::collections::HashMap;
use std::sync::Arc;

use flowir_core::config::IrConfig;

use crate::error::Result;
use crate::value::Value;

/// Ordered field names of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordShape(pub Vec<String>);

impl RecordShape {
    pub fn of(fields: &[(String, Value)]) -> Self {
        RecordShape(fields.iter().map(|(k, _)| k.clone()).collect())
    }
}

#[derive(Debug)]
enum Plan {
    /// No top-level name contains a dot.
    Unchanged,
    Nest(Vec<Node>),
    Conflict(String),
}

#[derive(Debug)]
struct Node {
    name: String,
    kind: NodeKind,
}

#[derive(Debug)]
enum NodeKind {
    /// Position of the source field.
    Leaf(usize),
    Record(Vec<Node>),
}

impl Plan {
    fn build(shape: &RecordShape) -> Plan {
        if !shape.0.iter().any(|name| name.contains('.')) {
            return Plan::Unchanged;
        }
        let mut root: Vec<Node> = Vec::new();
        for (idx, name) in shape.0.iter().enumerate() {
            if let Err(msg) = insert(&mut root, name, idx) {
                return Plan::Conflict(msg);
            }
        }
        Plan::Nest(root)
    }
}

fn insert(root: &mut Vec<Node>, name: &str, idx: usize) -> std::result::Result<(), String> {
    let steps: Vec<&str> = name.split('.').collect();
    let (last, prefix) = match steps.split_last() {
        Some(parts) => parts,
        None => return Ok(()),
    };
    let mut level = root;
    for step in prefix {
        let pos = match level.iter().position(|n| n.name == *step) {
            // A group may only be extended while it is the newest sibling.
            Some(pos) if pos + 1 != level.len() => {
                return Err(format!("unflatten: non-adjacent fields at {:?}", name))
            }
            Some(pos) => pos,
            None => {
                level.push(Node {
                    name: (*step).to_string(),
                    kind: NodeKind::Record(Vec::new()),
                });
                level.len() - 1
            }
        };
        level = match &mut level[pos].kind {
            NodeKind::Record(children) => children,
            NodeKind::Leaf(_) => {
                return Err(format!(
                    "unflatten: field {:?} is both a value and a record",
                    name
                ))
            }
        };
    }
    if level.iter().any(|n| n.name == *last) {
        return Err(format!("unflatten: duplicate field {:?}", name));
    }
    level.push(Node {
        name: (*last).to_string(),
        kind: NodeKind::Leaf(idx),
    });
    Ok(())
}

fn assemble(nodes: &[Node], fields: &[(String, Value)]) -> Value {
    Value::Record(
        nodes
            .iter()
            .map(|n| {
                let v = match &n.kind {
                    NodeKind::Leaf(idx) => fields[*idx].1.clone(),
                    NodeKind::Record(children) => assemble(children, fields),
                };
                (n.name.clone(), v)
            })
            .collect(),
    )
}

/// Stateful `nest_dotted` function with a per-shape plan cache.
///
/// One instance belongs to one stream; it is not shared across threads.
#[derive(Debug, Default)]
pub struct NestDotted {
    plans: HashMap<RecordShape, Arc<Plan>>,
    limit: Option<usize>,
}

impl NestDotted {
    pub fn new(cfg: &IrConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            plans: HashMap::new(),
            limit: cfg.nest_dotted_cache_limit,
        })
    }

    /// Number of cached shapes.
    pub fn cached_shapes(&self) -> usize {
        self.plans.len()
    }

    pub fn call(&mut self, v: &Value) -> Value {
        let fields = match v {
            Value::Record(fields) => fields,
            _ => return v.clone(),
        };
        let plan = self.plan_for(RecordShape::of(fields));
        match plan.as_ref() {
            Plan::Unchanged => v.clone(),
            Plan::Nest(nodes) => assemble(nodes, fields),
            Plan::Conflict(msg) => Value::Error(msg.clone()),
        }
    }

    fn plan_for(&mut self, shape: RecordShape) -> Arc<Plan> {
        if let Some(plan) = self.plans.get(&shape) {
            return Arc::clone(plan);
        }
        if let Some(limit) = self.limit {
            if self.plans.len() >= limit {
                #[cfg(feature = "tracing")]
                tracing::trace!(shapes = self.plans.len(), "nest_dotted cache reset");
                self.plans.clear();
            }
        }
        let plan = Arc::new(Plan::build(&shape));
        self.plans.insert(shape, Arc::clone(&plan));
        plan
    }
}
