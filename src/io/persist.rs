//! Tree persistence.
//!
//! A stored tree is a varint body length followed by the body fields:
//!
//! | Field | Wire type | Payload |
//! |-------|-----------|---------|
//! | 1 | length-delimited | bincode model |
//! | 2 | length-delimited | UTF-8 target name |
//! | 3 | varint | root reference |
//! | 4 | length-delimited | bincode node, repeated in arena order |

use super::counting::{CountingReader, CountingWriter};
use super::wire::{expect_wire, put_varint, read_varint, unexpected_eof, FieldReader, FieldWriter, WireType};
use crate::core::error::{HoeffdingError, Result};
use crate::core::types::{NodeRef, NO_NODE};
use crate::model::Model;
use crate::stats::TargetStats;
use crate::tree::{Node, Tree};
use crate::{ensure, serialization_error};
use bincode::Options;
use std::io::{Read, Write};

const FIELD_MODEL: u64 = 1;
const FIELD_TARGET: u64 = 2;
const FIELD_ROOT: u64 = 3;
const FIELD_NODE: u64 = 4;

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
}

impl<S: TargetStats> Tree<S> {
    /// Writes the tree to `w`, returning the number of bytes written.
    pub fn write_to<W: Write>(&self, w: W) -> Result<u64> {
        let mut fields = FieldWriter::new();
        fields.bytes(FIELD_MODEL, &codec().serialize(&self.model)?);
        fields.bytes(FIELD_TARGET, self.target.as_bytes());
        fields.varint(FIELD_ROOT, self.root as u64);
        for node in &self.nodes {
            fields.bytes(FIELD_NODE, &codec().serialize(node)?);
        }

        let mut header = Vec::with_capacity(10);
        put_varint(&mut header, fields.as_bytes().len() as u64);

        let mut w = CountingWriter::new(w);
        w.write_all(&header)?;
        w.write_all(fields.as_bytes())?;
        w.flush()?;
        Ok(w.count())
    }

    /// Reads a tree written by [`Tree::write_to`], returning it together
    /// with the number of bytes consumed.
    pub fn read_from<R: Read>(r: R) -> Result<(Self, u64)> {
        let mut r = CountingReader::new(r);
        let len = read_varint(&mut r)?.ok_or_else(unexpected_eof)?;

        let mut body = Vec::new();
        (&mut r).take(len).read_to_end(&mut body)?;
        if (body.len() as u64) < len {
            return Err(unexpected_eof());
        }

        let mut model: Option<Model> = None;
        let mut target: Option<String> = None;
        let mut root = NO_NODE;
        let mut nodes: Vec<Node<S>> = Vec::new();

        let mut fields = FieldReader::new(&body);
        while let Some((tag, wire)) = fields.key()? {
            match tag {
                FIELD_MODEL => {
                    expect_wire(tag, wire, WireType::LengthDelimited)?;
                    model = Some(codec().deserialize(fields.bytes()?)?);
                }
                FIELD_TARGET => {
                    expect_wire(tag, wire, WireType::LengthDelimited)?;
                    let name = std::str::from_utf8(fields.bytes()?)
                        .map_err(|e| serialization_error!("invalid target name: {}", e))?;
                    target = Some(name.to_string());
                }
                FIELD_ROOT => {
                    expect_wire(tag, wire, WireType::Varint)?;
                    root = usize::try_from(fields.varint()?)
                        .map_err(|_| HoeffdingError::serialization("root reference out of range"))?;
                }
                FIELD_NODE => {
                    expect_wire(tag, wire, WireType::LengthDelimited)?;
                    nodes.push(codec().deserialize(fields.bytes()?)?);
                }
                _ => return Err(HoeffdingError::UnexpectedField { tag }),
            }
        }

        let model = model.ok_or_else(|| HoeffdingError::serialization("missing model field"))?;
        let target = target.ok_or_else(|| HoeffdingError::serialization("missing target field"))?;
        let tree = Tree {
            model,
            target,
            root,
            nodes,
        };
        check_topology(&tree)?;
        Ok((tree, r.count()))
    }
}

/// Every split child must resolve and every node must be reachable from the
/// root along at most one path.
fn check_topology<S: TargetStats>(tree: &Tree<S>) -> Result<()> {
    ensure!(
        tree.get(tree.root).is_some(),
        serialization_error!("root reference {} does not resolve", tree.root)
    );

    let mut seen = vec![false; tree.len()];
    let mut pending: Vec<NodeRef> = vec![tree.root];
    while let Some(node_ref) = pending.pop() {
        let slot = &mut seen[node_ref - 1];
        ensure!(
            !*slot,
            serialization_error!("node {} is reachable along more than one path", node_ref)
        );
        *slot = true;

        if let Some(split) = tree.get(node_ref).and_then(Node::as_split) {
            for (branch, &child) in split.children.iter() {
                ensure!(
                    tree.get(child).is_some(),
                    serialization_error!(
                        "child {} of node {} branch {} does not resolve",
                        child,
                        node_ref,
                        branch
                    )
                );
                pending.push(child);
            }
        }
    }
    Ok(())
}
