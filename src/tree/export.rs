//! Text and Graphviz renderings of a tree.

use super::arena::Tree;
use crate::core::error::Result;
use crate::core::types::NodeRef;
use crate::io::counting::CountingWriter;
use crate::stats::TargetStats;
use std::io::Write;

const DOT_HEADER: &str = "digraph ht {\n  edge [fontsize=10];\n  node [fontsize=10,shape=box];\n\n";

impl<S: TargetStats> Tree<S> {
    /// Writes one line per reachable node, children indented by a tab.
    /// Returns the number of bytes written.
    pub fn write_text<W: Write>(&self, w: W) -> Result<u64> {
        let mut w = CountingWriter::new(w);
        self.text_node(&mut w, self.root, "", "ROOT")?;
        w.flush()?;
        Ok(w.count())
    }

    fn text_node<W: Write>(&self, w: &mut W, node_ref: NodeRef, indent: &str, name: &str) -> Result<()> {
        let Some(node) = self.get(node_ref) else {
            return Ok(());
        };
        writeln!(w, "{}{} [weight:{:.0}]", indent, name, node.weight())?;

        let Some(split) = node.as_split() else {
            return Ok(());
        };
        let Some(feature) = self.model.feature(&split.feature) else {
            return Ok(());
        };

        let indent = format!("{}\t", indent);
        for (index, &child) in split.children.iter() {
            self.text_node(w, child, &indent, &split.condition(feature, index))?;
        }
        Ok(())
    }

    /// Writes the tree as a Graphviz digraph. Returns the number of bytes
    /// written.
    pub fn write_dot<W: Write>(&self, w: W) -> Result<u64> {
        let mut w = CountingWriter::new(w);
        w.write_all(DOT_HEADER.as_bytes())?;
        self.dot_node(&mut w, self.root, "N")?;
        w.write_all(b"}\n")?;
        w.flush()?;
        Ok(w.count())
    }

    fn dot_node<W: Write>(&self, w: &mut W, node_ref: NodeRef, name: &str) -> Result<()> {
        let Some(node) = self.get(node_ref) else {
            return Ok(());
        };
        writeln!(w, "  {} [label=\"weight: {:.0}\"];", name, node.weight())?;

        let Some(split) = node.as_split() else {
            return Ok(());
        };
        let Some(feature) = self.model.feature(&split.feature) else {
            return Ok(());
        };

        for (index, &child) in split.children.iter() {
            let child_name = format!("{}_{}", name, index);
            let label = split.condition(feature, index).replace('"', "\\\"");
            writeln!(w, "  {} -> {} [label=\"{}\"];", name, child_name, label)?;
            self.dot_node(w, child, &child_name)?;
        }
        Ok(())
    }
}
