//! Text edge list handling for graph data

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{ReorderError, Result};
use crate::graph::{Edge, EdgeList, EdgeListBuilder, VertexId};

/// Load an edge list from a file, streaming it line by line
pub fn load_edge_list(path: impl AsRef<Path>, weighted: bool) -> Result<EdgeList> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path)?;
    let graph = read_edge_list(BufReader::new(file), weighted)?;

    log::info!(
        "Loaded {} edges over {} vertices",
        graph.edge_count(),
        graph.vertex_count()
    );
    Ok(graph)
}

/// Parse `src dst` or `src dst weight` lines
///
/// Blank lines are skipped. Any other line must carry exactly two fields
/// (three when `weighted`), and both endpoints must be non-negative integers.
pub fn read_edge_list(mut reader: impl BufRead, weighted: bool) -> Result<EdgeList> {
    let mut builder = EdgeListBuilder::default().weighted(weighted);
    let expected = if weighted { 3 } else { 2 };

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = std::str::from_utf8(&buf).map_err(|_| {
            ReorderError::malformed(line_no, &String::from_utf8_lossy(&buf), "invalid UTF-8")
        })?;

        let mut fields = line.split_whitespace();
        let Some(src) = fields.next() else {
            continue;
        };
        let dst = fields.next();
        let weight = if weighted { fields.next() } else { None };
        let found = 1 + dst.is_some() as usize + weight.is_some() as usize + fields.count();
        if found != expected {
            return Err(ReorderError::malformed(
                line_no,
                line,
                format!("expected {} fields, found {}", expected, found),
            ));
        }

        let src = parse_vertex(src, line_no, line, "source")?;
        let dst = parse_vertex(dst.unwrap_or_default(), line_no, line, "destination")?;
        match weight {
            Some(w) => builder.add_weighted_edge(src, dst, w),
            None => builder.add_edge(src, dst),
        }
    }

    Ok(builder.build())
}

fn parse_vertex(field: &str, line_no: usize, line: &str, role: &str) -> Result<VertexId> {
    field.parse::<VertexId>().map_err(|e| {
        ReorderError::malformed(line_no, line, format!("invalid {} vertex {:?}: {}", role, field, e))
    })
}

/// Write edges in the same grammar they were read in
pub fn write_edge_list<'a>(
    mut writer: impl Write,
    edges: impl IntoIterator<Item = &'a Edge>,
) -> Result<()> {
    for edge in edges {
        match &edge.weight {
            Some(w) => writeln!(writer, "{} {} {}", edge.src, edge.dst, w)?,
            None => writeln!(writer, "{} {}", edge.src, edge.dst)?,
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write the two-column form of the edges, dropping weights
pub fn write_pairs<'a>(
    mut writer: impl Write,
    edges: impl IntoIterator<Item = &'a Edge>,
) -> Result<()> {
    for edge in edges {
        writeln!(writer, "{} {}", edge.src, edge.dst)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_utf8() {
        match read_edge_list(&b"0 1\n1 \xff\n"[..], false) {
            Err(ReorderError::MalformedInput { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "invalid UTF-8");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    fn parse(text: &str, weighted: bool) -> Result<EdgeList> {
        read_edge_list(text.as_bytes(), weighted)
    }

    #[test]
    fn parses_unweighted_lines() {
        let graph = parse("0 1\n1 2\n2 0\n", false).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edges[1], Edge::new(1, 2));
    }

    #[test]
    fn weight_tokens_survive_verbatim() {
        let graph = parse("0 1 007\n1 0 -3.50\n", true).unwrap();
        let mut out = Vec::new();
        write_edge_list(&mut out, &graph.edges).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 1 007\n1 0 -3.50\n");
    }

    #[test]
    fn tabs_and_blank_lines_are_tolerated() {
        let graph = parse("3\t4\n\n  \n4   3\n", false).unwrap();
        assert_eq!(graph.edges, vec![Edge::new(3, 4), Edge::new(4, 3)]);
    }

    #[test]
    fn missing_last_line_terminator() {
        let graph = parse("0 1\n1 0", false).unwrap();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn rejects_non_integer_endpoints() {
        let err = parse("0 1\nabc def\n", false).unwrap_err();
        match err {
            ReorderError::MalformedInput { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "abc def");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert!(matches!(
            parse("0\n", false),
            Err(ReorderError::MalformedInput { line: 1, .. })
        ));
        assert!(matches!(
            parse("0 1\n", true),
            Err(ReorderError::MalformedInput { line: 1, .. })
        ));
        assert!(matches!(
            parse("0 1 5\n", false),
            Err(ReorderError::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_negative_ids() {
        assert!(matches!(
            parse("-1 2\n", false),
            Err(ReorderError::MalformedInput { .. })
        ));
    }

    #[test]
    fn pairs_drop_weights() {
        let graph = parse("0 1 9\n1 2 8\n", true).unwrap();
        let mut out = Vec::new();
        write_pairs(&mut out, &graph.edges).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 1\n1 2\n");
    }
}
