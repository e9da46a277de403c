//! Permutation file format: one new id per line, line index is the old id

use std::io::{BufRead, Write};

use crate::error::{ReorderError, Result};
use crate::graph::VertexId;
use crate::permutation::Permutation;

/// Read the new ids of an order file, in line order
pub fn read_order(mut reader: impl BufRead) -> Result<Vec<VertexId>> {
    let mut order = Vec::new();
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

        let id = line.trim().parse::<VertexId>().map_err(|e| {
            ReorderError::malformed(line_no, line, format!("invalid vertex id: {}", e))
        })?;
        order.push(id);
    }
    Ok(order)
}

/// Write a permutation over a contiguous id space
pub fn write_order(mut writer: impl Write, perm: &Permutation) -> Result<()> {
    for new in perm.to_order()? {
        writeln!(writer, "{}", new)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_one_id_per_line() {
        assert_eq!(read_order("2\n0\r\n1".as_bytes()).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn blank_line_is_malformed() {
        assert!(matches!(
            read_order("2\n\n1\n".as_bytes()),
            Err(ReorderError::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(matches!(
            read_order(&b"0\n\xff\n1\n"[..]),
            Err(ReorderError::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn writes_images_by_old_id() {
        let perm = Permutation::from_order(vec![1, 2, 0]).unwrap();
        let mut out = Vec::new();
        write_order(&mut out, &perm).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n0\n");
    }
}
