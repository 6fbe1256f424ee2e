//! Binary interop with the kernel test harness.
//!
//! Two file shapes are involved: raw little-endian f32 tensor dumps (the
//! harness's `boxes.bin` / `scores.bin`) and the selected-indices record
//! stream — a u64 record count followed by `count` triples of i64 values,
//! all little-endian, with no padding between records.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::batch::SelectedIndex;
use crate::util::{NmsError, NmsResult};

/// Reads a raw little-endian f32 tensor file into a flat buffer.
pub fn read_f32_tensor<P: AsRef<Path>>(path: P) -> NmsResult<Vec<f32>> {
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        return Err(NmsError::RaggedTensorFile { len: bytes.len() });
    }
    let mut out = Vec::with_capacity(bytes.len() / 4);
    for chunk in bytes.chunks_exact(4) {
        out.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    Ok(out)
}

/// Writes a flat buffer as a raw little-endian f32 tensor file.
pub fn write_f32_tensor<P: AsRef<Path>>(path: P, data: &[f32]) -> NmsResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in data {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the selected-indices record stream.
pub fn write_selected_indices<W: Write>(
    writer: &mut W,
    selected: &[SelectedIndex],
) -> NmsResult<()> {
    writer.write_all(&(selected.len() as u64).to_le_bytes())?;
    for record in selected {
        writer.write_all(&record.batch.to_le_bytes())?;
        writer.write_all(&record.class.to_le_bytes())?;
        writer.write_all(&record.box_index.to_le_bytes())?;
    }
    Ok(())
}

/// Reads a selected-indices record stream written by
/// [`write_selected_indices`] (or the original harness).
pub fn read_selected_indices<R: Read>(reader: &mut R) -> NmsResult<Vec<SelectedIndex>> {
    let mut count_bytes = [0u8; 8];
    reader.read_exact(&mut count_bytes)?;
    let count = u64::from_le_bytes(count_bytes);

    let mut out = Vec::new();
    let mut record = [0u8; 24];
    for _ in 0..count {
        reader.read_exact(&mut record)?;
        out.push(SelectedIndex {
            batch: i64_at(&record, 0),
            class: i64_at(&record, 8),
            box_index: i64_at(&record, 16),
        });
    }
    Ok(out)
}

/// Writes the record stream to a file path.
pub fn write_selected_indices_file<P: AsRef<Path>>(
    path: P,
    selected: &[SelectedIndex],
) -> NmsResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_selected_indices(&mut writer, selected)?;
    writer.flush()?;
    Ok(())
}

/// Reads the record stream from a file path.
pub fn read_selected_indices_file<P: AsRef<Path>>(path: P) -> NmsResult<Vec<SelectedIndex>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_selected_indices(&mut reader)
}

#[inline]
fn i64_at(record: &[u8; 24], at: usize) -> i64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&record[at..at + 8]);
    i64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::{read_selected_indices, write_selected_indices};
    use crate::batch::SelectedIndex;
    use std::io::Cursor;

    #[test]
    fn record_stream_round_trips() {
        let records = vec![
            SelectedIndex {
                batch: 0,
                class: 1,
                box_index: 42,
            },
            SelectedIndex {
                batch: 3,
                class: 0,
                box_index: 7,
            },
        ];
        let mut buffer = Vec::new();
        write_selected_indices(&mut buffer, &records).unwrap();
        assert_eq!(buffer.len(), 8 + records.len() * 24);

        let decoded = read_selected_indices(&mut Cursor::new(buffer)).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn empty_stream_round_trips() {
        let mut buffer = Vec::new();
        write_selected_indices(&mut buffer, &[]).unwrap();
        assert_eq!(buffer.len(), 8);
        let decoded = read_selected_indices(&mut Cursor::new(buffer)).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let records = vec![SelectedIndex {
            batch: 0,
            class: 0,
            box_index: 1,
        }];
        let mut buffer = Vec::new();
        write_selected_indices(&mut buffer, &records).unwrap();
        buffer.truncate(buffer.len() - 4);
        assert!(read_selected_indices(&mut Cursor::new(buffer)).is_err());
    }
}
