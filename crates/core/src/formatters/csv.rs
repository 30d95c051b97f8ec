use ::csv::{Terminator, WriterBuilder};

use crate::rank::RankedList;
use crate::{CipinError, Result};

/// Render a ranking as CSV with a `word,count` header.
///
/// An empty ranking yields the header alone. Rows end with `\n`.
pub fn convert_to_csv(list: &RankedList) -> Result<String> {
    let mut writer = WriterBuilder::new().terminator(Terminator::Any(b'\n')).from_writer(Vec::new());

    writer.write_record(["word", "count"])?;
    for entry in list {
        writer.write_record([entry.token.as_str(), entry.count.to_string().as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| CipinError::Serialize(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CipinError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StopWordSet, rank};

    fn ranked(words: &[&str]) -> RankedList {
        let tokens: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        rank(&tokens, &StopWordSet::empty(), 20)
    }

    #[test]
    fn test_csv_rows() {
        let output = convert_to_csv(&ranked(&["猫", "狗", "猫"])).unwrap();
        assert_eq!(output, "word,count\n猫,2\n狗,1\n");
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let output = convert_to_csv(&ranked(&["a,b", "say \"hi\"", "a,b"])).unwrap();
        assert_eq!(output, "word,count\n\"a,b\",2\n\"say \"\"hi\"\"\",1\n");
    }

    #[test]
    fn test_csv_output_reads_back() {
        let output = convert_to_csv(&ranked(&["数据", "x,y", "数据"])).unwrap();
        let mut reader = ::csv::Reader::from_reader(output.as_bytes());

        let rows: Vec<(String, usize)> = reader.deserialize().map(|row| row.unwrap()).collect();
        assert_eq!(rows, vec![("数据".to_string(), 2), ("x,y".to_string(), 1)]);
    }

    #[test]
    fn test_csv_empty() {
        assert_eq!(convert_to_csv(&RankedList::default()).unwrap(), "word,count\n");
    }
}
