//! Utility functions used in all other neuropaint modules.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteordered::byteorder::ReadBytesExt;
use flate2::bufread::GzDecoder;

use crate::error::Result;

/// Check whether the file extension ends with ".gz".
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}


/// Names that occur more than once, each reported once, in order of their first repetition.
pub fn duplicate_names(names: &[String]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    names.iter()
        .map(String::as_str)
        .filter(|name| !seen.insert(*name) && reported.insert(*name))
        .collect()
}


/// Upper bound for buffers sized from counts in a file header, which may be bogus.
const MAX_PREALLOCATED_VALUES: usize = 1 << 20;

/// Capacity to reserve for `count` values announced in a file header. Larger buffers grow while reading.
pub fn capacity_hint(count: usize) -> usize {
    count.min(MAX_PREALLOCATED_VALUES)
}


/// Open a file for reading, transparently decompressing it if its name ends with ".gz".
pub fn open_maybe_gz<P>(path: P) -> Result<Box<dyn Read>>
where
    P: AsRef<Path>,
{
    let gz = is_gz_file(&path);
    let file = BufReader::new(File::open(path)?);
    if gz {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}


/// Read a FreeSurfer 'created by' info line, which is terminated by two consecutive '\n' chars. The terminating newlines are consumed but not returned.
pub fn read_double_newline_terminated_string<S>(input: &mut S) -> Result<String>
where
    S: Read,
{
    let mut info_line = String::new();
    let mut last_char = '\0';
    loop {
        let cur_char = input.read_u8()? as char;
        if cur_char == '\n' && last_char == '\n' {
            info_line.pop();
            return Ok(info_line);
        }
        info_line.push(cur_char);
        last_char = cur_char;
    }
}


/// Read a fixed length zero-terminated byte string of the given length from the input. Embedded '\0' chars are allowed, but not added to the returned String.
pub fn read_fixed_length_string<S>(input: &mut S, len: usize) -> Result<String>
where
    S: Read,
{
    let mut info_line = String::with_capacity(len);
    for _  in 0..len   {
        let cur_char = input.read_u8()? as char;
        if cur_char != '\0'  {
            info_line.push(cur_char);
        }
    }
    Ok(info_line)
}


#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn gz_files_are_detected_by_name() {
        assert!(is_gz_file("lh.sulc.gz"));
        assert!(!is_gz_file("lh.sulc"));
        assert!(!is_gz_file("/some/dir.gz/lh.sulc"));
    }

    #[test]
    fn duplicates_are_reported_once_in_order() {
        let names: Vec<String> = ["a", "b", "b", "c", "a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(vec!["b", "a"], duplicate_names(&names));
        assert!(duplicate_names(&names[..2]).is_empty());
    }

    #[test]
    fn header_counts_only_reserve_bounded_capacity() {
        assert_eq!(12, capacity_hint(12));
        assert_eq!(MAX_PREALLOCATED_VALUES, capacity_hint(i32::MAX as usize));
    }

    #[test]
    fn created_by_lines_are_read_up_to_the_double_newline() {
        let mut input = Cursor::new(b"created by me\non monday\n\nREST".to_vec());
        let line = read_double_newline_terminated_string(&mut input).unwrap();
        assert_eq!("created by me\non monday", line);
        assert_eq!(b'R', input.read_u8().unwrap());
    }

    #[test]
    fn fixed_length_strings_drop_embedded_zeros() {
        let mut input = Cursor::new(b"banks\0sts\0".to_vec());
        let s = read_fixed_length_string(&mut input, 10).unwrap();
        assert_eq!("bankssts", s);
    }
}
