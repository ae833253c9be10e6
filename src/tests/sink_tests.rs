//! Unit tests for output sinks

use crate::error::SinkError;
use crate::sink::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_append_returns_length() {
        let mut sink = MemorySink::new();

        assert_eq!(sink.append(b"abc").unwrap(), 3);
        assert_eq!(sink.append(b"").unwrap(), 3);
        assert_eq!(sink.append(b"de").unwrap(), 5);
        assert_eq!(sink.tell(), 5);
        assert_eq!(sink.as_bytes(), b"abcde");
    }

    #[test]
    fn test_memory_overwrite_in_place() {
        let mut sink = MemorySink::new();
        sink.append(b"hello world").unwrap();

        sink.overwrite(b"WORLD", 6).unwrap();
        sink.overwrite(b"", 11).unwrap();

        assert_eq!(sink.current_length(), 11);
        assert_eq!(sink.into_inner(), b"hello WORLD".to_vec());
    }

    #[test]
    fn test_memory_overwrite_past_end_fails() {
        let mut sink = MemorySink::new();
        sink.append(b"12345").unwrap();

        let err = sink.overwrite(b"xyz", 3).unwrap_err();
        assert!(matches!(
            err,
            SinkError::OutOfBounds {
                offset: 3,
                len: 3,
                length: 5
            }
        ));
        assert!(sink.overwrite(b"x", u64::MAX).is_err());
        assert_eq!(sink.as_bytes(), b"12345", "failed overwrite leaves data alone");
    }

    #[test]
    fn test_file_sink_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp3");

        let mut sink = FileSink::create(&path).unwrap();
        assert_eq!(sink.append(b"ID3....").unwrap(), 7);
        assert_eq!(sink.append(b"frames").unwrap(), 13);
        sink.overwrite(b"v2", 3).unwrap();
        assert!(sink.overwrite(b"toolong", 10).is_err());
        assert_eq!(sink.append(b"!").unwrap(), 14, "appends after a patch go to the end");
        sink.into_file().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"ID3v2..frames!".to_vec());
    }

    #[test]
    fn test_file_sink_create_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no/such/dir/out.mp3");

        assert!(matches!(FileSink::create(missing), Err(SinkError::Io(_))));
    }
}
