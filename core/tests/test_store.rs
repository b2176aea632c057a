// Sequence stores: the in-memory ring and the checksummed log file.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use eventpush_core::recovery::{
        format_line, parse_line, LogSequenceStore, MemorySequenceStore, ReplaySource,
        SequenceStore, StoreError, StoredFrame,
    };
    use tempfile::tempdir;

// # ✅ 1. Memory ring

    #[test]
    fn memory_store_evicts_oldest() {
        let store = MemorySequenceStore::with_capacity(2);
        store.set(0, "data:a\n").unwrap();
        store.set(1, "data:b\n").unwrap();
        store.set(2, "data:c\n").unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(0).is_none());
        assert_eq!(store.latest_sequence(), Some(2));

        let after: Vec<u64> = store.entries_after(0).iter().map(|f| f.sequence).collect();
        assert_eq!(after, vec![1, 2]);
        assert!(store.entries_after(2).is_empty());

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let store = MemorySequenceStore::with_capacity(0);
        store.set(5, "data:x\n").unwrap();
        store.set(6, "data:y\n").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.latest_sequence(), Some(6));
    }

    #[test]
    fn memory_store_resetting_sequence_replaces_payload() {
        let store = MemorySequenceStore::with_capacity(2);
        store.set(0, "data:first\n").unwrap();
        store.set(1, "data:x\n").unwrap();
        store.set(0, "data:second\n").unwrap();
        store.set(1, "data:y\n").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().payload, "data:second\n");
        let after: Vec<_> = store.entries_after(0).into_iter().map(|f| f.payload).collect();
        assert_eq!(after, vec!["data:y\n"]);
    }

// # ✅ 2. Log line format

    #[test]
    fn log_line_round_trip() {
        let frame = StoredFrame::new(7, "data:a|b\ndata:c\n");
        let line = format_line(&frame);
        assert!(line.starts_with("SEQ|7|"));
        assert!(line.ends_with('\n'));

        let parsed = parse_line(line.trim_end(), 1).unwrap();
        assert_eq!(parsed.sequence, 7);
        assert_eq!(parsed.payload, frame.payload);
        assert_eq!(parsed.stored_at.timestamp_micros(), frame.stored_at.timestamp_micros());
    }

// # ❌ 3. Corrupt lines are rejected

    #[test]
    fn tampered_line_fails_checksum() {
        let line = format_line(&StoredFrame::new(1, "data:x\n"));
        let tampered = line.trim_end().replacen("SEQ|1|", "SEQ|2|", 1);
        match parse_line(&tampered, 3) {
            Err(StoreError::Corrupt { line, reason }) => {
                assert_eq!(line, 3);
                assert_eq!(reason, "checksum mismatch");
            }
            other => panic!("expected corrupt line, got {other:?}"),
        }
        assert!(matches!(parse_line("garbage", 1), Err(StoreError::Corrupt { .. })));
    }

// # ✅ 4. Log file store

    #[test]
    fn log_store_persists_and_replays() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq.log");

        let store = LogSequenceStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        for seq in 0..4u64 {
            store.set(seq, &format!("data:{seq}\n")).unwrap();
        }

        let replay: Vec<_> = store.entries_after(1).into_iter().map(|f| f.payload).collect();
        assert_eq!(replay, vec!["data:2\n", "data:3\n"]);

        drop(store);
        let reopened = LogSequenceStore::open(&path).unwrap();
        reopened.set(4, "data:4\n").unwrap();
        assert_eq!(LogSequenceStore::load(&path).unwrap().len(), 5);
    }

    #[test]
    fn log_store_last_write_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq.log");

        let store = LogSequenceStore::open(&path).unwrap();
        store.set(1, "data:x\n").unwrap();
        store.set(0, "data:a\n").unwrap();
        store.set(1, "data:y\n").unwrap();

        let frames = LogSequenceStore::load(&path).unwrap();
        let pairs: Vec<_> = frames.iter().map(|f| (f.sequence, f.payload.as_str())).collect();
        assert_eq!(pairs, vec![(0, "data:a\n"), (1, "data:y\n")]);

        let replay: Vec<_> = store.entries_after(0).into_iter().map(|f| f.payload).collect();
        assert_eq!(replay, vec!["data:y\n"]);
    }

    #[test]
    fn load_skips_corrupt_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seq.log");
        {
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(format_line(&StoredFrame::new(0, "data:ok\n")).as_bytes()).unwrap();
            file.write_all(b"SEQ|1|not-a-date|xx|00000000\n\n").unwrap();
            file.write_all(format_line(&StoredFrame::new(2, "data:ok2\n")).as_bytes()).unwrap();
        }

        let frames = LogSequenceStore::load(&path).unwrap();
        let seqs: Vec<u64> = frames.iter().map(|f| f.sequence).collect();
        assert_eq!(seqs, vec![0, 2]);
    }

    #[test]
    fn missing_log_is_io_error() {
        let dir = tempdir().unwrap();
        let err = LogSequenceStore::load(dir.path().join("absent.log")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
