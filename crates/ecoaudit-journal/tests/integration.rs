use ecoaudit_core::{
    AllowList, AuditLogRecord, AuditSubject, ComponentRegistry, Coordinator, DaylightState,
    FixedClock,
};
use ecoaudit_canonical::Address;
use ecoaudit_journal::{
    verify_journal, FrameKind, JournalError, JournalReader, JournalWriter, ReadMode,
    WriteOptions,
};
use tempfile::TempDir;

fn summer(ts: u64) -> AuditLogRecord {
    AuditLogRecord::new(AuditSubject::ChangeToSummerTime, ts)
}

fn winter(ts: u64) -> AuditLogRecord {
    AuditLogRecord::new(AuditSubject::ChangeToWinterTime, ts)
}

#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_record(&summer(100)).unwrap();
        writer.append_record(&winter(200)).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_record().unwrap(), Some(summer(100)));
    assert_eq!(reader.read_record().unwrap(), Some(winter(200)));
    assert_eq!(reader.read_record().unwrap(), None);
}

#[test]
fn test_append_to_existing() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_record(&summer(1)).unwrap();
        writer.finish().unwrap();
    }
    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_record(&winter(2)).unwrap();
        writer.finish().unwrap();
    }

    let records: Vec<_> = JournalReader::open(&journal_path, ReadMode::Strict)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records, vec![summer(1), winter(2)]);
}

#[test]
fn test_truncate_on_open_without_append() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_record(&summer(1)).unwrap();
        writer.finish().unwrap();
    }
    {
        let options = WriteOptions {
            append: false,
            ..WriteOptions::default()
        };
        let mut writer = JournalWriter::open(&journal_path, options).unwrap();
        writer.append_record(&winter(9)).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_record().unwrap(), Some(winter(9)));
    assert_eq!(reader.read_record().unwrap(), None);
}

#[test]
fn test_unknown_frames_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_raw(FrameKind::Unknown(0x42), b"future").unwrap();
        writer.append_record(&summer(5)).unwrap();
        writer.finish().unwrap();
    }

    let mut reader = JournalReader::open(&journal_path, ReadMode::Strict).unwrap();
    assert_eq!(reader.read_record().unwrap(), Some(summer(5)));
    assert_eq!(reader.read_record().unwrap(), None);
}

#[test]
fn test_coordinator_writes_through_journal() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");
    let registry = ComponentRegistry::new(std::array::from_fn(|i| {
        Address::parse(format!("0x{}", format!("{:02x}", i + 1).repeat(20))).unwrap()
    }))
    .unwrap();
    let trust = registry
        .address(ecoaudit_core::ComponentIdentity::Trust)
        .clone();

    let writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    let coordinator = Coordinator::new(
        DaylightState::new(true),
        writer,
        AllowList::trust_only(&registry),
        FixedClock(1_000),
    );
    coordinator.adjust_daylight_saving(&trust).unwrap();
    coordinator.adjust_daylight_saving(&trust).unwrap();
    let (state, writer) = coordinator.into_parts();
    writer.finish().unwrap();
    assert!(state.is_winter_time);
    assert!(state.scheduled);

    let summary = verify_journal(&journal_path).unwrap();
    assert_eq!(summary.records, 2);
    assert!(summary.is_alternating());
    assert_eq!(summary.last, Some(winter(1_000)));
}

#[test]
fn test_verify_journal_flags_repeated_subject() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    {
        let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
        writer.append_record(&summer(1)).unwrap();
        writer.append_record(&winter(2)).unwrap();
        writer.append_record(&winter(3)).unwrap();
        writer.finish().unwrap();
    }

    let summary = verify_journal(&journal_path).unwrap();
    assert_eq!(summary.records, 3);
    assert!(!summary.is_alternating());
    assert_eq!(summary.repeats.len(), 1);
    assert_eq!(summary.repeats[0].index, 2);
    assert_eq!(summary.repeats[0].subject, AuditSubject::ChangeToWinterTime);
}

#[test]
fn test_rollback_discards_frames_after_checkpoint() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer.append_record(&summer(1)).unwrap();
    let checkpoint = writer.checkpoint().unwrap();
    writer.append_record(&winter(2)).unwrap();
    writer.append_record(&summer(3)).unwrap();
    writer.rollback(checkpoint).unwrap();
    writer.append_record(&winter(4)).unwrap();
    writer.finish().unwrap();

    let records: Vec<_> = JournalReader::open(&journal_path, ReadMode::Strict)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records, vec![summer(1), winter(4)]);
}

#[test]
fn test_rollback_rejects_point_outside_journal() {
    let temp_dir = TempDir::new().unwrap();
    let journal_path = temp_dir.path().join("pool.ecj");

    let mut writer = JournalWriter::open(&journal_path, WriteOptions::default()).unwrap();
    writer.append_record(&summer(1)).unwrap();
    let end = writer.checkpoint().unwrap();

    assert!(matches!(
        writer.rollback(4),
        Err(JournalError::InvalidFrame { offset: 4, .. })
    ));
    assert!(matches!(
        writer.rollback(end + 1),
        Err(JournalError::InvalidFrame { .. })
    ));
    assert_eq!(writer.checkpoint().unwrap(), end);
}
