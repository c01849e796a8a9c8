use tachocard_cyclic::{
    paint_chain, ActivityBuffer, ChainedRecord, CyclicEf, CyclicError, EfKind, FixedBuffer,
    FixedRecord, PlaceRecord, SlotRecord, CHAINED_POINTER_SIZE, MAX_CHAIN_RECORDS,
};
use tachocard_dd::{Activity, OdometerShort, TimeReal};

const JAN_1: u32 = 1_704_067_200;
const DAY: u32 = 86_400;

fn day_body(day: u32, distance: u16, changes: &[u16]) -> Vec<u8> {
    let mut out = (JAN_1 + day * DAY).to_be_bytes().to_vec();
    out.extend_from_slice(&[0x00, 0x10 + day as u8]);
    out.extend_from_slice(&distance.to_be_bytes());
    for raw in changes {
        out.extend_from_slice(&raw.to_be_bytes());
    }
    out
}

/// Lay `bodies` out oldest first from ring offset `start`, wrapping as needed.
fn activity_value(ring_len: usize, start: usize, bodies: &[Vec<u8>]) -> Vec<u8> {
    let mut ring = vec![0u8; ring_len];
    let mut pos = start;
    let mut newest = start;
    let mut prev_length = 0u16;
    for body in bodies {
        let length = u16::try_from(4 + body.len()).expect("fits");
        let mut record = prev_length.to_be_bytes().to_vec();
        record.extend_from_slice(&length.to_be_bytes());
        record.extend_from_slice(body);
        for (i, b) in record.iter().enumerate() {
            ring[(pos + i) % ring_len] = *b;
        }
        newest = pos;
        prev_length = length;
        pos = (pos + usize::from(length)) % ring_len;
    }
    let mut value = u16::try_from(start).expect("fits").to_be_bytes().to_vec();
    value.extend_from_slice(&u16::try_from(newest).expect("fits").to_be_bytes());
    value.extend_from_slice(&ring);
    value
}

/// Three days in a 100-byte ring starting at 70; the second straddles the end.
fn three_days() -> Vec<u8> {
    activity_value(
        100,
        70,
        &[
            day_body(0, 120, &[0x1800 | 480, 600]),
            day_body(1, 230, &[0x1000 | 420, 0x1800 | 450]),
            day_body(2, 340, &[0x0800 | 360, 0x1800 | 390]),
        ],
    )
}

fn changed_indices(a: &[u8], b: &[u8]) -> Vec<usize> {
    a.iter()
        .zip(b)
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn activity_roundtrip_is_identity() {
    let value = three_days();
    let buffer = ActivityBuffer::decode(&value).expect("valid ring");
    assert_eq!(buffer.oldest_pointer(), 70);
    assert_eq!(buffer.newest_pointer(), 2);
    assert_eq!(buffer.records.len(), 3);
    assert_eq!(buffer.encode().expect("paints"), value);
}

#[test]
fn activity_records_are_chronological() {
    let buffer = ActivityBuffer::decode(&three_days()).expect("valid ring");
    let days: Vec<_> = buffer.valid_records().map(|r| r.timestamp()).collect();
    assert_eq!(
        days,
        [TimeReal(JAN_1), TimeReal(JAN_1 + DAY), TimeReal(JAN_1 + 2 * DAY)]
    );
    let distances: Vec<_> = buffer.valid_records().map(|r| r.distance).collect();
    assert_eq!(distances, [120, 230, 340]);
}

#[test]
fn redecode_of_encoded_value_is_stable() {
    let buffer = ActivityBuffer::decode(&three_days()).expect("valid ring");
    let again = ActivityBuffer::decode(&buffer.encode().expect("paints")).expect("valid ring");
    assert_eq!(again.records, buffer.records);
}

#[test]
fn edit_in_straddling_record_touches_only_its_bytes() {
    let value = three_days();
    let mut buffer = ActivityBuffer::decode(&value).expect("valid ring");
    let middle = buffer.records[1].as_valid_mut().expect("valid day");
    assert_eq!(middle.changes[1].activity, Activity::Driving);
    middle.changes[1].minutes = 455;

    let painted = buffer.encode().expect("paints");
    // second change of the middle record sits at ring offsets 0..2
    let changed = changed_indices(&value, &painted);
    assert!(!changed.is_empty());
    assert!(changed
        .iter()
        .all(|&i| (CHAINED_POINTER_SIZE..CHAINED_POINTER_SIZE + 2).contains(&i)));

    let again = ActivityBuffer::decode(&painted).expect("valid ring");
    assert_eq!(again.records, buffer.records);
}

#[test]
fn padding_entries_survive_until_edited() {
    let value = activity_value(
        64,
        0,
        &[day_body(0, 50, &[0xffff, 0x1800 | 300, 0x0000, 0x0800 | 400])],
    );
    let mut buffer = ActivityBuffer::decode(&value).expect("valid ring");
    assert_eq!(buffer.records[0].as_valid().expect("valid day").changes.len(), 2);
    assert_eq!(buffer.encode().expect("paints"), value);

    buffer.records[0].as_valid_mut().expect("valid day").distance = 51;
    let painted = buffer.encode().expect("paints");
    let record = &painted[CHAINED_POINTER_SIZE..CHAINED_POINTER_SIZE + 20];
    // header kept, changes compacted, tail zeroed
    assert_eq!(&record[..4], &value[CHAINED_POINTER_SIZE..CHAINED_POINTER_SIZE + 4]);
    assert_eq!(&record[10..12], &51u16.to_be_bytes());
    assert_eq!(&record[12..16], &[0x19, 0x2c, 0x09, 0x90]);
    assert_eq!(&record[16..], &[0, 0, 0, 0]);

    let again = ActivityBuffer::decode(&painted).expect("valid ring");
    assert_eq!(again.records, buffer.records);
}

#[test]
fn grown_record_is_rejected_and_ring_untouched() {
    let value = three_days();
    let mut buffer = ActivityBuffer::decode(&value).expect("valid ring");
    let first = buffer.records[0].as_valid_mut().expect("valid day");
    first.changes.push(first.changes[0]);

    assert_eq!(
        buffer.encode(),
        Err(CyclicError::RecordTooLarge {
            offset: 70,
            slot: 16,
            encoded: 18,
        })
    );

    let mut ring = value[CHAINED_POINTER_SIZE..].to_vec();
    assert!(paint_chain(&mut ring, 2, &buffer.records).is_err());
    assert_eq!(ring, &value[CHAINED_POINTER_SIZE..]);
}

#[test]
fn undecodable_day_is_kept_raw() {
    let mut bad = day_body(1, 0, &[]);
    bad[4] = 0xee; // not BCD
    let value = activity_value(48, 4, &[day_body(0, 10, &[]), bad]);
    let buffer = ActivityBuffer::decode(&value).expect("valid ring");
    assert!(buffer.records[0].is_valid());
    let raw = buffer.records[1].raw().expect("kept raw");
    assert_eq!(raw.len(), 12);
    assert_eq!(raw[8], 0xee);
    assert_eq!(buffer.encode().expect("paints"), value);
}

#[test]
fn empty_ring_has_no_records() {
    let value = vec![0u8; CHAINED_POINTER_SIZE + 32];
    let buffer = ActivityBuffer::decode(&value).expect("valid ring");
    assert!(buffer.records.is_empty());
    assert_eq!(buffer.encode().expect("paints"), value);
}

#[test]
fn self_referencing_chain_hits_ceiling() {
    let mut value = vec![0u8, 0, 0, 0];
    let mut ring = vec![0u8; 16];
    ring[..2].copy_from_slice(&16u16.to_be_bytes());
    ring[2..4].copy_from_slice(&12u16.to_be_bytes());
    ring[4..12].copy_from_slice(&day_body(0, 1, &[]));
    value.extend_from_slice(&ring);
    assert_eq!(
        ActivityBuffer::decode(&value),
        Err(CyclicError::ChainTooLong {
            limit: MAX_CHAIN_RECORDS
        })
    );
}

#[test]
fn structural_errors() {
    let mut value = three_days();
    value[CHAINED_POINTER_SIZE + 2 + 3] = 2;
    assert_eq!(
        ActivityBuffer::decode(&value),
        Err(CyclicError::CorruptChain {
            offset: 2,
            length: 2
        })
    );

    let mut value = three_days();
    value[2..4].copy_from_slice(&100u16.to_be_bytes());
    assert_eq!(
        ActivityBuffer::decode(&value),
        Err(CyclicError::PointerOutOfRange {
            pointer: 100,
            limit: 100
        })
    );

    assert!(matches!(
        ActivityBuffer::decode(&[0, 0, 0]),
        Err(CyclicError::Truncated { .. })
    ));
}

fn place(time: u32, entry_type: u8, km: u32) -> [u8; 10] {
    let mut out = [0u8; 10];
    out[..4].copy_from_slice(&time.to_be_bytes());
    out[4] = entry_type;
    out[5] = 0x11;
    out[7..].copy_from_slice(&km.to_be_bytes()[1..]);
    out
}

/// Five place slots, newest in slot 1, three bytes of slack.
fn places() -> Vec<u8> {
    let mut value = vec![1u8];
    // chronological rank of each slot
    for age in [3u32, 4, 0, 1, 2] {
        let entry = u8::try_from(age % 2).expect("fits");
        let time = JAN_1 + age * 3600;
        let km = 1000 + 10 * age;
        value.extend_from_slice(&place(time, entry, km));
    }
    value.extend_from_slice(&[0x5a, 0x5a, 0x5a]);
    value
}

#[test]
fn places_wrap_into_chronological_order() {
    let value = places();
    let buffer = FixedBuffer::<PlaceRecord>::decode(&value).expect("valid ring");
    let odometers: Vec<_> = buffer.valid_records().map(|p| p.odometer).collect();
    assert_eq!(
        odometers,
        [1000, 1010, 1020, 1030, 1040].map(OdometerShort)
    );
    assert_eq!(buffer.encode().expect("paints"), value);
}

#[test]
fn place_edit_touches_only_newest_slot() {
    let value = places();
    let mut buffer = FixedBuffer::<PlaceRecord>::decode(&value).expect("valid ring");
    buffer
        .records
        .last_mut()
        .and_then(SlotRecord::as_valid_mut)
        .expect("valid place")
        .odometer = OdometerShort(1041);

    let painted = buffer.encode().expect("paints");
    let newest = 1 + PlaceRecord::LAYOUT.slot_width;
    assert_eq!(changed_indices(&value, &painted), [newest + 9]);
}

#[test]
fn every_kind_roundtrips_through_dispatch() {
    let activity = three_days();
    let ef = CyclicEf::decode(EfKind::DriverActivity, &activity).expect("valid ring");
    assert_eq!(ef.summary().valid, 3);
    assert_eq!(ef.encode().expect("paints"), activity);

    for kind in EfKind::ALL {
        let Some(layout) = kind.layout() else {
            continue;
        };
        let mut value = vec![0u8; layout.pointer_size + 4 * layout.slot_width + 1];
        value[layout.pointer_size..].fill(0xff);
        let ef = CyclicEf::decode(kind, &value).expect("blank ring");
        assert_eq!(ef.kind(), kind);
        assert_eq!(ef.summary().records, 4);
        assert_eq!(ef.summary().invalid(), 4);
        assert_eq!(ef.encode().expect("paints"), value, "{}", kind.file_name());
    }
}
