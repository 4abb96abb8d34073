use smol_bitvec::{BitVector, BitVectorError};

#[test]
fn test_resize_grow_inline_to_heap() {
    let mut bits = BitVector::filled(40, true).unwrap();
    assert!(!bits.is_spilled());

    bits.resize(200).unwrap();
    assert_eq!(bits.len(), 200);
    assert!(bits.is_spilled());
    assert!(bits.all_set(0, 40).unwrap());
    assert!(!bits.any_set(40, 160).unwrap());
}

#[test]
fn test_resize_shrink_heap_to_inline() {
    let mut bits = BitVector::new(300).unwrap();
    bits.set(3, true).unwrap();
    bits.set(63, true).unwrap();
    bits.set(64, true).unwrap();
    bits.set(250, true).unwrap();

    bits.resize(64).unwrap();
    assert!(!bits.is_spilled());
    assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![3, 63]);
}

#[test]
fn test_resize_within_inline() {
    let mut bits = BitVector::filled(60, true).unwrap();
    bits.resize(10).unwrap();
    assert_eq!(bits.count_set_bits(), 10);

    bits.resize(64).unwrap();
    assert_eq!(bits.count_set_bits(), 10, "new positions start clear");
}

#[test]
fn test_resize_within_heap() {
    let mut bits = BitVector::filled(500, true).unwrap();
    bits.resize(130).unwrap();
    assert!(bits.is_spilled());
    assert_eq!(bits.count_set_bits(), 130);
    assert_eq!(bits.word_count(), 3);

    bits.resize(1000).unwrap();
    assert_eq!(bits.count_set_bits(), 130);
    assert_eq!(bits.last_set_bit(), Some(129));
}

#[test]
fn test_shrink_then_grow_clears_truncated_bits() {
    let mut bits = BitVector::filled(100, true).unwrap();
    bits.resize(70).unwrap();
    bits.resize(100).unwrap();
    assert_eq!(bits.count_set_bits(), 70);
    assert!(!bits.any_set(70, 30).unwrap());
}

#[test]
fn test_resize_same_length_is_noop() {
    let mut bits = BitVector::new(80).unwrap();
    bits.set(79, true).unwrap();
    bits.resize(80).unwrap();
    assert!(bits.get(79).unwrap());
}

#[test]
fn test_resize_to_zero_rejected() {
    let mut bits = BitVector::filled(80, true).unwrap();
    assert_eq!(
        bits.resize(0).unwrap_err(),
        BitVectorError::InvalidLength { len: 0 }
    );
    assert_eq!(bits.len(), 80);
    assert!(bits.all());
}

#[test]
fn test_resized_vector_stays_usable() {
    let mut bits = BitVector::new(10).unwrap();
    bits.resize(100).unwrap();
    bits.set(99, true).unwrap();
    bits.toggle(0).unwrap();
    assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![0, 99]);
    assert!(bits.get(100).is_err());
}
